use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::ValidationError;
use crate::models::{Book, BookPayload, FeedbackSubmission};

use super::helpers::escape_control;

/// Contents of the add/update form at the top of the screen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub(crate) active: BookField,
}

/// Fields available within the book form, in tab order.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum BookField {
    #[default]
    Title,
    Author,
    Summary,
}

impl BookField {
    pub(crate) const ALL: [BookField; 3] = [BookField::Title, BookField::Author, BookField::Summary];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Summary => "Summary",
        }
    }
}

impl BookForm {
    /// Populate every field with the record's exact values for edit mode.
    pub(crate) fn from_book(book: &Book) -> Self {
        let payload = book.to_payload();
        Self {
            title: payload.title,
            author: payload.author,
            summary: payload.summary,
            active: BookField::Title,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.summary.is_empty()
    }

    pub(crate) fn focus(&mut self, field: BookField) {
        self.active = field;
    }

    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Summary,
            BookField::Summary => BookField::Title,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Summary,
            BookField::Author => BookField::Title,
            BookField::Summary => BookField::Author,
        };
    }

    /// Insert a character into the active field. Control characters are
    /// refused so they can never reach the request body or the terminal.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.field_mut(self.active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.field_mut(self.active).pop();
    }

    /// Trim and validate. Title and author are required; summary is not.
    pub(crate) fn parse_inputs(&self) -> Result<BookPayload, ValidationError> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(ValidationError::MissingBookFields);
        }
        Ok(BookPayload {
            title: title.to_string(),
            author: author.to_string(),
            summary: self.summary.trim().to_string(),
        })
    }

    pub(crate) fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Summary => &self.summary,
        }
    }

    fn field_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Summary => &mut self.summary,
        }
    }

    /// Render a single line for the form panel. The active field is only
    /// highlighted while the form holds keyboard focus.
    pub(crate) fn build_line(&self, field: BookField, focused: bool) -> Line<'static> {
        let value = self.value(field);
        let placeholder = match field {
            BookField::Summary => "<optional>",
            _ => "<required>",
        };
        input_line(
            field.label(),
            value,
            placeholder,
            focused && self.active == field,
        )
    }

    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

/// Two-field feedback modal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedbackForm {
    pub email: String,
    pub message: String,
    pub(crate) active: FeedbackField,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum FeedbackField {
    #[default]
    Email,
    Message,
}

impl FeedbackField {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            FeedbackField::Email => "Email",
            FeedbackField::Message => "Message",
        }
    }
}

impl FeedbackForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            FeedbackField::Email => FeedbackField::Message,
            FeedbackField::Message => FeedbackField::Email,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            FeedbackField::Email => self.email.push(ch),
            FeedbackField::Message => self.message.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            FeedbackField::Email => self.email.pop(),
            FeedbackField::Message => self.message.pop(),
        };
    }

    /// Both fields must hold something; values are sent as typed.
    pub(crate) fn parse_inputs(&self) -> Result<FeedbackSubmission, ValidationError> {
        if self.email.trim().is_empty() || self.message.trim().is_empty() {
            return Err(ValidationError::MissingFeedbackFields);
        }
        Ok(FeedbackSubmission {
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }

    pub(crate) fn build_line(&self, field: FeedbackField) -> Line<'static> {
        let value = match field {
            FeedbackField::Email => &self.email,
            FeedbackField::Message => &self.message,
        };
        input_line(field.label(), value, "<required>", self.active == field)
    }

    pub(crate) fn value_len(&self, field: FeedbackField) -> usize {
        match field {
            FeedbackField::Email => self.email.chars().count(),
            FeedbackField::Message => self.message.chars().count(),
        }
    }
}

fn input_line(name: &str, value: &str, placeholder: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        escape_control(value).into_owned()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{name}: ")),
        Span::styled(display, style),
    ])
}

/// The two answers a confirmation prompt accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
}

/// A pending yes/no question guarding `payload`.
///
/// `resolve` takes the prompt by value: once answered it no longer exists, so
/// a single prompt can never resolve twice.
#[derive(Debug, Clone)]
pub struct Confirm<T> {
    pub(crate) message: String,
    pub(crate) selection: ConfirmChoice,
    payload: T,
}

impl<T> Confirm<T> {
    /// Open a prompt with "No" preselected.
    pub(crate) fn new(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: message.into(),
            selection: ConfirmChoice::No,
            payload,
        }
    }

    pub(crate) fn toggle(&mut self) {
        self.selection = match self.selection {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        };
    }

    /// Consume the prompt. The payload is handed back only for `Yes`.
    pub(crate) fn resolve(self, choice: ConfirmChoice) -> Option<T> {
        match choice {
            ConfirmChoice::Yes => Some(self.payload),
            ConfirmChoice::No => None,
        }
    }

    pub(crate) fn resolve_selected(self) -> Option<T> {
        let choice = self.selection;
        self.resolve(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookId;

    #[test]
    fn missing_title_or_author_is_rejected() {
        let mut form = BookForm {
            title: "   ".to_string(),
            author: "Le Guin".to_string(),
            ..BookForm::default()
        };
        assert_eq!(form.parse_inputs(), Err(ValidationError::MissingBookFields));

        form.title = "Earthsea".to_string();
        form.author.clear();
        assert_eq!(form.parse_inputs(), Err(ValidationError::MissingBookFields));
    }

    #[test]
    fn summary_is_optional_and_fields_are_trimmed() {
        let form = BookForm {
            title: " Earthsea ".to_string(),
            author: "Le Guin".to_string(),
            ..BookForm::default()
        };
        let payload = form.parse_inputs().unwrap();
        assert_eq!(payload.title, "Earthsea");
        assert_eq!(payload.summary, "");
    }

    #[test]
    fn typing_goes_to_the_active_field() {
        let mut form = BookForm::default();
        form.push_char('A');
        form.next_field();
        form.push_char('B');
        form.next_field();
        form.push_char('C');
        assert!(!form.push_char('\u{1b}'));
        form.backspace();
        assert_eq!((form.title.as_str(), form.author.as_str()), ("A", "B"));
        assert!(form.summary.is_empty());

        form.next_field();
        assert_eq!(form.active, BookField::Title);
        form.previous_field();
        assert_eq!(form.active, BookField::Summary);
    }

    #[test]
    fn feedback_requires_both_fields() {
        let mut form = FeedbackForm::default();
        form.push_char('a');
        assert_eq!(
            form.parse_inputs(),
            Err(ValidationError::MissingFeedbackFields)
        );
        form.toggle_field();
        form.push_char('b');
        let submission = form.parse_inputs().unwrap();
        assert_eq!(submission.email, "a");
        assert_eq!(submission.message, "b");
    }

    #[test]
    fn confirm_yields_payload_only_for_yes() {
        let id = BookId::new("9");
        assert_eq!(
            Confirm::new("Delete?", id.clone()).resolve(ConfirmChoice::Yes),
            Some(id.clone())
        );
        assert_eq!(
            Confirm::new("Delete?", id.clone()).resolve(ConfirmChoice::No),
            None
        );

        let mut prompt = Confirm::new("Delete?", id.clone());
        assert_eq!(prompt.selection, ConfirmChoice::No);
        prompt.toggle();
        assert_eq!(prompt.resolve_selected(), Some(id));
    }
}
