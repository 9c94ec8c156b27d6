use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;
use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{error, info};

use crate::api::Remote;
use crate::models::{Book, BookId, BookPayload, FeedbackSubmission};

use super::forms::{BookField, BookForm, Confirm, ConfirmChoice, FeedbackField, FeedbackForm};
use super::helpers::{button_rects, centered_rect, escape_control, hit};
use super::notify::{Loader, Toast, ToastKind};

/// Header line holding the app name, busy indicator and feedback button.
const HEADER_HEIGHT: u16 = 1;
/// Three input lines, one button line, two borders.
const FORM_HEIGHT: u16 = 6;
/// Footer space reserved for the toast and key hints.
const FOOTER_HEIGHT: u16 = 3;
const ROW_BUTTONS: [&str; 2] = ["Edit", "Delete"];
const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";
/// Shown in the detail view when a record has no summary.
pub const NO_SUMMARY: &str = "No summary available.";
const ADD_LABEL: &str = "Add Book";
const UPDATE_LABEL: &str = "Update Book";

/// Whether form submission creates a new record or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(BookId),
}

impl EditState {
    fn begin(&mut self, id: BookId) {
        *self = EditState::Editing(id);
    }

    fn reset(&mut self) {
        *self = EditState::Idle;
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing(_))
    }
}

/// Which panel receives keystrokes while no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

/// What part of a list row a click or shortcut landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Edit,
    Delete,
    Body,
}

/// Read-only snapshot shown by the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub title: String,
    pub author: String,
    pub summary: String,
}

impl From<&Book> for BookDetail {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            summary: book.summary_text().unwrap_or(NO_SUMMARY).to_string(),
        }
    }
}

/// A network operation waiting for the terminal loop to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadBooks,
    CreateBook(BookPayload),
    UpdateBook(BookId, BookPayload),
    DeleteBook(BookId),
    SendFeedback(FeedbackSubmission),
}

/// Modal layers drawn over the main view.
enum Mode {
    Normal,
    ConfirmDelete(Confirm<BookId>),
    Detail(BookDetail),
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopupButton {
    Yes,
    No,
    Close,
    Send,
}

#[derive(Debug, Clone, Copy)]
struct RowHit {
    index: usize,
    row: Rect,
    edit: Rect,
    delete: Rect,
}

/// Clickable regions recorded by the last `draw`.
#[derive(Debug, Clone, Default)]
struct HitMap {
    fields: Vec<(BookField, Rect)>,
    submit: Option<Rect>,
    cancel: Option<Rect>,
    feedback: Option<Rect>,
    list: Option<Rect>,
    rows: Vec<RowHit>,
    popup: Option<Rect>,
    popup_buttons: Vec<(PopupButton, Rect)>,
    feedback_fields: Vec<(FeedbackField, Rect)>,
}

impl HitMap {
    fn popup_button(&self, column: u16, row: u16) -> Option<PopupButton> {
        self.popup_buttons
            .iter()
            .find(|(_, rect)| hit(*rect, column, row))
            .map(|(button, _)| *button)
    }

    fn list_target(&self, column: u16, row: u16) -> Option<(usize, ListTarget)> {
        let row_hit = self.rows.iter().find(|r| hit(r.row, column, row))?;
        let target = if hit(row_hit.edit, column, row) {
            ListTarget::Edit
        } else if hit(row_hit.delete, column, row) {
            ListTarget::Delete
        } else {
            ListTarget::Body
        };
        Some((row_hit.index, target))
    }
}

/// Book list state, edit state and the queue of pending network work.
pub struct App {
    remote: Remote,
    books: Vec<Book>,
    selected: usize,
    form: BookForm,
    edit_state: EditState,
    focus: Focus,
    mode: Mode,
    feedback_form: FeedbackForm,
    toast: Option<Toast>,
    loader: Loader,
    pending: VecDeque<Command>,
    hits: RefCell<HitMap>,
}

impl App {
    /// Build the app and queue the initial load.
    pub fn new(remote: Remote) -> Self {
        Self {
            remote,
            books: Vec::new(),
            selected: 0,
            form: BookForm::default(),
            edit_state: EditState::Idle,
            focus: Focus::List,
            mode: Mode::Normal,
            feedback_form: FeedbackForm::default(),
            toast: None,
            loader: Loader::default(),
            pending: VecDeque::from([Command::LoadBooks]),
            hits: RefCell::new(HitMap::default()),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit_state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn detail(&self) -> Option<&BookDetail> {
        match &self.mode {
            Mode::Detail(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn confirm_message(&self) -> Option<&str> {
        match &self.mode {
            Mode::ConfirmDelete(prompt) => Some(&prompt.message),
            _ => None,
        }
    }

    /// The feedback form while its modal is open.
    pub fn feedback_form(&self) -> Option<&FeedbackForm> {
        match self.mode {
            Mode::Feedback => Some(&self.feedback_form),
            _ => None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.edit_state.is_editing() {
            UPDATE_LABEL
        } else {
            ADD_LABEL
        }
    }

    /// The cancel control only exists while editing.
    pub fn cancel_visible(&self) -> bool {
        self.edit_state.is_editing()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn next_command(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    /// Run every queued command in order.
    pub fn process_pending(&mut self) {
        while let Some(command) = self.next_command() {
            self.execute(command);
        }
    }

    /// Perform one network operation and fold its outcome into the UI.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::LoadBooks => self.load_books(),
            Command::CreateBook(payload) => self.create_book(&payload),
            Command::UpdateBook(id, payload) => self.update_book(&id, &payload),
            Command::DeleteBook(id) => self.delete_book(&id),
            Command::SendFeedback(submission) => self.send_feedback(&submission),
        }
    }

    /// Fetch the whole collection. A failure keeps whatever is on screen.
    pub fn load_books(&mut self) {
        let _busy = self.loader.show();
        match self.remote.list_books() {
            Ok(books) => {
                info!(count = books.len(), "loaded books");
                self.render_books(books);
            }
            Err(err) => {
                error!(error = %err, "failed to load books");
                self.show_toast("Failed to load books", ToastKind::Error);
            }
        }
    }

    /// Replace the displayed list with `books`.
    pub fn render_books(&mut self, books: Vec<Book>) {
        self.books = books;
        if self.selected >= self.books.len() {
            self.selected = self.books.len().saturating_sub(1);
        }
    }

    /// Creation failures are logged but not surfaced; the list reloads
    /// either way.
    pub fn create_book(&mut self, payload: &BookPayload) {
        {
            let _busy = self.loader.show();
            match self.remote.create_book(payload) {
                Ok(()) => {
                    info!(title = %payload.title, "created book");
                    self.show_toast("Book added successfully", ToastKind::Success);
                }
                Err(err) => error!(error = %err, "failed to create book"),
            }
        }
        self.load_books();
    }

    /// Updates do not reload the list.
    pub fn update_book(&mut self, id: &BookId, payload: &BookPayload) {
        let _busy = self.loader.show();
        match self.remote.update_book(id, payload) {
            Ok(()) => {
                info!(%id, "updated book");
                self.show_toast("Book updated successfully", ToastKind::Success);
            }
            Err(err) => {
                error!(%id, error = %err, "failed to update book");
                self.show_toast("Error updating book", ToastKind::Error);
            }
        }
    }

    /// Delete then reload, whatever the outcome.
    pub fn delete_book(&mut self, id: &BookId) {
        {
            let _busy = self.loader.show();
            match self.remote.delete_book(id) {
                Ok(()) => {
                    info!(%id, "deleted book");
                    self.show_toast("Book deleted successfully", ToastKind::Success);
                }
                Err(err) => {
                    error!(%id, error = %err, "failed to delete book");
                    self.show_toast("Failed to delete book", ToastKind::Error);
                }
            }
        }
        self.load_books();
    }

    fn send_feedback(&mut self, submission: &FeedbackSubmission) {
        let _busy = self.loader.show();
        match self.remote.send_feedback(submission) {
            Ok(()) => {
                info!("feedback sent");
                self.show_toast("Feedback sent successfully!", ToastKind::Success);
                self.feedback_form = FeedbackForm::default();
                if matches!(self.mode, Mode::Feedback) {
                    self.mode = Mode::Normal;
                }
            }
            Err(err) => {
                error!(error = %err, "failed to send feedback");
                self.show_toast("Failed to send feedback", ToastKind::Error);
            }
        }
    }

    /// Show `text` immediately, replacing any toast still on screen.
    pub fn show_toast(&mut self, text: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast::new(text, kind, Instant::now()));
    }

    /// Route a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match self.focus {
                Focus::Form => self.handle_form_key(code),
                Focus::List => self.handle_list_key(code, &mut exit),
            },
            Mode::ConfirmDelete(prompt) => self.handle_confirm_key(code, prompt),
            Mode::Detail(detail) => match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Mode::Normal,
                _ => Mode::Detail(detail),
            },
            Mode::Feedback => self.handle_feedback_key(code),
        };

        exit
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => {
                if self.edit_state.is_editing() {
                    self.cancel_edit();
                } else {
                    self.focus = Focus::List;
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Enter => self.submit_book_form(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_list_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.books.len().saturating_sub(1),
            KeyCode::Tab | KeyCode::Char('a') | KeyCode::Char('+') => {
                self.focus = Focus::Form;
            }
            KeyCode::Char('r') => self.pending.push_back(Command::LoadBooks),
            KeyCode::Char('f') => return Mode::Feedback,
            KeyCode::Enter => return self.target_selected(ListTarget::Body),
            KeyCode::Char('e') => return self.target_selected(ListTarget::Edit),
            KeyCode::Char('d') | KeyCode::Delete => {
                return self.target_selected(ListTarget::Delete)
            }
            _ => {}
        }
        Mode::Normal
    }

    fn target_selected(&mut self, target: ListTarget) -> Mode {
        if self.books.is_empty() {
            self.show_toast("No book selected.", ToastKind::Error);
            return Mode::Normal;
        }
        self.handle_list_target(self.selected, target)
    }

    /// Single entry point for every interaction with a list row.
    fn handle_list_target(&mut self, index: usize, target: ListTarget) -> Mode {
        let Some(book) = self.books.get(index).cloned() else {
            return Mode::Normal;
        };
        self.selected = index;

        match target {
            ListTarget::Edit => {
                self.start_edit(&book);
                Mode::Normal
            }
            ListTarget::Delete => Mode::ConfirmDelete(Confirm::new(DELETE_PROMPT, book.id)),
            ListTarget::Body => Mode::Detail(BookDetail::from(&book)),
        }
    }

    fn start_edit(&mut self, book: &Book) {
        self.form = BookForm::from_book(book);
        self.edit_state.begin(book.id.clone());
        self.form.focus(BookField::Title);
        self.focus = Focus::Form;
    }

    /// Leave edit mode without touching the server.
    pub fn cancel_edit(&mut self) {
        self.edit_state.reset();
        self.form.clear();
        self.show_toast("Edit canceled", ToastKind::Info);
    }

    /// Validate the form and queue a create or update depending on the edit
    /// state. Invalid input never reaches the network.
    pub fn submit_book_form(&mut self) {
        let payload = match self.form.parse_inputs() {
            Ok(payload) => payload,
            Err(err) => {
                self.show_toast(err.to_string(), ToastKind::Error);
                return;
            }
        };

        let command = match &self.edit_state {
            EditState::Editing(id) => Command::UpdateBook(id.clone(), payload),
            EditState::Idle => Command::CreateBook(payload),
        };
        self.pending.push_back(command);
        self.form.clear();
        self.edit_state.reset();
    }

    fn handle_confirm_key(&mut self, code: KeyCode, mut prompt: Confirm<BookId>) -> Mode {
        let answer = match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => prompt.resolve(ConfirmChoice::Yes),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                prompt.resolve(ConfirmChoice::No)
            }
            KeyCode::Enter => prompt.resolve_selected(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                prompt.toggle();
                return Mode::ConfirmDelete(prompt);
            }
            _ => return Mode::ConfirmDelete(prompt),
        };
        self.after_confirm(answer)
    }

    fn after_confirm(&mut self, answer: Option<BookId>) -> Mode {
        if let Some(id) = answer {
            self.pending.push_back(Command::DeleteBook(id));
        }
        Mode::Normal
    }

    fn handle_feedback_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.feedback_form.toggle_field()
            }
            KeyCode::Enter => self.submit_feedback_form(),
            KeyCode::Backspace => self.feedback_form.backspace(),
            KeyCode::Char(ch) => {
                self.feedback_form.push_char(ch);
            }
            _ => {}
        }
        Mode::Feedback
    }

    /// The modal stays open until the send succeeds.
    fn submit_feedback_form(&mut self) {
        match self.feedback_form.parse_inputs() {
            Ok(submission) => self.pending.push_back(Command::SendFeedback(submission)),
            Err(err) => self.show_toast(err.to_string(), ToastKind::Error),
        }
    }

    /// Route a left click using the regions recorded by the last draw.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        let hits = self.hits.borrow().clone();
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.click_main(&hits, column, row),
            Mode::ConfirmDelete(prompt) => match hits.popup_button(column, row) {
                Some(PopupButton::Yes) => {
                    let answer = prompt.resolve(ConfirmChoice::Yes);
                    self.after_confirm(answer)
                }
                Some(PopupButton::No) => {
                    let answer = prompt.resolve(ConfirmChoice::No);
                    self.after_confirm(answer)
                }
                _ => Mode::ConfirmDelete(prompt),
            },
            Mode::Detail(detail) => {
                let inside = hits.popup.is_some_and(|popup| hit(popup, column, row));
                let closed = hits.popup_button(column, row) == Some(PopupButton::Close);
                if closed || !inside {
                    Mode::Normal
                } else {
                    Mode::Detail(detail)
                }
            }
            Mode::Feedback => match hits.popup_button(column, row) {
                Some(PopupButton::Close) => Mode::Normal,
                Some(PopupButton::Send) => {
                    self.submit_feedback_form();
                    Mode::Feedback
                }
                _ => {
                    if let Some((field, _)) = hits
                        .feedback_fields
                        .iter()
                        .find(|(_, rect)| hit(*rect, column, row))
                    {
                        self.feedback_form.active = *field;
                    }
                    Mode::Feedback
                }
            },
        };
    }

    fn click_main(&mut self, hits: &HitMap, column: u16, row: u16) -> Mode {
        if hits.feedback.is_some_and(|rect| hit(rect, column, row)) {
            return Mode::Feedback;
        }
        if hits.submit.is_some_and(|rect| hit(rect, column, row)) {
            self.focus = Focus::Form;
            self.submit_book_form();
            return Mode::Normal;
        }
        if hits.cancel.is_some_and(|rect| hit(rect, column, row)) {
            self.cancel_edit();
            return Mode::Normal;
        }
        if let Some((field, _)) = hits.fields.iter().find(|(_, rect)| hit(*rect, column, row)) {
            self.focus = Focus::Form;
            self.form.focus(*field);
            return Mode::Normal;
        }
        if let Some((index, target)) = hits.list_target(column, row) {
            self.focus = Focus::List;
            return self.handle_list_target(index, target);
        }
        if hits.list.is_some_and(|rect| hit(rect, column, row)) {
            self.focus = Focus::List;
        }
        Mode::Normal
    }

    fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let last = self.books.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        *self.hits.borrow_mut() = HitMap::default();
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_list(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);

        match &self.mode {
            Mode::Normal => {}
            Mode::ConfirmDelete(prompt) => self.draw_confirm(frame, area, prompt),
            Mode::Detail(detail) => self.draw_detail(frame, area, detail),
            Mode::Feedback => self.draw_feedback(frame, area),
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "Bookbase",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if self.loader.is_visible() {
            spans.push(Span::styled(
                "  Loading…",
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        let label = "Feedback";
        let width = label.len() as u16 + 2;
        let origin = Rect {
            x: area.right().saturating_sub(width),
            width: width.min(area.width),
            ..area
        };
        let rect = button_rects(origin, &[label])[0];
        render_button(frame, rect, label, Style::default().fg(Color::Cyan));
        self.hits.borrow_mut().feedback = Some(rect);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let title = if self.edit_state.is_editing() {
            "Edit Book"
        } else {
            "New Book"
        };
        let mut block = Block::default().title(title).borders(Borders::ALL);
        if self.focus == Focus::Form && matches!(self.mode, Mode::Normal) {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);
        if inner.height == 0 {
            return;
        }

        let focused = self.focus == Focus::Form;
        let mut hits = self.hits.borrow_mut();
        for (offset, field) in BookField::ALL.iter().enumerate() {
            let y = inner.y + offset as u16;
            if y >= inner.bottom() {
                break;
            }
            let line_area = Rect {
                y,
                height: 1,
                ..inner
            };
            frame.render_widget(Paragraph::new(self.form.build_line(*field, focused)), line_area);
            hits.fields.push((*field, line_area));
        }

        let button_y = inner.y + BookField::ALL.len() as u16;
        if button_y < inner.bottom() {
            let origin = Rect {
                y: button_y,
                height: 1,
                ..inner
            };
            let mut labels = vec![self.submit_label()];
            if self.cancel_visible() {
                labels.push("Cancel");
            }
            let rects = button_rects(origin, &labels);
            render_button(frame, rects[0], labels[0], Style::default().fg(Color::Green));
            hits.submit = Some(rects[0]);
            if let Some(rect) = rects.get(1) {
                render_button(frame, *rect, labels[1], Style::default().fg(Color::Red));
                hits.cancel = Some(*rect);
            }
        }

        if focused && matches!(self.mode, Mode::Normal) {
            let field = self.form.active;
            let row = BookField::ALL
                .iter()
                .position(|candidate| *candidate == field)
                .unwrap_or(0) as u16;
            let prefix = field.label().len() as u16 + 2;
            frame.set_cursor_position((
                inner.x + prefix + self.form.value_len(field) as u16,
                inner.y + row,
            ));
        }
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .title(format!("Books ({})", self.books.len()))
            .borders(Borders::ALL);
        if self.focus == Focus::List && matches!(self.mode, Mode::Normal) {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);
        self.hits.borrow_mut().list = Some(inner);

        if self.books.is_empty() {
            let message = Paragraph::new("No books yet. Press 'a' to add one.")
                .alignment(Alignment::Center);
            frame.render_widget(message, inner);
            return;
        }
        if inner.height == 0 {
            return;
        }

        let visible = inner.height as usize;
        let offset = self.selected.saturating_sub(visible - 1);
        let buttons_width = ROW_BUTTONS
            .iter()
            .map(|label| label.len() as u16 + 3)
            .sum::<u16>();

        let mut hits = self.hits.borrow_mut();
        for (slot, (index, book)) in self
            .books
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let row = Rect {
                y: inner.y + slot as u16,
                height: 1,
                ..inner
            };
            let text_width = row.width.saturating_sub(buttons_width);
            let text_area = Rect {
                width: text_width,
                ..row
            };
            let buttons_origin = Rect {
                x: row.x + text_width,
                width: row.width - text_width,
                ..row
            };

            let selected = index == self.selected;
            let base = if selected && self.focus == Focus::List {
                Style::default().add_modifier(Modifier::REVERSED)
            } else if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(
                    escape_control(&book.title).into_owned(),
                    base.add_modifier(Modifier::BOLD),
                ),
                Span::styled(" - ", base),
                Span::styled(
                    escape_control(&book.author).into_owned(),
                    base.add_modifier(Modifier::ITALIC),
                ),
            ]);
            frame.render_widget(Paragraph::new(line), text_area);

            let rects = button_rects(buttons_origin, &ROW_BUTTONS);
            render_button(frame, rects[0], ROW_BUTTONS[0], Style::default().fg(Color::Cyan));
            render_button(frame, rects[1], ROW_BUTTONS[1], Style::default().fg(Color::Red));
            hits.rows.push(RowHit {
                index,
                row,
                edit: rects[0],
                delete: rects[1],
            });
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let toast_line = match &self.toast {
            Some(toast) if toast.is_visible_at(Instant::now()) => Line::from(Span::styled(
                format!(" {} ", toast.text),
                toast.kind.style(),
            )),
            _ => Line::from(""),
        };

        let paragraph =
            Paragraph::new(vec![toast_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let pairs: &[(&str, &str)] = match (&self.mode, self.focus) {
            (Mode::ConfirmDelete(_), _) => &[("[y]", "Yes"), ("[n/Esc]", "No")],
            (Mode::Detail(_), _) => &[("[Esc]", "Close")],
            (Mode::Feedback, _) => &[("[Tab]", "Switch"), ("[Enter]", "Send"), ("[Esc]", "Close")],
            (Mode::Normal, Focus::Form) if self.edit_state.is_editing() => {
                &[("[Tab]", "Next field"), ("[Enter]", "Update"), ("[Esc]", "Cancel edit")]
            }
            (Mode::Normal, Focus::Form) => {
                &[("[Tab]", "Next field"), ("[Enter]", "Add"), ("[Esc]", "Back to list")]
            }
            (Mode::Normal, Focus::List) => &[
                ("[↑↓]", "Select"),
                ("[Enter]", "Details"),
                ("[e]", "Edit"),
                ("[d]", "Delete"),
                ("[a]", "Add"),
                ("[r]", "Reload"),
                ("[f]", "Feedback"),
                ("[q]", "Quit"),
            ],
        };

        let mut spans = Vec::with_capacity(pairs.len() * 2);
        for (key, action) in pairs {
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(format!(" {action}   ")));
        }
        Line::from(spans)
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect, prompt: &Confirm<BookId>) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Confirm").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let message = Paragraph::new(prompt.message.clone()).wrap(Wrap { trim: true });
        frame.render_widget(message, inner);

        let mut hits = self.hits.borrow_mut();
        hits.popup = Some(popup_area);
        if inner.height < 3 {
            return;
        }
        let origin = Rect {
            y: inner.bottom() - 1,
            height: 1,
            ..inner
        };
        let rects = button_rects(origin, &["Yes", "No"]);
        for (label, choice, rect) in [
            ("Yes", ConfirmChoice::Yes, rects[0]),
            ("No", ConfirmChoice::No, rects[1]),
        ] {
            let style = if prompt.selection == choice {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            render_button(frame, rect, label, style);
        }
        hits.popup_buttons.push((PopupButton::Yes, rects[0]));
        hits.popup_buttons.push((PopupButton::No, rects[1]));
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &BookDetail) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let label = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled("Title: ", label),
                Span::raw(escape_control(&detail.title).into_owned()),
            ]),
            Line::from(vec![
                Span::styled("Author: ", label),
                Span::raw(escape_control(&detail.author).into_owned()),
            ]),
            Line::from(""),
            Line::from(Span::styled("Summary:", label)),
            Line::from(escape_control(&detail.summary).into_owned()),
        ];
        let body = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);

        let mut hits = self.hits.borrow_mut();
        hits.popup = Some(popup_area);
        if inner.height > 0 {
            let origin = Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            };
            let rect = button_rects(origin, &["Close"])[0];
            render_button(frame, rect, "Close", Style::default().fg(Color::Cyan));
            hits.popup_buttons.push((PopupButton::Close, rect));
        }
    }

    fn draw_feedback(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Send Feedback")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut hits = self.hits.borrow_mut();
        hits.popup = Some(popup_area);
        let fields = [FeedbackField::Email, FeedbackField::Message];
        for (offset, field) in fields.iter().enumerate() {
            let y = inner.y + offset as u16;
            if y >= inner.bottom() {
                return;
            }
            let line_area = Rect {
                y,
                height: 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(self.feedback_form.build_line(*field)),
                line_area,
            );
            hits.feedback_fields.push((*field, line_area));
        }

        let button_y = inner.y + fields.len() as u16 + 1;
        if button_y < inner.bottom() {
            let origin = Rect {
                y: button_y,
                height: 1,
                ..inner
            };
            let rects = button_rects(origin, &["Send", "Close"]);
            render_button(frame, rects[0], "Send", Style::default().fg(Color::Green));
            render_button(frame, rects[1], "Close", Style::default().fg(Color::Cyan));
            hits.popup_buttons.push((PopupButton::Send, rects[0]));
            hits.popup_buttons.push((PopupButton::Close, rects[1]));
        }

        let field = self.feedback_form.active;
        let row = fields.iter().position(|f| *f == field).unwrap_or(0) as u16;
        let prefix = field.label().len() as u16 + 2;
        frame.set_cursor_position((
            inner.x + prefix + self.feedback_form.value_len(field) as u16,
            inner.y + row,
        ));
    }
}

fn render_button(frame: &mut Frame, rect: Rect, label: &str, style: Style) {
    frame.render_widget(
        Paragraph::new(Span::styled(format!("[{label}]"), style)),
        rect,
    );
}
