use std::borrow::Cow;

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Make server-supplied text safe to hand to the terminal. Control
/// characters (including ESC, which would start an escape sequence) are
/// replaced with their visible `\u{..}` spelling; everything else, markup
/// included, passes through as literal text.
pub(crate) fn escape_control(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if ch.is_control() {
            escaped.extend(ch.escape_unicode());
        } else {
            escaped.push(ch);
        }
    }
    Cow::Owned(escaped)
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Lay a row of `[Label]` buttons out left to right starting at `origin`,
/// separated by a single space, and return each button's rectangle.
pub(crate) fn button_rects(origin: Rect, labels: &[&str]) -> Vec<Rect> {
    let mut x = origin.x;
    let right_edge = origin.x.saturating_add(origin.width);
    labels
        .iter()
        .map(|label| {
            let width = (label.chars().count() as u16 + 2).min(right_edge.saturating_sub(x));
            let rect = Rect {
                x,
                y: origin.y,
                width,
                height: 1,
            };
            x = x.saturating_add(width + 1);
            rect
        })
        .collect()
}

pub(crate) fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}
