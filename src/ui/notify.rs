use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};

/// How long a toast stays on screen.
pub(crate) const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Severity of a toast, which picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub(crate) fn style(&self) -> Style {
        match self {
            ToastKind::Success => Style::default().fg(Color::Black).bg(Color::Green),
            ToastKind::Error => Style::default().fg(Color::White).bg(Color::Red),
            ToastKind::Info => Style::default().fg(Color::Black).bg(Color::Gray),
        }
    }
}

/// A transient message. Showing a new toast replaces this one outright, so
/// the latest message and its full duration always win.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    pub(crate) fn new(text: impl Into<String>, kind: ToastKind, shown_at: Instant) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_DURATION
    }
}

/// Global busy indicator. Counts outstanding guards so nested calls (a
/// create followed by its reload) keep it lit until the outermost finishes.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    active: Rc<Cell<usize>>,
}

impl Loader {
    /// Light the indicator until the returned guard drops.
    pub fn show(&self) -> LoaderGuard {
        self.active.set(self.active.get() + 1);
        LoaderGuard {
            active: Rc::clone(&self.active),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.active.get() > 0
    }
}

/// Hides the loader when dropped, on every exit path.
#[must_use = "the loader hides as soon as the guard is dropped"]
pub struct LoaderGuard {
    active: Rc<Cell<usize>>,
}

impl Drop for LoaderGuard {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}
