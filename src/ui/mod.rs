//! Ratatui front-end: a form panel for adding and editing books, the list
//! panel below it, and modal layers for confirmation, details and feedback.

mod app;
mod forms;
mod helpers;
mod notify;
mod terminal;

pub use app::{App, BookDetail, Command, EditState, Focus, ListTarget, NO_SUMMARY};
pub use forms::{BookField, BookForm, ConfirmChoice, FeedbackField, FeedbackForm};
pub use notify::{Loader, LoaderGuard, Toast, ToastKind};
pub use terminal::run_app;
