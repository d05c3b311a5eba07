//! Application service layer.
//!
//! Services hold the UI-side state and business rules. They sit between the
//! MCP handlers and the repository that talks to the directory.

pub mod notification;
mod phonebook_service;

pub use notification::{Notification, NotificationKind, Notifier};
pub use phonebook_service::{
    Confirm, DeleteOutcome, FixedAnswer, PhonebookService, PhonebookServiceImpl,
    PhonebookState, PhonebookView, SubmitOutcome,
};

pub use crate::models::{Person, PersonDraft};
