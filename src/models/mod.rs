//! Data models for phonebook entries.
//!
//! A [`Person`] is a record as the directory stores it; a [`PersonDraft`] is
//! the payload sent to create one before the directory has assigned an id.

pub mod person;

pub use person::{Person, PersonDraft};
