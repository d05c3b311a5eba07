//! Person model representing one phonebook entry.

use crate::domain::PersonId;
use serde::{Deserialize, Serialize};

/// A phonebook entry as stored by the remote directory.
///
/// Identity is the `id`. The `name` is only a lookup key for duplicate
/// detection; the directory is free to hold two entries with the same name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Identifier assigned by the directory
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Phone number, as the directory returned it
    pub number: String,
}

impl Person {
    /// Create a new Person.
    pub fn new(id: PersonId, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            number: number.into(),
        }
    }

    /// A copy of this record carrying the fields of `draft`, identity kept.
    pub fn replaced_with(&self, draft: &PersonDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.clone(),
            number: draft.number.clone(),
        }
    }

    /// Case-insensitive substring match on the name. An empty filter matches.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim();
        filter.is_empty() || self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Request payload for creating a person; carries no id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub number: String,
}

impl PersonDraft {
    /// Create a new draft.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}
