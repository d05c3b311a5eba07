//! PersonId value object.

use super::errors::ValidationError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier assigned to a person by the remote directory.
///
/// The directory decides the format, so the value is treated as opaque text.
/// Some stores hand out integer ids; those are accepted on the wire and kept
/// in their decimal string form.
///
/// # Example
///
/// ```
/// use phonebook_mcp_server::domain::PersonId;
///
/// let id = PersonId::new("65a1f0c2e4b0").unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2e4b0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonId(String);

impl PersonId {
    /// Create a new PersonId, validating that it's not empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the provided ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for PersonId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

struct PersonIdVisitor;

impl<'de> Visitor<'de> for PersonIdVisitor {
    type Value = PersonId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-empty string or an integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PersonId, E> {
        PersonId::new(v).map_err(E::custom)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<PersonId, E> {
        PersonId::new(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PersonId, E> {
        Ok(PersonId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PersonId, E> {
        Ok(PersonId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PersonIdVisitor)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
