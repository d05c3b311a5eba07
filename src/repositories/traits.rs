use crate::domain::PersonId;
use crate::error::PhonebookApiResult;
use crate::models::{Person, PersonDraft};
use async_trait::async_trait;

/// Repository for phonebook entries.
///
/// Abstracts the remote directory so the phonebook state owner can run
/// against the HTTP client or an in-memory mock.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Retrieve the whole collection in directory order.
    async fn list(&self) -> PhonebookApiResult<Vec<Person>>;

    /// Create a new person; the result carries the assigned id.
    async fn create(&self, draft: &PersonDraft) -> PhonebookApiResult<Person>;

    /// Replace an existing person.
    async fn update(&self, id: &PersonId, person: &Person) -> PhonebookApiResult<Person>;

    /// Delete a person.
    async fn delete(&self, id: &PersonId) -> PhonebookApiResult<()>;
}
