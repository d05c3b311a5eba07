//! Async wrapper around synchronous PhonebookClient.
//!
//! This module provides an async interface to the synchronous PhonebookClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::PhonebookClient;
use crate::domain::PersonId;
use crate::error::{PhonebookApiError, PhonebookApiResult};
use crate::models::{Person, PersonDraft};
use async_trait::async_trait;
use std::sync::Arc;

/// Async version of the directory operations.
#[async_trait]
pub trait AsyncPhonebookClient: Send + Sync {
    async fn list_all(&self) -> PhonebookApiResult<Vec<Person>>;
    async fn create(&self, draft: &PersonDraft) -> PhonebookApiResult<Person>;
    async fn update(&self, id: &PersonId, person: &Person) -> PhonebookApiResult<Person>;
    async fn remove(&self, id: &PersonId) -> PhonebookApiResult<()>;
}

/// Async wrapper around synchronous PhonebookClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncPhonebookClientImpl {
    client: Arc<PhonebookClient>,
}

impl AsyncPhonebookClientImpl {
    pub fn new(client: PhonebookClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped blocking client.
    pub fn inner(&self) -> &PhonebookClient {
        &self.client
    }
}

fn join_error(e: tokio::task::JoinError) -> PhonebookApiError {
    PhonebookApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncPhonebookClient for AsyncPhonebookClientImpl {
    async fn list_all(&self) -> PhonebookApiResult<Vec<Person>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_all())
            .await
            .map_err(join_error)?
    }

    async fn create(&self, draft: &PersonDraft) -> PhonebookApiResult<Person> {
        let client = self.client.clone();
        let draft = draft.clone();

        tokio::task::spawn_blocking(move || client.create(&draft))
            .await
            .map_err(join_error)?
    }

    async fn update(&self, id: &PersonId, person: &Person) -> PhonebookApiResult<Person> {
        let client = self.client.clone();
        let id = id.clone();
        let person = person.clone();

        tokio::task::spawn_blocking(move || client.update(&id, &person))
            .await
            .map_err(join_error)?
    }

    async fn remove(&self, id: &PersonId) -> PhonebookApiResult<()> {
        let client = self.client.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || client.remove(&id))
            .await
            .map_err(join_error)?
    }
}
