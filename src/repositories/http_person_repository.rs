use crate::client::AsyncPhonebookClient;
use crate::domain::PersonId;
use crate::error::PhonebookApiResult;
use crate::models::{Person, PersonDraft};
use crate::repositories::traits::PersonRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Person repository backed by the directory's REST API.
///
/// Every operation delegates straight to the [`AsyncPhonebookClient`].
pub struct HttpPersonRepository {
    client: Arc<dyn AsyncPhonebookClient>,
}

impl HttpPersonRepository {
    /// Create a new HttpPersonRepository with the given client.
    pub fn new(client: Arc<dyn AsyncPhonebookClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PersonRepository for HttpPersonRepository {
    async fn list(&self) -> PhonebookApiResult<Vec<Person>> {
        self.client.list_all().await
    }

    async fn create(&self, draft: &PersonDraft) -> PhonebookApiResult<Person> {
        self.client.create(draft).await
    }

    async fn update(&self, id: &PersonId, person: &Person) -> PhonebookApiResult<Person> {
        self.client.update(id, person).await
    }

    async fn delete(&self, id: &PersonId) -> PhonebookApiResult<()> {
        self.client.remove(id).await
    }
}
