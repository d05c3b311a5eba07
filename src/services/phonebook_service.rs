//! Phonebook service layer.
//!
//! Owns the local view of the directory (person list, filter text, current
//! notification) and keeps it reconciled with the remote store after every
//! mutating call.

use crate::domain::{check_phone_number, PersonId, ValidationError};
use crate::error::{PhonebookApiError, PhonebookApiResult};
use crate::locale::Messages;
use crate::models::{Person, PersonDraft};
use crate::repositories::PersonRepository;
use crate::services::notification::{Notification, Notifier};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Answers yes/no prompts on behalf of the user.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A prompt answer decided before the prompt is shown.
///
/// Used where the caller states its intent up front, e.g. a tool parameter.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Result of submitting the add form.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A new person was stored and appended to the list.
    Created(Person),
    /// An existing person with the same name had their record replaced.
    Updated(Person),
    /// The user declined to replace an existing entry.
    Declined { prompt: String },
    /// Input was refused locally; nothing was sent.
    Rejected(ValidationError),
    /// The directory refused or could not be reached; the list is unchanged.
    Failed(PhonebookApiError),
}

/// Result of deleting a person.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted(Person),
    /// The directory call failed; the entry was dropped locally anyway.
    AlreadyRemoved(Person),
    Declined { prompt: String },
    /// No entry with that id in the local list.
    NotFound,
}

/// Local copy of the directory plus the filter applied to it.
#[derive(Debug, Clone, Default)]
pub struct PhonebookState {
    persons: Vec<Person>,
    filter: String,
}

impl PhonebookState {
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Persons whose name matches the current filter, in list order.
    pub fn visible(&self) -> Vec<Person> {
        self.persons
            .iter()
            .filter(|p| p.matches_filter(&self.filter))
            .cloned()
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.name == name)
    }

    pub fn find_by_id(&self, id: &PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| &p.id == id)
    }

    pub fn replace_all(&mut self, persons: Vec<Person>) {
        self.persons = persons;
    }

    pub fn append(&mut self, person: Person) {
        self.persons.push(person);
    }

    /// Swap in `person` where its id sits. Returns false if the id is absent.
    pub fn replace(&mut self, person: Person) -> bool {
        match self.persons.iter_mut().find(|p| p.id == person.id) {
            Some(slot) => {
                *slot = person;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &PersonId) -> Option<Person> {
        let index = self.persons.iter().position(|p| &p.id == id)?;
        Some(self.persons.remove(index))
    }
}

/// What a renderer needs to draw the phonebook.
#[derive(Debug, Clone, Serialize)]
pub struct PhonebookView {
    pub filter: String,
    pub total: usize,
    pub persons: Vec<Person>,
    pub notification: Option<Notification>,
}

/// Phonebook operations driven by the UI layer.
#[async_trait]
pub trait PhonebookService: Send + Sync {
    /// Fetch the directory and replace the local list. Returns the count.
    async fn load(&self) -> PhonebookApiResult<usize>;

    /// Add a person, or replace the number of an existing one with the same name.
    async fn submit(&self, name: &str, number: &str, confirm: &dyn Confirm) -> SubmitOutcome;

    /// Delete a person by id.
    async fn delete(&self, id: &PersonId, confirm: &dyn Confirm) -> DeleteOutcome;

    async fn set_filter(&self, filter: &str);

    /// Full local list, unfiltered.
    async fn persons(&self) -> Vec<Person>;

    async fn view(&self) -> PhonebookView;

    fn notification(&self) -> Option<Notification>;
}

/// Default implementation of PhonebookService.
pub struct PhonebookServiceImpl {
    repo: Arc<dyn PersonRepository>,
    state: RwLock<PhonebookState>,
    notifier: Notifier,
    messages: Messages,
}

impl PhonebookServiceImpl {
    /// Create a new phonebook service.
    pub fn new(
        repo: Arc<dyn PersonRepository>,
        messages: Messages,
        notification_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            state: RwLock::new(PhonebookState::default()),
            notifier: Notifier::new(notification_timeout),
            messages,
        }
    }

    /// Validate form input before anything goes over the network.
    fn validate_input(&self, name: &str, number: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        check_phone_number(number).map_err(|reason| ValidationError::InvalidPhone {
            number: number.to_string(),
            reason,
        })
    }

    fn rejection_message(&self, error: &ValidationError) -> String {
        match error {
            ValidationError::EmptyName => self.messages.empty_name(),
            _ => self.messages.invalid_number(),
        }
    }

    async fn replace_existing(&self, existing: Person, draft: PersonDraft) -> SubmitOutcome {
        let replacement = existing.replaced_with(&draft);

        match self.repo.update(&existing.id, &replacement).await {
            Ok(updated) => {
                let mut state = self.state.write().await;
                if !state.replace(updated.clone()) {
                    tracing::warn!(
                        "Updated person {} is no longer in the local list",
                        updated.id
                    );
                }
                drop(state);

                tracing::info!("Updated number for person {}", updated.id);
                self.notifier
                    .success(self.messages.number_updated(&updated.name));
                SubmitOutcome::Updated(updated)
            }
            Err(e) => {
                tracing::error!("Failed to update person {}: {}", existing.id, e);
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.messages.update_failed());
                self.notifier.error(message);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn create_new(&self, draft: PersonDraft) -> SubmitOutcome {
        match self.repo.create(&draft).await {
            Ok(created) => {
                self.state.write().await.append(created.clone());

                tracing::info!("Added person {}", created.id);
                self.notifier.success(self.messages.added(&created.name));
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                tracing::error!("Failed to add person: {}", e);
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.messages.add_failed());
                self.notifier.error(message);
                SubmitOutcome::Failed(e)
            }
        }
    }
}

#[async_trait]
impl PhonebookService for PhonebookServiceImpl {
    async fn load(&self) -> PhonebookApiResult<usize> {
        match self.repo.list().await {
            Ok(persons) => {
                let count = persons.len();
                self.state.write().await.replace_all(persons);
                tracing::info!("Loaded {} persons", count);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load persons: {}", e);
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.messages.load_failed());
                self.notifier.error(message);
                Err(e)
            }
        }
    }

    async fn submit(&self, name: &str, number: &str, confirm: &dyn Confirm) -> SubmitOutcome {
        if let Err(e) = self.validate_input(name, number) {
            tracing::debug!("Rejected input: {}", e);
            self.notifier.error(self.rejection_message(&e));
            return SubmitOutcome::Rejected(e);
        }

        let draft = PersonDraft::new(name, number);
        let existing = self.state.read().await.find_by_name(name).cloned();

        match existing {
            Some(existing) => {
                let prompt = self.messages.confirm_replace(name);
                if !confirm.confirm(&prompt) {
                    tracing::debug!("Replacement of {} declined", existing.id);
                    return SubmitOutcome::Declined { prompt };
                }
                self.replace_existing(existing, draft).await
            }
            None => self.create_new(draft).await,
        }
    }

    async fn delete(&self, id: &PersonId, confirm: &dyn Confirm) -> DeleteOutcome {
        let person = match self.state.read().await.find_by_id(id).cloned() {
            Some(person) => person,
            None => return DeleteOutcome::NotFound,
        };

        let prompt = self.messages.confirm_delete(&person.name);
        if !confirm.confirm(&prompt) {
            return DeleteOutcome::Declined { prompt };
        }

        let result = self.repo.delete(id).await;

        // The entry leaves the local list whether or not the directory agreed
        self.state.write().await.remove(id);

        match result {
            Ok(()) => {
                tracing::info!("Deleted person {}", id);
                self.notifier.success(self.messages.deleted(&person.name));
                DeleteOutcome::Deleted(person)
            }
            Err(e) => {
                tracing::warn!("Delete of person {} failed, treating as gone: {}", id, e);
                self.notifier
                    .error(self.messages.already_deleted(&person.name));
                DeleteOutcome::AlreadyRemoved(person)
            }
        }
    }

    async fn set_filter(&self, filter: &str) {
        self.state.write().await.set_filter(filter);
    }

    async fn persons(&self) -> Vec<Person> {
        self.state.read().await.persons().to_vec()
    }

    async fn view(&self) -> PhonebookView {
        let state = self.state.read().await;
        PhonebookView {
            filter: state.filter().to_string(),
            total: state.persons().len(),
            persons: state.visible(),
            notification: self.notifier.current(),
        }
    }

    fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }
}
