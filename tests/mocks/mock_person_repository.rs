use async_trait::async_trait;
use phonebook_mcp_server::domain::PersonId;
use phonebook_mcp_server::error::{PhonebookApiError, PhonebookApiResult};
use phonebook_mcp_server::models::{Person, PersonDraft};
use phonebook_mcp_server::repositories::PersonRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock person repository for testing.
///
/// Keeps persons in insertion order like a real directory, assigns numeric
/// ids on create, counts calls per method, and can be primed to fail the
/// next call.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPersonRepository {
    persons: Arc<Mutex<Vec<Person>>>,
    next_id: Arc<Mutex<u64>>,
    next_error: Arc<Mutex<Option<PhonebookApiError>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockPersonRepository {
    /// Create a new empty MockPersonRepository.
    pub fn new() -> Self {
        Self {
            persons: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(100)),
            next_error: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a person directly, bypassing call tracking.
    pub fn add_person(&self, id: &str, name: &str, number: &str) -> Person {
        let person = Person::new(PersonId::new(id).unwrap(), name, number);
        self.persons.lock().unwrap().push(person.clone());
        person
    }

    /// Remove a person behind the client's back, as another user would.
    pub fn remove_directly(&self, id: &str) {
        self.persons
            .lock()
            .unwrap()
            .retain(|p| p.id.as_str() != id);
    }

    /// Make the next repository call fail with `error`.
    pub fn fail_next(&self, error: PhonebookApiError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Snapshot of what the "server" holds.
    pub fn stored(&self) -> Vec<Person> {
        self.persons.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn track_call(&self, method: &str) -> PhonebookApiResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.next_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for MockPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonRepository for MockPersonRepository {
    async fn list(&self) -> PhonebookApiResult<Vec<Person>> {
        self.track_call("list")?;
        Ok(self.stored())
    }

    async fn create(&self, draft: &PersonDraft) -> PhonebookApiResult<Person> {
        self.track_call("create")?;

        let mut next_id = self.next_id.lock().unwrap();
        let id = PersonId::new(next_id.to_string()).unwrap();
        *next_id += 1;

        let person = Person::new(id, draft.name.clone(), draft.number.clone());
        self.persons.lock().unwrap().push(person.clone());
        Ok(person)
    }

    async fn update(&self, id: &PersonId, person: &Person) -> PhonebookApiResult<Person> {
        self.track_call("update")?;

        let mut persons = self.persons.lock().unwrap();
        let slot = persons
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| {
                PhonebookApiError::NotFound(Some(format!("Person {} not found", id)))
            })?;

        *slot = Person::new(id.clone(), person.name.clone(), person.number.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &PersonId) -> PhonebookApiResult<()> {
        self.track_call("delete")?;

        let mut persons = self.persons.lock().unwrap();
        let before = persons.len();
        persons.retain(|p| &p.id != id);

        if persons.len() == before {
            return Err(PhonebookApiError::NotFound(None));
        }
        Ok(())
    }
}
