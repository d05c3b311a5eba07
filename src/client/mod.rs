//! HTTP client for the phonebook directory API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client maps the four directory operations onto
//! requests against `{base}/api/persons` and turns failures into [`PhonebookApiError`].

mod async_wrapper;
pub use async_wrapper::{AsyncPhonebookClient, AsyncPhonebookClientImpl};

use crate::config::Config;
use crate::domain::PersonId;
use crate::error::{PhonebookApiError, PhonebookApiResult};
use crate::metrics::{Metrics, Operation, OperationTimer};
use crate::models::{Person, PersonDraft};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Resource path of the person collection, relative to the base URL.
pub const PERSONS_PATH: &str = "/api/persons";

/// Error payload returned by the directory on failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the phonebook directory.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct PhonebookClient {
    /// Root URL of the backend
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl PhonebookClient {
    /// Create a new PhonebookClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a PhonebookClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Path of a single person; the id is percent-encoded.
    fn person_path(id: &PersonId) -> String {
        format!("{}/{}", PERSONS_PATH, urlencoding::encode(id.as_str()))
    }

    /// Send one directory request, timing it under `operation`.
    ///
    /// A JSON `body` is sent for create and update; list and delete send none.
    fn send(
        &self,
        operation: Operation,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> PhonebookApiResult<ureq::Response> {
        let url = self.build_url(path);
        let method = operation.method();
        let timer = OperationTimer::start(operation, self.metrics.clone());

        let request = self
            .agent
            .request(method, &url)
            .set("Accept", "application/json");

        let result = match body {
            Some(body) => {
                tracing::debug!("{} {} body: {}", method, url, body);
                request
                    .set("Content-Type", "application/json")
                    .send_json(body)
            }
            None => request.call(),
        }
        .map_err(Self::map_error);

        timer.finish(&result);

        match &result {
            Ok(_) => tracing::debug!("{} {} - Success", method, url),
            Err(e) => tracing::warn!("{} {} - Error: {}", method, url, e),
        }
        result
    }

    /// Pull the human-readable `error` field out of a failure body, if any.
    fn extract_server_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
    }

    /// Map a ureq error to a PhonebookApiError.
    fn map_error(error: ureq::Error) -> PhonebookApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                let message = Self::extract_server_message(&body);
                if message.is_none() && !body.is_empty() {
                    tracing::debug!("Status {} with unstructured body: {}", code, body);
                }

                match code {
                    404 => PhonebookApiError::NotFound(message),
                    _ => PhonebookApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    PhonebookApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    PhonebookApiError::Timeout
                } else {
                    PhonebookApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Read a response body and parse it as JSON.
    fn parse_body<T: serde::de::DeserializeOwned>(response: ureq::Response) -> PhonebookApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| PhonebookApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(PhonebookApiError::JsonError)
    }

    // ========================= Person Operations =========================

    /// Fetch the full collection, in whatever order the directory returns it.
    pub fn list_all(&self) -> PhonebookApiResult<Vec<Person>> {
        let response = self.send(Operation::List, PERSONS_PATH, None)?;
        let persons: Vec<Person> = Self::parse_body(response)?;

        self.metrics.record_persons_fetched(persons.len());
        Ok(persons)
    }

    /// Create a person. The returned record carries the directory's new id.
    pub fn create(&self, draft: &PersonDraft) -> PhonebookApiResult<Person> {
        let body = serde_json::to_value(draft).map_err(PhonebookApiError::JsonError)?;
        let response = self.send(Operation::Create, PERSONS_PATH, Some(&body))?;
        let person: Person = Self::parse_body(response)?;

        tracing::info!("Person created with id: {}", person.id);
        Ok(person)
    }

    /// Replace the record stored under `id`.
    ///
    /// The directory is authoritative for what ends up stored; the returned
    /// record is what it answered with, not what was sent.
    pub fn update(&self, id: &PersonId, person: &Person) -> PhonebookApiResult<Person> {
        let body = serde_json::to_value(person).map_err(PhonebookApiError::JsonError)?;
        let response = self.send(Operation::Update, &Self::person_path(id), Some(&body))?;
        Self::parse_body(response)
    }

    /// Delete the record stored under `id`.
    pub fn remove(&self, id: &PersonId) -> PhonebookApiResult<()> {
        self.send(Operation::Delete, &Self::person_path(id), None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = PhonebookClient::with_base_url("http://localhost:3001".to_string());
        assert_eq!(
            client.build_url(PERSONS_PATH),
            "http://localhost:3001/api/persons"
        );

        let client_with_slash = PhonebookClient::with_base_url("http://localhost:3001/".to_string());
        assert_eq!(
            client_with_slash.build_url("api/persons"),
            "http://localhost:3001/api/persons"
        );
    }

    #[test]
    fn test_person_path_encodes_id() {
        let id = PersonId::new("a b/c").unwrap();
        assert_eq!(PhonebookClient::person_path(&id), "/api/persons/a%20b%2Fc");

        let id = PersonId::new("65a1f0c2").unwrap();
        assert_eq!(PhonebookClient::person_path(&id), "/api/persons/65a1f0c2");
    }

    #[test]
    fn test_extract_server_message() {
        assert_eq!(
            PhonebookClient::extract_server_message(r#"{"error": "name must be unique"}"#),
            Some("name must be unique".to_string())
        );
        assert_eq!(PhonebookClient::extract_server_message(r#"{"error": ""}"#), None);
        assert_eq!(PhonebookClient::extract_server_message(r#"{"message": "x"}"#), None);
        assert_eq!(PhonebookClient::extract_server_message("<html>502</html>"), None);
        assert_eq!(PhonebookClient::extract_server_message(""), None);
    }

    #[test]
    fn test_client_creation() {
        let config = Config {
            api_base_url: "https://phonebook.example.com".to_string(),
            request_timeout: 3,
            ..Config::default()
        };

        let client = PhonebookClient::new(&config);
        assert_eq!(client.base_url, "https://phonebook.example.com");
        assert_eq!(client.metrics().total_calls(), 0);
    }
}
