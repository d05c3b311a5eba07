//! Phonebook MCP Server - a Model Context Protocol front end for a REST-backed phonebook.
//!
//! The remote directory (`/api/persons`) is the source of truth. This crate keeps a
//! local view of it, validates phone numbers before anything is sent, and exposes
//! list/add/update/delete/filter as MCP tools.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects, including the phone number rules
//! - **models**: Person records and creation drafts
//! - **error**: Error types for the directory API and configuration
//! - **config**: Configuration from environment variables
//! - **client**: Blocking HTTP client for the directory plus an async wrapper
//! - **repositories**: Async repository trait over the directory
//! - **services**: Local phonebook state, reconciliation and notifications
//! - **locale**: User-facing message text
//! - **metrics**: Per-operation call, failure and latency counters
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod locale;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use client::PhonebookClient;
pub use config::Config;
pub use domain::{
    check_phone_number, is_valid_phone_number, PersonId, PhoneNumber, PhoneRejection,
    ValidationError,
};
pub use error::{ConfigError, PhonebookApiError};
pub use locale::{Locale, Messages};
pub use metrics::{Metrics, MetricsSummary, Operation, OperationStats, OperationTimer};
pub use models::{Person, PersonDraft};
pub use server::PhonebookMcpServer;
pub use services::{
    Confirm, DeleteOutcome, FixedAnswer, Notification, NotificationKind, PhonebookService,
    PhonebookServiceImpl, SubmitOutcome,
};
