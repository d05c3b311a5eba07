//! MCP tool handlers for the phonebook server.
//!
//! This module implements the phonebook tools using the rmcp SDK's tool_router pattern.
//! Each tool call maps to one user action on the phonebook screen.

use crate::domain::{PersonId, PhoneNumber};
use crate::locale::Messages;
use crate::repositories::PersonRepository;
use crate::services::{
    DeleteOutcome, FixedAnswer, Notification, PhonebookService, PhonebookServiceImpl,
    SubmitOutcome,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

/// The MCP server that exposes the phonebook to AI assistants.
#[derive(Clone)]
pub struct PhonebookMcpServer {
    phonebook: Arc<dyn PhonebookService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for PhonebookMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "phonebook-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for a phonebook - list, filter, add, update and delete name/number entries stored in a remote directory.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListPersonsParams {
    /// Case-insensitive name filter; replaces the current one when given
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddPersonParams {
    pub name: String,
    pub number: String,
    /// Answer to "replace the old number?" when the name already exists
    #[serde(default)]
    pub replace_existing: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeletePersonParams {
    pub id: String,
    /// Answer to "delete this person?"
    #[serde(default)]
    pub confirm: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ValidateNumberParams {
    pub number: String,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn notification_json(notification: Option<Notification>) -> serde_json::Value {
    serde_json::to_value(notification).unwrap_or(serde_json::Value::Null)
}

/// JSON payload for a submit outcome, and whether it counts as a failure.
fn submit_payload(
    outcome: &SubmitOutcome,
    notification: Option<Notification>,
) -> (bool, serde_json::Value) {
    let notification = notification_json(notification);
    match outcome {
        SubmitOutcome::Created(person) => (
            false,
            json!({ "status": "created", "person": person, "notification": notification }),
        ),
        SubmitOutcome::Updated(person) => (
            false,
            json!({ "status": "updated", "person": person, "notification": notification }),
        ),
        SubmitOutcome::Declined { prompt } => (
            false,
            json!({
                "status": "needs_confirmation",
                "prompt": prompt,
                "hint": "Call add_person again with replace_existing set to true to replace the number.",
            }),
        ),
        SubmitOutcome::Rejected(reason) => (
            true,
            json!({ "status": "rejected", "reason": reason.to_string(), "notification": notification }),
        ),
        SubmitOutcome::Failed(error) => (
            true,
            json!({
                "status": "failed",
                "error": error.to_string(),
                "server_message": error.server_message(),
                "notification": notification,
            }),
        ),
    }
}

/// JSON payload for a delete outcome, and whether it counts as a failure.
fn delete_payload(
    outcome: &DeleteOutcome,
    id: &str,
    notification: Option<Notification>,
) -> (bool, serde_json::Value) {
    let notification = notification_json(notification);
    match outcome {
        DeleteOutcome::Deleted(person) => (
            false,
            json!({ "status": "deleted", "person": person, "notification": notification }),
        ),
        DeleteOutcome::AlreadyRemoved(person) => (
            false,
            json!({ "status": "already_removed", "person": person, "notification": notification }),
        ),
        DeleteOutcome::Declined { prompt } => (
            false,
            json!({
                "status": "needs_confirmation",
                "prompt": prompt,
                "hint": "Call delete_person again with confirm set to true to delete.",
            }),
        ),
        DeleteOutcome::NotFound => (
            true,
            json!({ "status": "not_found", "id": id }),
        ),
    }
}

fn into_tool_result(
    (is_error, payload): (bool, serde_json::Value),
) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(&payload).map_err(to_mcp_error)?;
    if is_error {
        Ok(CallToolResult::error(vec![Content::text(text)]))
    } else {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_router]
impl PhonebookMcpServer {
    /// Create a new phonebook MCP server over the given repository.
    pub fn new(
        person_repo: Arc<dyn PersonRepository>,
        messages: Messages,
        notification_timeout: Duration,
    ) -> Self {
        let phonebook = Arc::new(PhonebookServiceImpl::new(
            person_repo,
            messages,
            notification_timeout,
        )) as Arc<dyn PhonebookService>;

        Self::with_service(phonebook)
    }

    /// Create a server around an already constructed service.
    pub fn with_service(phonebook: Arc<dyn PhonebookService>) -> Self {
        Self {
            phonebook,
            tool_router: Self::tool_router(),
        }
    }

    /// The phonebook state owner behind the tools.
    pub fn phonebook(&self) -> &Arc<dyn PhonebookService> {
        &self.phonebook
    }

    /// Show the phonebook, optionally changing the name filter.
    #[tool(
        description = "List phonebook entries. Optionally set a case-insensitive name filter (an empty string clears it). Returns the visible entries, the active filter and the current notification."
    )]
    pub async fn list_persons(
        &self,
        params: Parameters<ListPersonsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        if let Some(filter) = params.filter.as_deref() {
            self.phonebook.set_filter(filter).await;
        }

        let view = self.phonebook.view().await;
        let json_response = serde_json::to_string_pretty(&view).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Reload the phonebook from the remote directory.
    #[tool(description = "Reload all phonebook entries from the remote directory")]
    pub async fn refresh_persons(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: refresh_persons called");

        match self.phonebook.load().await {
            Ok(count) => into_tool_result((false, json!({ "status": "loaded", "count": count }))),
            Err(e) => into_tool_result((
                true,
                json!({
                    "status": "failed",
                    "error": e.to_string(),
                    "notification": notification_json(self.phonebook.notification()),
                }),
            )),
        }
    }

    /// Add a person, or replace the number of an existing entry with the same name.
    #[tool(
        description = "Add a person to the phonebook. Numbers look like 09-1234556 or 040-22334455 (2-3 digit area code, dash, at least 5 digits). If the name already exists the old number is replaced only when replace_existing is true."
    )]
    pub async fn add_person(
        &self,
        params: Parameters<AddPersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: add_person called");
        tracing::debug!(
            "Parameters: name={}, number={}, replace_existing={:?}",
            params.name,
            params.number,
            params.replace_existing
        );

        let answer = FixedAnswer(params.replace_existing.unwrap_or(false));
        let outcome = self
            .phonebook
            .submit(&params.name, &params.number, &answer)
            .await;

        into_tool_result(submit_payload(&outcome, self.phonebook.notification()))
    }

    /// Delete a person by id.
    #[tool(
        description = "Delete a phonebook entry by id. Nothing is deleted unless confirm is true. An entry the directory no longer has is dropped from the list as already removed."
    )]
    pub async fn delete_person(
        &self,
        params: Parameters<DeletePersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: delete_person called for id={}", params.id);

        let id = PersonId::new(params.id.clone()).map_err(invalid_params)?;
        let answer = FixedAnswer(params.confirm.unwrap_or(false));
        let outcome = self.phonebook.delete(&id, &answer).await;

        into_tool_result(delete_payload(
            &outcome,
            &params.id,
            self.phonebook.notification(),
        ))
    }

    /// Check a phone number against the format rules without saving anything.
    #[tool(description = "Check whether a phone number is acceptable without saving anything")]
    pub async fn validate_number(
        &self,
        params: Parameters<ValidateNumberParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let payload = match PhoneNumber::new(params.number.clone()) {
            Ok(phone) => json!({
                "number": phone.as_str(),
                "valid": true,
                "area_code": phone.area_code(),
            }),
            Err(_) => json!({ "number": params.number, "valid": false }),
        };

        let json_response = serde_json::to_string_pretty(&payload).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }
}
