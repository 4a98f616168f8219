//! Error types for the admin client

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the resource client
///
/// Transport and HTTP failures are converted into one of these at the client
/// boundary; controllers never see raw status codes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Missing or rejected credentials, or an expired token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The id has no corresponding resource
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// Payload rejected by local or server validation
    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    /// 5xx from the API
    #[error("Server error ({status})")]
    Server { status: u16 },

    /// Non-2xx response to a list fetch
    #[error("{message}")]
    Fetch { status: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body could not be read
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Durable token storage rejected a write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            fields: FieldErrors::default(),
        }
    }

    /// Whether the view should send the user back to the login screen
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// Banner text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Auth(msg) => format!("{} Please sign in again.", msg.trim_end_matches('.')),
            ApiError::NotFound { kind, id } => format!("No {} found with ID {}.", kind, id),
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Server { status } => format!(
                "The server could not complete the request ({}). Please try again.",
                status
            ),
            ApiError::Fetch { message, .. } => message.clone(),
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Decode(_) => "The server sent a response that could not be read.".to_string(),
            ApiError::Storage(msg) => format!("Could not save the session: {}", msg),
        }
    }

    /// Per-field messages carried by a validation error
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Per-field validation messages keyed by wire field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message; the first message for a field wins
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn merge(&mut self, other: &FieldErrors) {
        for (field, message) in other.iter() {
            self.add(field, message);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
