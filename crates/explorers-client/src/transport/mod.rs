//! Transport Layer
//!
//! Defines the abstract HTTP interface the resource client talks through.
//! Implementations: `ReqwestTransport` for a real API, `InMemoryApi` for the
//! demo backend and tests.

mod memory;
mod reqwest_transport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

pub use memory::{InMemoryApi, RecordedRequest};
pub use reqwest_transport::ReqwestTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A binary file attached to a multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Text fields plus file parts, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn file_part(&self, field: &str) -> Option<&FilePart> {
        self.files.iter().find(|f| f.field == field)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// One API call, relative to the configured API root
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API prefix, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Bearer token, read from the session at call time
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn with_query(mut self, params: Vec<(&'static str, String)>) -> Self {
        self.query = params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        self
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn query_string(&self) -> String {
        crate::query::encode_query(&self.query)
    }
}

/// Raw status and body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            body: value.to_string().into_bytes(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_slice(&self.body).map_err(ApiError::from)
    }

    /// `message` field of a JSON error body, if any
    pub fn error_message(&self) -> Option<String> {
        let value: Value = serde_json::from_slice(&self.body).ok()?;
        value
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }
}

/// Sends API requests
///
/// Browser futures are not `Send`, so the trait drops that bound on wasm.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HttpTransport: Send + Sync {
    /// Returns `Err` only when no response was received
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_ignores_blank_and_non_json_bodies() {
        assert_eq!(
            ApiResponse::json(400, &json!({"message": "Name taken"})).error_message(),
            Some("Name taken".to_string())
        );
        assert_eq!(ApiResponse::json(400, &json!({"message": " "})).error_message(), None);
        assert_eq!(ApiResponse::new(500, b"<html>".to_vec()).error_message(), None);
    }

    #[test]
    fn multipart_lookup_by_name() {
        let form = MultipartForm::new().text("name", "Coin").file(FilePart {
            field: "image".into(),
            file_name: "coin.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        });
        assert_eq!(form.field("name"), Some("Coin"));
        assert!(form.file_part("image").is_some());
        assert!(form.file_part("icon").is_none());
    }
}
