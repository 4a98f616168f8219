//! Edit Forms
//!
//! Each mutable resource has a form: the editable text the view binds to,
//! local validation, and conversion into a request payload.

mod attachment;
mod collectible;
mod collection;
mod login;
mod memento;
mod passport;
mod quest;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::domain::Mutable;
use crate::error::FieldErrors;
use crate::transport::{MultipartForm, RequestBody};

pub use attachment::Attachment;
pub use collectible::CollectibleForm;
pub use collection::CollectionForm;
pub use login::LoginForm;
pub use memento::MementoForm;
pub use passport::{PassportForm, PASSPORT_STATUSES};
pub use quest::QuestForm;

/// Body of a create or update
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartForm),
}

impl Payload {
    /// Value of a top-level field, as text
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            Payload::Json(value) => value.get(name).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            Payload::Multipart(form) => form.field(name).map(str::to_string),
        }
    }

    pub fn has_file(&self, field: &str) -> bool {
        matches!(self, Payload::Multipart(form) if form.file_part(field).is_some())
    }

    pub fn into_body(self) -> RequestBody {
        match self {
            Payload::Json(value) => RequestBody::Json(value),
            Payload::Multipart(form) => RequestBody::Multipart(form),
        }
    }
}

/// Editable state of one resource
pub trait EditForm: Clone + Default + Send + Sync + 'static {
    type Resource: Mutable;

    /// Prefill from a loaded record
    fn from_resource(resource: &Self::Resource) -> Self;

    /// Empty when the form may be submitted
    fn validate(&self, config: &ClientConfig) -> FieldErrors;

    /// `id` is present when editing and absent when creating
    fn to_payload(&self, id: Option<&str>) -> Payload;
}

/// Builds a JSON object
///
/// Blank text is left out of creates. Updates send it as `null` so the server
/// clears the stored value instead of keeping it.
#[derive(Debug, Default)]
pub(crate) struct JsonPayload {
    fields: Map<String, Value>,
    update: bool,
}

impl JsonPayload {
    pub(crate) fn new(id: Option<&str>) -> Self {
        let mut fields = Map::new();
        if let Some(id) = id {
            fields.insert("id".into(), Value::String(id.to_string()));
        }
        Self {
            fields,
            update: id.is_some(),
        }
    }

    pub(crate) fn text(self, name: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return self.cleared(name);
        }
        self.value(name, value)
    }

    /// Mark a field as emptied; only updates carry it
    pub(crate) fn cleared(mut self, name: &str) -> Self {
        if self.update {
            self.fields.insert(name.into(), Value::Null);
        }
        self
    }

    pub(crate) fn value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub(crate) fn finish(self) -> Payload {
        Payload::Json(Value::Object(self.fields))
    }
}

/// Parse a date from a `datetime-local` input or an RFC 3339 string
///
/// Inputs without an offset are taken as UTC.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Value for a `datetime-local` input
pub fn datetime_input(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

pub(crate) fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.to_ascii_lowercase().starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_inputs_round_trip_through_the_picker_format() {
        let parsed = parse_datetime("2024-03-01T09:30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T09:30:00+00:00");
        assert_eq!(datetime_input(Some(&parsed)), "2024-03-01T09:30");
        assert!(parse_datetime("2024-03-01T09:30:00+02:00").is_some());
        assert!(parse_datetime("2024-03-01").is_some());
        assert!(parse_datetime("next tuesday").is_none());
        assert!(parse_datetime("  ").is_none());
    }

    #[test]
    fn only_absolute_http_urls_pass() {
        assert!(is_http_url("https://cdn.example.com/a.png"));
        assert!(is_http_url("HTTP://example.com"));
        assert!(!is_http_url("ftp://example.com/a.png"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("/relative.png"));
    }
}
