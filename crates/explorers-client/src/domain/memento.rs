//! Memento Entity
//!
//! A photo, video, audio clip or note captured by an explorer at a location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Mutable, Resource, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MementoType {
    #[default]
    Image,
    Video,
    Audio,
    Text,
}

impl MementoType {
    pub const ALL: [MementoType; 4] = [
        MementoType::Image,
        MementoType::Video,
        MementoType::Audio,
        MementoType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MementoType::Image => "Image",
            MementoType::Video => "Video",
            MementoType::Audio => "Audio",
            MementoType::Text => "Text",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memento {
    pub id: String,
    /// Kept as text so unrecognised types still list
    #[serde(rename = "type")]
    pub memento_type: Option<String>,
    pub location: Option<Location>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub is_royal_explorer_on_time_of_discovery: bool,
    pub capture_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_memento_locked: bool,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Memento {
    const KIND: ResourceKind = ResourceKind {
        name: "memento",
        plural: "mementos",
        path: "mementos",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

impl Mutable for Memento {}
