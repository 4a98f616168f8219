//! Collectible Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Mutable, Resource, ResourceKind};

/// An item explorers earn; carries an uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collectible {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Collectible {
    const KIND: ResourceKind = ResourceKind {
        name: "collectible",
        plural: "collectibles",
        path: "collectibles",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

impl Mutable for Collectible {}
