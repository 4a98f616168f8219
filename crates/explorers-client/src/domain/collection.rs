//! Collection Entity
//!
//! A themed group of collectibles, served below `/collectibles/collections`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Mutable, Resource, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollectionType {
    #[default]
    Stamps,
    Landmarks,
    Coins,
    Badges,
    Cards,
    #[serde(other)]
    Other,
}

impl CollectionType {
    pub const ALL: [CollectionType; 6] = [
        CollectionType::Stamps,
        CollectionType::Landmarks,
        CollectionType::Coins,
        CollectionType::Badges,
        CollectionType::Cards,
        CollectionType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionType::Stamps => "Stamps",
            CollectionType::Landmarks => "Landmarks",
            CollectionType::Coins => "Coins",
            CollectionType::Badges => "Badges",
            CollectionType::Cards => "Cards",
            CollectionType::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .unwrap_or(CollectionType::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub collection_type: CollectionType,
    pub badge_image_url: Option<String>,
    pub box_image_url: Option<String>,
    pub background_image_url: Option<String>,
    pub collected_count: Option<u64>,
    pub total_in_collection_count: Option<u64>,
    pub total_collection_collector_points: Option<u64>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Collection {
    const KIND: ResourceKind = ResourceKind {
        name: "collection",
        plural: "collections",
        path: "collectibles/collections",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

impl Mutable for Collection {}
