//! Subscription Entity
//!
//! Read-only here: `Subscription` deliberately does not implement `Mutable`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Resource, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Subscription {
    const KIND: ResourceKind = ResourceKind {
        name: "subscription",
        plural: "subscriptions",
        path: "subscriptions",
    };

    fn id(&self) -> &str {
        &self.id
    }
}
