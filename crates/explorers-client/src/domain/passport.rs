//! Passport Entity
//!
//! An explorer's profile and travel statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Mutable, Resource, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: Option<String>,
    pub user_id: Option<String>,
    pub passport_number: Option<String>,
    pub country_of_origin: Option<String>,
    pub subscription_plan_id: Option<String>,
    pub coins: Option<i64>,
    pub countries_count: Option<u32>,
    pub municipalities_count: Option<u32>,
    pub kilometers_travelled: Option<f64>,
    pub last_visited_country: Option<String>,
    pub profile_picture_thumbnail_url: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Passport {
    const KIND: ResourceKind = ResourceKind {
        name: "passport",
        plural: "passports",
        path: "passports",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

impl Mutable for Passport {}
