//! Quest Entity
//!
//! A time-boxed challenge that rewards a collectible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{Mutable, Resource, ResourceKind};

/// Publication status of a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Active,
    #[default]
    Inactive,
    Draft,
    Expired,
    #[serde(other)]
    Unknown,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::Active => "active",
            QuestStatus::Inactive => "inactive",
            QuestStatus::Draft => "draft",
            QuestStatus::Expired => "expired",
            QuestStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestStatus::Active => "Active",
            QuestStatus::Inactive => "Inactive",
            QuestStatus::Draft => "Draft",
            QuestStatus::Expired => "Expired",
            QuestStatus::Unknown => "Unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "active" => QuestStatus::Active,
            "inactive" => QuestStatus::Inactive,
            "draft" => QuestStatus::Draft,
            "expired" => QuestStatus::Expired,
            _ => QuestStatus::Unknown,
        }
    }

    /// Status the toggle switches to: active quests deactivate, anything else activates
    pub fn toggled(&self) -> Self {
        match self {
            QuestStatus::Active => QuestStatus::Inactive,
            _ => QuestStatus::Active,
        }
    }
}

/// Quest difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Medium" => Difficulty::Medium,
            "Hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: QuestStatus,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub reward_collectible_id: Option<String>,
    /// Set by the server after an icon upload
    pub icon_url: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Quest {
    const KIND: ResourceKind = ResourceKind {
        name: "quest",
        plural: "quests",
        path: "quests",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

impl Mutable for Quest {}
