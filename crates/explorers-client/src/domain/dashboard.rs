//! Dashboard Statistics

use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard; any may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_signups: Option<u64>,
    pub daily_active_users: Option<u64>,
    pub active_quests: Option<u64>,
    pub total_collectibles: Option<u64>,
}
