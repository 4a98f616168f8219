//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use explorers_client::{Collectible, DashboardStats};
use leptos::prelude::*;
use reactive_stores::Store;

/// Data shared between screens
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Last loaded dashboard numbers
    pub stats: Option<DashboardStats>,
    /// Collectibles offered as quest rewards
    pub reward_options: Vec<Collectible>,
    /// One-shot success message shown above the next screen
    pub flash: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

pub fn store_set_flash(store: &AppStore, message: impl Into<String>) {
    *store.flash().write() = Some(message.into());
}

/// Take the flash message so it shows once
pub fn store_take_flash(store: &AppStore) -> Option<String> {
    store.flash().write().take()
}

/// Replace the reward list, keeping it sorted by name
pub fn store_set_rewards(store: &AppStore, mut collectibles: Vec<Collectible>) {
    collectibles.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    *store.reward_options().write() = collectibles;
}

pub fn store_rewards(store: &AppStore) -> Vec<Collectible> {
    store.reward_options().get()
}

pub fn store_has_rewards(store: &AppStore) -> bool {
    store.reward_options().with_untracked(|r| !r.is_empty())
}

pub fn store_stats(store: &AppStore) -> Option<DashboardStats> {
    store.stats().get()
}

pub fn store_set_stats(store: &AppStore, stats: DashboardStats) {
    *store.stats().write() = Some(stats);
}
