//! Dashboard Screen

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app;
use crate::store::{store_set_stats, store_stats, use_app_store};

fn stat(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app();
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);

    let client = ctx.client();
    spawn_local(async move {
        match client.dashboard_stats().await {
            Ok(stats) => store_set_stats(&store, stats),
            Err(err) => {
                log::warn!("loading dashboard statistics failed: {}", err);
                ctx.handle_auth_error(&err);
                error.try_set(Some(err.user_message()));
            }
        }
    });

    let cards = move || {
        let stats = store_stats(&store).unwrap_or_default();
        [
            ("Total Sign-ups", stats.total_signups),
            ("Daily Active Users", stats.daily_active_users),
            ("Active Quests", stats.active_quests),
            ("Total Collectibles", stats.total_collectibles),
        ]
        .into_iter()
        .map(|(label, value)| view! {
            <div class="stat-card">
                <span class="stat-label">{label}</span>
                <span class="stat-value">{stat(value)}</span>
            </div>
        })
        .collect_view()
    };

    view! {
        <section class="dashboard">
            <h1>"Dashboard"</h1>
            {move || error.get().map(|message| view! { <div class="alert error">{message}</div> })}
            <div class="stat-grid">{cards}</div>
        </section>
    }
}
