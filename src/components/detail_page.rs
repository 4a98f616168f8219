//! Read-only record screens

use explorers_client::{ApiError, Collectible, Collection, Resource, Subscription};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::list_views::date;
use crate::context::use_app;
use crate::route::{Route, Section};

pub trait DetailView: Resource {
    const SECTION: Section;

    fn title(&self) -> String;

    /// `(label, value)` rows; blank values are skipped
    fn facts(&self) -> Vec<(&'static str, String)>;

    fn images(&self) -> Vec<String> {
        Vec::new()
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl DetailView for Collectible {
    const SECTION: Section = Section::Collectibles;

    fn title(&self) -> String {
        self.name.clone()
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Description", opt(&self.description)),
            ("Created", date(self.created_date.as_ref())),
            ("Last Modified", date(self.last_modified_date.as_ref())),
        ]
    }

    fn images(&self) -> Vec<String> {
        self.image_url.iter().cloned().collect()
    }
}

impl DetailView for Collection {
    const SECTION: Section = Section::Collections;

    fn title(&self) -> String {
        self.name.clone()
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        let count = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_default();
        vec![
            ("ID", self.id.clone()),
            ("Type", self.collection_type.as_str().to_string()),
            ("Description", opt(&self.description)),
            ("Collected", count(self.collected_count)),
            ("Total in Collection", count(self.total_in_collection_count)),
            ("Collector Points", count(self.total_collection_collector_points)),
            ("Created", date(self.created_date.as_ref())),
        ]
    }

    fn images(&self) -> Vec<String> {
        [&self.badge_image_url, &self.box_image_url, &self.background_image_url]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

impl DetailView for Subscription {
    const SECTION: Section = Section::Subscriptions;

    fn title(&self) -> String {
        self.name.clone()
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Price", self.price.map(|p| format!("{:.2}", p)).unwrap_or_default()),
            ("Status", opt(&self.status)),
            ("Start", date(self.start_date.as_ref())),
            ("End", date(self.end_date.as_ref())),
        ]
    }
}

pub fn detail_page<R: DetailView>(id: String) -> impl IntoView {
    let ctx = use_app();
    let record = RwSignal::new(None::<Result<R, String>>);

    let client = ctx.client().resource::<R>();
    let fetch_id = id.clone();
    spawn_local(async move {
        let result = client.get_by_id(&fetch_id).await;
        if let Err(err) = &result {
            log::warn!("loading {} {} failed: {}", R::KIND.name, fetch_id, err);
            if matches!(err, ApiError::Auth(_)) {
                ctx.logout();
                return;
            }
        }
        record.try_set(Some(result.map_err(|e| e.user_message())));
    });

    view! {
        <section class="detail-page">
            <header class="page-header">
                <button on:click=move |_| ctx.navigate(Route::List(R::SECTION))>
                    {format!("Back to {}", R::SECTION.label())}
                </button>
                {R::SECTION.editable().then(|| {
                    let id = id.clone();
                    view! {
                        <button on:click=move |_| ctx.navigate(Route::Edit(R::SECTION, id.clone()))>"Edit"</button>
                    }
                })}
            </header>
            {move || match record.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(Err(message)) => view! { <div class="alert error">{message}</div> }.into_any(),
                Some(Ok(item)) => view! {
                    <h1>{item.title()}</h1>
                    <div class="detail-images">
                        {item.images().into_iter().map(|src| view! { <img src=src alt="" /> }).collect_view()}
                    </div>
                    <dl class="detail-facts">
                        {item
                            .facts()
                            .into_iter()
                            .filter(|(_, value)| !value.is_empty())
                            .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                            .collect_view()}
                    </dl>
                }
                .into_any(),
            }}
        </section>
    }
}
