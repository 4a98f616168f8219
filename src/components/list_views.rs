//! Table layouts for each resource

use chrono::{DateTime, Utc};
use explorers_client::{
    ApiClient, ApiResult, Collectible, Collection, Memento, Passport, Quest, QuestStatus,
    RemoveOutcome, Subscription,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::list_page::{remove_record, ListHandle, ListView, LocalFuture};
use crate::route::Section;

pub fn date(value: Option<&DateTime<Utc>>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn number<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

impl ListView for Collectible {
    const SECTION: Section = Section::Collectibles;
    const HEADERS: &'static [&'static str] = &["Name", "ID"];
    const SORTS: &'static [(&'static str, &'static str)] = &[("name", "Name")];
    const DELETABLE: bool = true;
    const IMAGE_COLUMN: Option<&'static str> = Some("Image");

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.id.clone()]
    }

    fn thumbnail(&self) -> Option<String> {
        self.image_url.clone()
    }

    fn remove(client: ApiClient, id: String) -> LocalFuture<ApiResult<RemoveOutcome>> {
        remove_record::<Self>(client, id)
    }
}

impl ListView for Collection {
    const SECTION: Section = Section::Collections;
    const HEADERS: &'static [&'static str] =
        &["Name", "Description", "Type", "Collected", "Total", "Points"];
    const FILTERS: &'static [(&'static str, &'static str)] = &[
        ("Stamps", "Stamps"),
        ("Landmarks", "Landmarks"),
        ("Coins", "Coins"),
        ("Badges", "Badges"),
        ("Cards", "Cards"),
        ("Other", "Other"),
    ];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("name", "Name"),
        ("collectionType", "Type"),
        ("collectedCount", "Collected"),
        ("totalInCollectionCount", "Total"),
    ];
    const DELETABLE: bool = true;

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.description.as_ref()),
            self.collection_type.as_str().to_string(),
            number(self.collected_count),
            number(self.total_in_collection_count),
            number(self.total_collection_collector_points),
        ]
    }

    fn remove(client: ApiClient, id: String) -> LocalFuture<ApiResult<RemoveOutcome>> {
        remove_record::<Self>(client, id)
    }
}

impl ListView for Memento {
    const SECTION: Section = Section::Mementos;
    const HEADERS: &'static [&'static str] =
        &["Type", "Location", "Royal Explorer", "Capture Date", "Locked"];
    const FILTERS: &'static [(&'static str, &'static str)] = &[
        ("Image", "Image"),
        ("Video", "Video"),
        ("Audio", "Audio"),
        ("Text", "Text"),
    ];
    const SORTS: &'static [(&'static str, &'static str)] =
        &[("captureDate", "Capture Date"), ("type", "Type")];
    const DELETABLE: bool = true;
    const IMAGE_COLUMN: Option<&'static str> = Some("Thumbnail");

    fn cells(&self) -> Vec<String> {
        vec![
            text(self.memento_type.as_ref()),
            self.location
                .map(|l| format!("{:.4}, {:.4}", l.x, l.y))
                .unwrap_or_default(),
            yes_no(self.is_royal_explorer_on_time_of_discovery),
            date(self.capture_date.as_ref()),
            yes_no(self.is_memento_locked),
        ]
    }

    fn thumbnail(&self) -> Option<String> {
        self.thumbnail_url.clone().or_else(|| self.url.clone())
    }

    fn remove(client: ApiClient, id: String) -> LocalFuture<ApiResult<RemoveOutcome>> {
        remove_record::<Self>(client, id)
    }
}

impl ListView for Passport {
    const SECTION: Section = Section::Passports;
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Passport Number",
        "Country",
        "Plan",
        "Coins",
        "Countries",
        "Municipalities",
        "Distance (km)",
        "Last Country",
        "Created",
    ];
    const FILTERS: &'static [(&'static str, &'static str)] =
        &[("active", "Active"), ("inactive", "Inactive")];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("name", "Name"),
        ("coins", "Coins"),
        ("countriesCount", "Countries"),
        ("createdDate", "Created"),
    ];
    const DELETABLE: bool = true;
    const IMAGE_COLUMN: Option<&'static str> = Some("Profile");

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(self.passport_number.as_ref()),
            text(self.country_of_origin.as_ref()),
            text(self.subscription_plan_id.as_ref()),
            number(self.coins),
            number(self.countries_count),
            number(self.municipalities_count),
            self.kilometers_travelled
                .map(|km| format!("{:.1}", km))
                .unwrap_or_default(),
            text(self.last_visited_country.as_ref()),
            date(self.created_date.as_ref()),
        ]
    }

    fn thumbnail(&self) -> Option<String> {
        self.profile_picture_thumbnail_url.clone()
    }

    fn remove(client: ApiClient, id: String) -> LocalFuture<ApiResult<RemoveOutcome>> {
        remove_record::<Self>(client, id)
    }
}

impl ListView for Quest {
    const SECTION: Section = Section::Quests;
    const HEADERS: &'static [&'static str] =
        &["Title", "Status", "Difficulty", "Start Date", "End Date"];
    const FILTERS: &'static [(&'static str, &'static str)] = &[
        ("active", "Active"),
        ("inactive", "Inactive"),
        ("draft", "Draft"),
        ("expired", "Expired"),
    ];
    const SORTS: &'static [(&'static str, &'static str)] = &[
        ("title", "Title"),
        ("startDate", "Start Date"),
        ("endDate", "End Date"),
    ];
    const DELETABLE: bool = true;

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.status.label().to_string(),
            self.difficulty.as_str().to_string(),
            date(self.start_date.as_ref()),
            date(self.end_date.as_ref()),
        ]
    }

    fn remove(client: ApiClient, id: String) -> LocalFuture<ApiResult<RemoveOutcome>> {
        remove_record::<Self>(client, id)
    }

    fn row_action(list: ListHandle<Self>, row: &Self) -> Option<AnyView> {
        let label = match row.status {
            QuestStatus::Active => "Deactivate",
            _ => "Activate",
        };
        let id = row.id.clone();
        let busy_id = id.clone();
        Some(
            view! {
                <button
                    class="toggle-btn"
                    disabled=move || list.ctrl.with(|c| c.is_busy(&busy_id))
                    on:click=move |_| list.toggle(id.clone())
                >
                    {label}
                </button>
            }
            .into_any(),
        )
    }
}

impl ListHandle<Quest> {
    /// Flip a quest's status now and confirm it with the API
    pub fn toggle(self, id: String) {
        let (pending, next) = match self.ctrl.try_update(|c| c.begin_toggle(&id)) {
            None => return,
            Some(Ok(started)) => started,
            Some(Err(err)) => {
                self.ctrl.update(|c| c.set_banner(err.user_message()));
                return;
            }
        };
        let client = self.ctx.client().quests();
        spawn_local(async move {
            let result = client.set_status(&id, next).await;
            let auth_failed = matches!(&result, Err(e) if e.requires_login());
            self.ctrl.try_update(|c| c.finish_mutation(pending, result));
            if auth_failed {
                self.ctx.logout();
            }
        });
    }
}

impl ListView for Subscription {
    const SECTION: Section = Section::Subscriptions;
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Price", "Start", "End"];
    const SORTS: &'static [(&'static str, &'static str)] =
        &[("name", "Name"), ("price", "Price"), ("startDate", "Start")];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
            date(self.start_date.as_ref()),
            date(self.end_date.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_row_fills_its_header() {
        let quest: Quest = serde_json::from_value(json!({"id": "q1", "title": "Walk"})).unwrap();
        assert_eq!(quest.cells().len(), Quest::HEADERS.len());
        let passport: Passport = serde_json::from_value(json!({"id": "p1", "name": "Ana"})).unwrap();
        assert_eq!(passport.cells().len(), Passport::HEADERS.len());
        let memento: Memento = serde_json::from_value(json!({"id": "m1"})).unwrap();
        assert_eq!(memento.cells().len(), Memento::HEADERS.len());
        let collection: Collection = serde_json::from_value(json!({"id": "c1"})).unwrap();
        assert_eq!(collection.cells().len(), Collection::HEADERS.len());
    }

    #[test]
    fn missing_dates_render_blank() {
        assert_eq!(date(None), "");
        let day = "2024-07-01T09:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(date(Some(&day)), "2024-07-01");
    }
}
