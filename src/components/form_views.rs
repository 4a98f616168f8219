//! Field layouts for each edit form

use explorers_client::domain::{CollectionType, Difficulty, MementoType, QuestStatus};
use explorers_client::forms::{
    CollectibleForm, CollectionForm, MementoForm, PassportForm, QuestForm, PASSPORT_STATUSES,
};
use explorers_client::{Attachment, ListQuery};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::edit_page::{
    checkbox_input, file_input, select_input, text_area, text_input, EditHandle, FormView,
};
use crate::context::AppContext;
use crate::route::Section;
use crate::store::{store_has_rewards, store_rewards, store_set_rewards, use_app_store, AppStore};

/// Largest page the reward picker asks for
const REWARD_PAGE_SIZE: u32 = 100;

fn choices(values: &[&'static str]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|v| (v.to_string(), v.to_string()))
        .collect()
}

/// Fill the reward picker once per session
fn load_rewards(ctx: AppContext, store: AppStore) {
    if store_has_rewards(&store) {
        return;
    }
    let client = ctx.client().collectibles();
    spawn_local(async move {
        match client.list(&ListQuery::new(REWARD_PAGE_SIZE)).await {
            Ok(page) => store_set_rewards(&store, page.items),
            Err(err) => {
                log::warn!("loading reward collectibles failed: {}", err);
                ctx.handle_auth_error(&err);
            }
        }
    });
}

impl FormView for QuestForm {
    const SECTION: Section = Section::Quests;

    fn fields(edit: EditHandle<Self>) -> AnyView {
        let store = use_app_store();
        load_rewards(edit.ctx, store);
        let rewards = move || {
            store_rewards(&store)
                .into_iter()
                .map(|c| {
                    let label = if c.name.is_empty() { c.id.clone() } else { c.name };
                    (c.id, label)
                })
                .collect::<Vec<_>>()
        };
        let difficulties = || {
            Difficulty::ALL
                .iter()
                .map(|d| (d.as_str().to_string(), d.as_str().to_string()))
                .collect::<Vec<_>>()
        };
        let statuses = || {
            [QuestStatus::Active, QuestStatus::Inactive, QuestStatus::Draft, QuestStatus::Expired]
                .iter()
                .map(|s| (s.as_str().to_string(), s.label().to_string()))
                .collect::<Vec<_>>()
        };

        view! {
            {text_input(edit, "Title", "title", "text", |f| f.title.clone(), |f, v| f.title = v)}
            {text_area(edit, "Description", "description", |f| f.description.clone(), |f, v| f.description = v)}
            {select_input(
                edit,
                "Difficulty",
                "difficulty",
                difficulties,
                |f| f.difficulty.as_str().to_string(),
                |f, v| f.difficulty = Difficulty::from_str(&v),
            )}
            {select_input(
                edit,
                "Reward Collectible",
                "rewardCollectibleId",
                rewards,
                |f| f.reward_collectible_id.clone(),
                |f, v| f.reward_collectible_id = v,
            )}
            {text_input(edit, "Start Date", "startDate", "datetime-local", |f| f.start_date.clone(), |f, v| f.start_date = v)}
            {text_input(edit, "End Date", "endDate", "datetime-local", |f| f.end_date.clone(), |f, v| f.end_date = v)}
            {select_input(
                edit,
                "Status",
                "status",
                statuses,
                |f| f.status.as_str().to_string(),
                |f, v| f.status = QuestStatus::from_str(&v),
            )}
            {file_input(
                edit,
                "Icon",
                "icon",
                |f| f.icon.as_ref().map(Attachment::preview_data_url).or_else(|| f.icon_url.clone()),
                |f, a| f.icon = Some(a),
            )}
        }
        .into_any()
    }
}

impl FormView for CollectibleForm {
    const SECTION: Section = Section::Collectibles;

    fn fields(edit: EditHandle<Self>) -> AnyView {
        view! {
            {text_input(edit, "Name", "name", "text", |f| f.name.clone(), |f, v| f.name = v)}
            {text_area(edit, "Description", "description", |f| f.description.clone(), |f, v| f.description = v)}
            {file_input(
                edit,
                "Image",
                "image",
                |f| f.image.as_ref().map(Attachment::preview_data_url).or_else(|| f.image_url.clone()),
                |f, a| f.image = Some(a),
            )}
        }
        .into_any()
    }
}

impl FormView for CollectionForm {
    const SECTION: Section = Section::Collections;

    fn fields(edit: EditHandle<Self>) -> AnyView {
        let types = || {
            CollectionType::ALL
                .iter()
                .map(|t| (t.as_str().to_string(), t.as_str().to_string()))
                .collect::<Vec<_>>()
        };
        view! {
            {text_input(edit, "Name", "name", "text", |f| f.name.clone(), |f, v| f.name = v)}
            {text_area(edit, "Description", "description", |f| f.description.clone(), |f, v| f.description = v)}
            {select_input(
                edit,
                "Type",
                "collectionType",
                types,
                |f| f.collection_type.as_str().to_string(),
                |f, v| f.collection_type = CollectionType::from_str(&v),
            )}
            {text_input(edit, "Badge Image URL", "badgeImageUrl", "url", |f| f.badge_image_url.clone(), |f, v| f.badge_image_url = v)}
            {text_input(edit, "Box Image URL", "boxImageUrl", "url", |f| f.box_image_url.clone(), |f, v| f.box_image_url = v)}
            {text_input(
                edit,
                "Background Image URL",
                "backgroundImageUrl",
                "url",
                |f| f.background_image_url.clone(),
                |f, v| f.background_image_url = v,
            )}
        }
        .into_any()
    }
}

impl FormView for MementoForm {
    const SECTION: Section = Section::Mementos;

    fn fields(edit: EditHandle<Self>) -> AnyView {
        let types = || choices(&MementoType::ALL.map(|t| t.as_str()));
        view! {
            {select_input(edit, "Type", "type", types, |f| f.memento_type.clone(), |f, v| f.memento_type = v)}
            {text_input(edit, "Capture Date", "captureDate", "datetime-local", |f| f.capture_date.clone(), |f, v| f.capture_date = v)}
            {text_input(edit, "Latitude", "location.x", "text", |f| f.location_x.clone(), |f, v| f.location_x = v)}
            {text_input(edit, "Longitude", "location.y", "text", |f| f.location_y.clone(), |f, v| f.location_y = v)}
            {text_input(edit, "URL", "url", "url", |f| f.url.clone(), |f, v| f.url = v)}
            {text_input(edit, "Thumbnail URL", "thumbnailUrl", "url", |f| f.thumbnail_url.clone(), |f, v| f.thumbnail_url = v)}
            {checkbox_input(
                edit,
                "Royal Explorer at discovery",
                "isRoyalExplorerOnTimeOfDiscovery",
                |f| f.is_royal_explorer,
                |f, v| f.is_royal_explorer = v,
            )}
            {checkbox_input(edit, "Locked", "isMementoLocked", |f| f.is_locked, |f, v| f.is_locked = v)}
        }
        .into_any()
    }
}

impl FormView for PassportForm {
    const SECTION: Section = Section::Passports;

    fn fields(edit: EditHandle<Self>) -> AnyView {
        let statuses = || choices(&PASSPORT_STATUSES);
        view! {
            {text_input(edit, "Name", "name", "text", |f| f.name.clone(), |f, v| f.name = v)}
            {text_input(edit, "User ID", "userId", "text", |f| f.user_id.clone(), |f, v| f.user_id = v)}
            {select_input(edit, "Status", "status", statuses, |f| f.status.clone(), |f, v| f.status = v)}
            {text_input(edit, "Passport Number", "passportNumber", "text", |f| f.passport_number.clone(), |f, v| f.passport_number = v)}
            {text_input(
                edit,
                "Country of Origin",
                "countryOfOrigin",
                "text",
                |f| f.country_of_origin.clone(),
                |f, v| f.country_of_origin = v,
            )}
            {text_input(
                edit,
                "Subscription Plan",
                "subscriptionPlanId",
                "text",
                |f| f.subscription_plan_id.clone(),
                |f, v| f.subscription_plan_id = v,
            )}
            {text_input(edit, "Coins", "coins", "number", |f| f.coins.clone(), |f, v| f.coins = v)}
        }
        .into_any()
    }
}
