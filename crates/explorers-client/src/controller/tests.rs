use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::domain::{Collectible, Collection, FilterOperator, PageResult, Quest, QuestStatus};
use crate::error::ApiError;
use crate::forms::{CollectionForm, QuestForm};
use crate::session::{AuthSession, MemoryTokenStore};
use crate::transport::{InMemoryApi, Method, RequestBody};

fn demo() -> (Arc<InMemoryApi>, ApiClient) {
    let api = Arc::new(InMemoryApi::with_demo_data());
    let config = ClientConfig::default();
    let session = AuthSession::new(Arc::new(MemoryTokenStore::new()), config.storage_keys.clone());
    session.init();
    let client = ApiClient::new(api.clone(), session, config);
    client.login_with_google("test-token").unwrap();
    (api, client)
}

fn status_of(list: &ListController<Quest>, id: &str) -> QuestStatus {
    list.rows()
        .iter()
        .find(|q| q.id == id)
        .map(|q| q.status)
        .unwrap()
}

#[tokio::test]
async fn filter_change_returns_to_the_first_page() {
    let (api, client) = demo();
    let mut list = ListController::<Collection>::new(10);
    list.set_page(3);
    list.set_filter("Stamps", Some(FilterOperator::Equals));
    assert_eq!(list.query().page_number, 1);

    assert!(list.refresh(&client.collections()).await);
    assert_eq!(list.phase(), &ListPhase::Loaded);
    assert_eq!(list.rows().len(), 1);
    let sent = api.last_request().unwrap();
    assert!(sent.query_string.contains("filter=Stamps"));
    assert!(sent.query_string.ends_with("pageNumber=0"));
}

#[tokio::test]
async fn superseded_fetch_is_discarded() {
    let (_api, client) = demo();
    let quests = client.quests();
    let mut list = ListController::<Quest>::new(10);

    let first = list.begin_fetch();
    list.set_search("Country");
    let second = list.begin_fetch();

    let newer = quests.list(&second.query).await;
    let older = quests.list(&first.query).await;
    assert!(list.finish_fetch(&second, newer));
    assert!(!list.finish_fetch(&first, older));

    assert_eq!(list.rows().len(), 1);
    assert_eq!(list.rows()[0].id, "q2");
}

#[tokio::test]
async fn results_after_dispose_are_ignored() {
    let (_api, client) = demo();
    let mut list = ListController::<Quest>::new(10);
    let ticket = list.begin_fetch();
    list.dispose();
    let result = client.quests().list(&ticket.query).await;
    assert!(!list.finish_fetch(&ticket, result));
    assert!(list.rows().is_empty());
}

#[test]
fn pagination_comes_from_the_totals_not_the_rows() {
    let mut list = ListController::<Quest>::new(10);
    let ticket = list.begin_fetch();
    list.finish_fetch(
        &ticket,
        Ok(PageResult {
            items: Vec::new(),
            total_count: 42,
            total_pages: 5,
            page_number: 1,
        }),
    );
    assert_eq!(list.total_pages(), 5);
    assert_eq!(list.total_count(), 42);
}

#[tokio::test]
async fn failed_toggle_restores_the_previous_status() {
    let (api, client) = demo();
    let quests = client.quests();
    let mut list = ListController::<Quest>::new(10);
    list.refresh(&quests).await;
    assert_eq!(status_of(&list, "q1"), QuestStatus::Active);

    api.fail_next(500);
    assert!(!list.toggle_status(&quests, "q1").await);

    assert_eq!(status_of(&list, "q1"), QuestStatus::Active);
    assert_eq!(list.banner(), Some("Failed to update status for quest q1."));
    assert!(!list.is_busy("q1"));
}

#[tokio::test]
async fn successful_toggle_keeps_the_server_copy() {
    let (api, client) = demo();
    let quests = client.quests();
    let mut list = ListController::<Quest>::new(10);
    list.refresh(&quests).await;

    assert!(list.toggle_status(&quests, "q2").await);
    assert_eq!(status_of(&list, "q2"), QuestStatus::Active);
    assert!(list.rows().iter().any(|q| q.id == "q2" && q.last_modified_date.is_some()));
    assert_eq!(api.record("quests", "q2").unwrap()["status"], "active");
}

#[tokio::test]
async fn row_with_a_change_in_flight_rejects_another() {
    let (_api, client) = demo();
    let mut list = ListController::<Quest>::new(10);
    list.refresh(&client.quests()).await;

    let (pending, next) = list.begin_toggle("q1").unwrap();
    assert_eq!(next, QuestStatus::Inactive);
    assert!(list.is_busy("q1"));
    assert!(matches!(list.begin_toggle("q1"), Err(ApiError::Validation { .. })));
    assert!(!list.request_delete("q1"));

    list.finish_mutation(pending, Err(ApiError::Network("offline".into())));
    assert_eq!(status_of(&list, "q1"), QuestStatus::Active);
    assert!(list.begin_toggle("q1").is_ok());
}

#[tokio::test]
async fn delete_waits_for_confirmation() {
    let (api, client) = demo();
    let collections = client.collections();
    let mut list = ListController::<Collection>::new(10);
    list.refresh(&collections).await;
    let before = api.requests().len();

    assert!(list.request_delete("col1"));
    assert_eq!(list.pending_delete(), Some("col1"));
    list.cancel_delete();
    assert!(!list.delete_confirmed(&collections).await);
    assert_eq!(api.requests().len(), before);

    list.request_delete("col1");
    assert!(list.delete_confirmed(&collections).await);
    assert!(list.rows().is_empty());
    let methods: Vec<_> = api.requests()[before..].iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![Method::Delete, Method::Get]);
}

#[tokio::test]
async fn refused_delete_keeps_the_row_and_names_it() {
    let (_api, client) = demo();
    let collectibles = client.collectibles();
    let mut list = ListController::<Collectible>::new(10);
    list.refresh(&collectibles).await;

    list.request_delete("c1");
    assert!(!list.delete_confirmed(&collectibles).await);

    assert!(list.rows().iter().any(|c| c.id == "c1"));
    let banner = list.banner().unwrap();
    assert!(banner.contains("c1"));
    assert!(banner.contains("referenced"));
}

#[tokio::test]
async fn auth_failure_asks_for_login() {
    let api = Arc::new(InMemoryApi::new());
    let session = AuthSession::new(Arc::new(MemoryTokenStore::new()), Default::default());
    session.init();
    let client = ApiClient::new(api, session, ClientConfig::default());
    let mut list = ListController::<Quest>::new(10);

    list.refresh(&client.quests()).await;

    assert!(list.needs_login());
    assert!(matches!(list.phase(), ListPhase::Errored(_)));
}

fn valid_quest() -> QuestForm {
    QuestForm {
        title: "Harbour Tour".into(),
        description: "Visit three harbours".into(),
        reward_collectible_id: "c3".into(),
        start_date: "2024-07-01T09:00".into(),
        end_date: "2024-07-01T17:00".into(),
        ..QuestForm::default()
    }
}

#[tokio::test]
async fn new_quest_is_created_without_an_id() {
    let (api, client) = demo();
    let mut edit = EditController::<QuestForm>::new(EditMode::from_id(None), ClientConfig::default());
    assert_eq!(edit.phase(), &EditPhase::Ready);
    edit.update_form(|f| *f = valid_quest());

    assert!(edit.submit(&client.quests()).await);

    let sent = api.last_request().unwrap();
    assert_eq!(sent.method, Method::Post);
    let RequestBody::Json(body) = sent.body else {
        panic!("quest without icon is sent as JSON");
    };
    assert!(body.get("id").is_none());
    let EditPhase::Done(id) = edit.phase().clone() else {
        panic!("submit should finish");
    };
    assert!(api.record("quests", &id).is_some());
    assert_eq!(edit.mode(), &EditMode::Editing(id));
}

#[tokio::test]
async fn edit_loads_and_sends_the_id() {
    let (api, client) = demo();
    let quests = client.quests();
    let mut edit = EditController::<QuestForm>::new(EditMode::from_id(Some("q1")), ClientConfig::default());
    assert_eq!(edit.phase(), &EditPhase::Loading);

    edit.load(&quests).await;
    assert_eq!(edit.form().title, "Daily Kilometre Challenge");

    edit.update_form(|f| f.title = "Daily Two Kilometre Challenge".into());
    assert!(edit.submit(&quests).await);

    let sent = api.last_request().unwrap();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.path, "/quests/q1");
    let RequestBody::Json(body) = sent.body else {
        panic!("quest without icon is sent as JSON");
    };
    assert_eq!(body["id"], "q1");
    assert_eq!(api.record("quests", "q1").unwrap()["title"], "Daily Two Kilometre Challenge");
    assert_eq!(edit.success_message(), Some("Quest q1 saved.".to_string()));
}

#[tokio::test]
async fn missing_record_fails_the_load() {
    let (_api, client) = demo();
    let mut edit = EditController::<QuestForm>::new(EditMode::from_id(Some("q404")), ClientConfig::default());
    edit.load(&client.quests()).await;
    assert_eq!(
        edit.phase(),
        &EditPhase::LoadFailed("No quest found with ID q404.".to_string())
    );
    assert!(edit.begin_submit().is_none());
}

#[tokio::test]
async fn local_validation_blocks_the_request() {
    let (api, client) = demo();
    let before = api.requests().len();
    let mut edit = EditController::<CollectionForm>::new(EditMode::New, ClientConfig::default());
    edit.update_form(|f| f.badge_image_url = "not a url".into());

    assert!(!edit.submit(&client.collections()).await);

    assert_eq!(api.requests().len(), before);
    assert_eq!(edit.field_error("name"), Some("Collection name is required"));
    assert!(edit.field_error("badgeImageUrl").is_some());
}

#[tokio::test]
async fn network_failure_keeps_the_input() {
    let (api, client) = demo();
    let mut edit = EditController::<QuestForm>::new(EditMode::New, ClientConfig::default());
    edit.update_form(|f| *f = valid_quest());
    api.fail_next_with_network_error();

    assert!(!edit.submit(&client.quests()).await);

    assert!(matches!(edit.phase(), EditPhase::Failed(_)));
    assert_eq!(edit.form(), &valid_quest());
    assert!(edit.submit(&client.quests()).await);
}

#[tokio::test]
async fn server_field_errors_reach_the_form() {
    let (api, client) = demo();
    api.seed("passports", json!({"id": "p9", "name": "Old", "userId": "u9"}));
    let mut edit = EditController::<crate::forms::PassportForm>::new(
        EditMode::from_id(Some("p9")),
        ClientConfig::default(),
    );
    edit.load(&client.passports()).await;
    edit.update_form(|f| f.name = "New".into());

    // Simulate the server rejecting the update with field details
    let request = edit.begin_submit().unwrap();
    assert_eq!(request.id.as_deref(), Some("p9"));
    let mut fields = crate::error::FieldErrors::new();
    fields.add("passportNumber", "Passport number already in use");
    edit.finish_submit(Err(ApiError::Validation {
        message: "One or more fields are invalid".into(),
        fields,
    }));

    assert_eq!(
        edit.field_error("passportNumber"),
        Some("Passport number already in use")
    );
    assert_eq!(edit.banner(), Some("One or more fields are invalid"));
    assert_eq!(edit.form().name, "New");
}

#[tokio::test]
async fn emptied_field_is_cleared_on_the_server() {
    let (api, client) = demo();
    let collections = client.collections();
    let mut edit = EditController::<CollectionForm>::new(EditMode::from_id(Some("col1")), ClientConfig::default());
    edit.load(&collections).await;
    assert_eq!(edit.form().description, "Stamps from every Nordic capital.");

    edit.update_form(|f| f.description.clear());
    assert!(edit.submit(&collections).await);

    assert_eq!(api.record("collectibles/collections", "col1").unwrap()["description"], json!(null));
    assert_eq!(collections.get_by_id("col1").await.unwrap().description, None);
    assert_eq!(edit.form().description, "");
}

#[tokio::test]
async fn unrecognised_quest_status_survives_an_edit() {
    let (api, client) = demo();
    api.seed("quests", json!({"id": "q9", "title": "Old Town Loop",
        "description": "Circle the old town.", "status": "archived", "difficulty": "Easy",
        "startDate": "2024-03-01T00:00:00Z", "endDate": "2024-03-31T23:59:59Z",
        "rewardCollectibleId": "c1"}));
    let quests = client.quests();
    let mut edit = EditController::<QuestForm>::new(EditMode::from_id(Some("q9")), ClientConfig::default());
    edit.load(&quests).await;
    assert_eq!(edit.form().status, QuestStatus::Unknown);

    edit.update_form(|f| f.title = "Old Town Grand Loop".into());
    assert!(edit.submit(&quests).await);

    let stored = api.record("quests", "q9").unwrap();
    assert_eq!(stored["title"], "Old Town Grand Loop");
    assert_eq!(stored["status"], "archived");
}

#[tokio::test]
async fn load_after_dispose_is_ignored() {
    let (_api, client) = demo();
    let quests = client.quests();
    let mut edit = EditController::<QuestForm>::new(EditMode::from_id(Some("q1")), ClientConfig::default());
    let id = edit.begin_load().unwrap();
    let loaded = quests.get_by_id(&id).await;

    edit.dispose();
    edit.finish_load(loaded);

    assert_eq!(edit.phase(), &EditPhase::Loading);
    assert_eq!(edit.form(), &QuestForm::default());
}

#[tokio::test]
async fn save_after_dispose_is_ignored() {
    let (_api, client) = demo();
    let quests = client.quests();
    let mut edit = EditController::<QuestForm>::new(EditMode::from_id(Some("q1")), ClientConfig::default());
    edit.load(&quests).await;
    edit.update_form(|f| f.title = "Renamed".into());
    let before = edit.form().clone();
    let request = edit.begin_submit().unwrap();
    let saved = quests.save(&request).await;
    assert!(saved.is_ok());

    edit.dispose();
    edit.finish_submit(saved);

    assert_eq!(edit.phase(), &EditPhase::Submitting);
    assert_eq!(edit.form(), &before);
    assert_eq!(edit.success_message(), None);
}
