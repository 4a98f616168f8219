use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::domain::{CollectionType, Difficulty, FilterOperator, SortDirection};
use crate::forms::{Attachment, CollectibleForm, CollectionForm, EditForm, QuestForm};
use crate::session::{MemoryTokenStore, RouteGuard, TokenStore};
use crate::transport::InMemoryApi;

const EMAIL: &str = "admin@explorers.live";
const PASSWORD: &str = "password";

struct Harness {
    api: Arc<InMemoryApi>,
    store: Arc<MemoryTokenStore>,
    client: ApiClient,
}

fn harness(api: InMemoryApi) -> Harness {
    let api = Arc::new(api);
    let store = Arc::new(MemoryTokenStore::new());
    let config = ClientConfig::default();
    let session = AuthSession::new(store.clone(), config.storage_keys.clone());
    session.init();
    let client = ApiClient::new(api.clone(), session, config);
    Harness { api, store, client }
}

/// Strict API with one account, already signed in
async fn signed_in() -> Harness {
    let h = harness(InMemoryApi::new().with_account(EMAIL, PASSWORD));
    h.client.login(EMAIL, PASSWORD).await.unwrap();
    h
}

fn quest_form(title: &str) -> QuestForm {
    QuestForm {
        title: title.into(),
        description: "Walk five kilometres".into(),
        difficulty: Difficulty::Hard,
        reward_collectible_id: "c1".into(),
        start_date: "2024-05-01T08:00".into(),
        end_date: "2024-05-31T20:00".into(),
        ..QuestForm::default()
    }
}

#[tokio::test]
async fn valid_login_persists_tokens_and_allows_routes() {
    let h = harness(InMemoryApi::new().with_account(EMAIL, PASSWORD));
    assert_eq!(h.client.session().guard(), RouteGuard::RedirectToLogin);

    let session = h.client.login(EMAIL, PASSWORD).await.unwrap();

    assert_eq!(h.store.get("authToken"), Some(session.access_token.clone()));
    assert_eq!(h.store.get("refreshToken"), session.refresh_token.clone());
    assert_eq!(h.client.session().guard(), RouteGuard::Allow);
}

#[tokio::test]
async fn invalid_login_persists_nothing() {
    let h = harness(InMemoryApi::new().with_account(EMAIL, PASSWORD));

    let err = h.client.login(EMAIL, "wrong").await.unwrap_err();

    assert!(err.requires_login());
    assert_eq!(h.store.get("authToken"), None);
    assert_eq!(h.client.session().guard(), RouteGuard::RedirectToLogin);
}

#[tokio::test]
async fn calls_without_a_session_are_auth_errors() {
    let h = harness(InMemoryApi::new().with_account(EMAIL, PASSWORD));
    let err = h.client.quests().list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(_)));
}

#[tokio::test]
async fn bearer_is_read_at_call_time() {
    let h = signed_in().await;
    let first = h.store.get("authToken").unwrap();
    h.client.quests().list(&ListQuery::default()).await.unwrap();

    h.client.logout();
    h.client.login(EMAIL, PASSWORD).await.unwrap();
    let second = h.store.get("authToken").unwrap();
    assert_ne!(first, second);

    h.client.quests().list(&ListQuery::default()).await.unwrap();
    let bearers: Vec<_> = h
        .api
        .requests()
        .into_iter()
        .filter(|r| r.path == "/quests")
        .map(|r| r.bearer)
        .collect();
    assert_eq!(bearers, vec![Some(first), Some(second)]);
}

#[tokio::test]
async fn create_then_get_returns_the_same_fields() {
    let h = signed_in().await;
    let quests = h.client.quests();

    let created = quests.create(quest_form("Night Walk").to_payload(None)).await.unwrap();
    let fetched = quests.get_by_id(&created.id).await.unwrap();

    assert_eq!(fetched.title, "Night Walk");
    assert_eq!(fetched.description, created.description);
    assert_eq!(fetched.difficulty, Difficulty::Hard);
    assert_eq!(fetched.start_date, created.start_date);
    assert_eq!(fetched.reward_collectible_id.as_deref(), Some("c1"));
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let h = signed_in().await;
    let collections = h.client.collections();
    let form = CollectionForm {
        name: "Coins of Europe".into(),
        collection_type: CollectionType::Coins,
        ..CollectionForm::default()
    };
    let created = collections.create(form.to_payload(None)).await.unwrap();

    assert_eq!(
        collections.remove(&created.id).await.unwrap(),
        RemoveOutcome { success: true }
    );
    let err = collections.remove(&created.id).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::NotFound {
            kind: "collection",
            id: created.id.clone()
        }
    );
}

#[tokio::test]
async fn pages_are_counted_and_past_the_end_is_empty() {
    let h = signed_in().await;
    for i in 0..23 {
        h.api.seed("collectibles", json!({ "name": format!("Stamp {:02}", i) }));
    }
    let collectibles = h.client.collectibles();

    let page = collectibles.list(&ListQuery::new(10).with_page(3)).await.unwrap();
    assert_eq!(page.total_count, 23);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page_number, 3);
    assert_eq!(page.items.len(), 3);

    let beyond = collectibles.list(&ListQuery::new(10).with_page(4)).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_pages, 3);
}

#[tokio::test]
async fn list_sends_canonical_parameters() {
    let h = signed_in().await;
    let query = ListQuery::new(25)
        .with_key("nordic")
        .with_filter("Stamps", Some(FilterOperator::Equals))
        .with_order("name", SortDirection::Desc)
        .with_page(1);
    h.client.collections().list(&query).await.unwrap();

    let sent = h.api.last_request().unwrap();
    assert_eq!(sent.path, "/collectibles/collections");
    assert_eq!(
        sent.query_string,
        "key=nordic&filter=Stamps&operator=eq&order=name&direction=desc&pageSize=25&pageNumber=0"
    );
}

#[tokio::test]
async fn list_failure_uses_the_kind_default_message() {
    let h = signed_in().await;
    h.api.fail_next(500);
    let err = h.client.mementos().list(&ListQuery::default()).await.unwrap_err();
    // The injected body carries its own message
    assert_eq!(
        err,
        ApiError::Fetch {
            status: 500,
            message: "Injected failure".into()
        }
    );

    let api = Arc::new(FixedStatus(502));
    let session = AuthSession::new(Arc::new(MemoryTokenStore::new()), Default::default());
    let client = ApiClient::new(api, session, ClientConfig::default());
    let err = client.mementos().list(&ListQuery::default()).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to load mementos.");
}

struct FixedStatus(u16);

#[async_trait::async_trait]
impl HttpTransport for FixedStatus {
    async fn send(&self, _request: ApiRequest) -> ApiResult<ApiResponse> {
        Ok(ApiResponse::empty(self.0))
    }
}

#[tokio::test]
async fn no_content_delete_succeeds() {
    let api = Arc::new(FixedStatus(204));
    let session = AuthSession::new(Arc::new(MemoryTokenStore::new()), Default::default());
    let client = ApiClient::new(api, session, ClientConfig::default());
    assert!(client.passports().remove("p1").await.unwrap().success);
}

#[tokio::test]
async fn editing_without_a_new_file_keeps_the_attachment() {
    let h = signed_in().await;
    let collectibles = h.client.collectibles();
    let form = CollectibleForm {
        name: "Golden Compass".into(),
        image: Some(Attachment::new("compass.png", vec![137, 80, 78, 71])),
        ..CollectibleForm::default()
    };
    let created = collectibles.create(form.to_payload(None)).await.unwrap();
    let original_url = created.image_url.clone();
    assert!(original_url.is_some());

    let mut edit = CollectibleForm::from_resource(&created);
    edit.name = "Silver Compass".into();
    let updated = collectibles
        .update(&created.id, edit.to_payload(Some(&created.id)))
        .await
        .unwrap();

    assert_eq!(updated.name, "Silver Compass");
    assert_eq!(updated.image_url, original_url);
}

#[tokio::test]
async fn server_validation_carries_field_errors() {
    let h = signed_in().await;
    let err = h
        .client
        .quests()
        .create(Payload::Json(json!({ "difficulty": "Easy" })))
        .await
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert_eq!(fields.get("title"), Some("Title is required"));
    assert!(!err.requires_login());
}

#[tokio::test]
async fn referenced_collectible_cannot_be_deleted() {
    let h = signed_in().await;
    h.api.seed("collectibles", json!({"id": "c1", "name": "Kilometre Coin"}));
    h.client.quests().create(quest_form("Uses c1").to_payload(None)).await.unwrap();

    let err = h.client.collectibles().remove("c1").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(h.api.count("collectibles"), 1);
}

#[tokio::test]
async fn set_status_patches_the_quest() {
    let h = signed_in().await;
    let quest = h.client.quests().create(quest_form("Toggle me").to_payload(None)).await.unwrap();
    assert_eq!(quest.status, QuestStatus::Inactive);

    let updated = h
        .client
        .quests()
        .set_status(&quest.id, QuestStatus::Active)
        .await
        .unwrap();
    assert_eq!(updated.status, QuestStatus::Active);

    let sent = h.api.last_request().unwrap();
    assert_eq!(sent.method, Method::Patch);
    assert_eq!(sent.path, format!("/quests/{}/status", quest.id));
}

#[tokio::test]
async fn network_failures_are_reported_as_such() {
    let h = signed_in().await;
    h.api.fail_next_with_network_error();
    let err = h.client.quests().get_by_id("q1").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn debug_login_requires_the_flag() {
    let h = harness(InMemoryApi::new());
    assert!(h.client.debug_login().is_err());
    assert_eq!(h.store.get("authToken"), None);

    let store = Arc::new(MemoryTokenStore::new());
    let config = ClientConfig::default().with_debug_login(true);
    let session = AuthSession::new(store.clone(), config.storage_keys.clone());
    let client = ApiClient::new(Arc::new(InMemoryApi::new()), session, config);
    let session = client.debug_login().unwrap();
    assert!(session.access_token.starts_with("debug_token_"));
    assert_eq!(store.get("authToken"), Some(session.access_token));
}

#[tokio::test]
async fn dashboard_counts_active_quests() {
    let h = harness(InMemoryApi::with_demo_data());
    h.client.login_with_google("google-access-token").unwrap();
    let stats = h.client.dashboard_stats().await.unwrap();
    assert_eq!(stats.active_quests, Some(1));
    assert_eq!(stats.total_collectibles, Some(3));
}
