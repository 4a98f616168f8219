//! Resource Client
//!
//! `ApiClient` owns the transport, session and configuration. It signs in and
//! hands out one generic `ResourceClient<R>` per resource kind; every HTTP
//! status is turned into an `ApiError` here and nowhere else.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::domain::{
    Collectible, Collection, DashboardStats, ListQuery, Memento, Mutable, PageResult, Passport,
    Quest, QuestStatus, Resource, Session, Subscription, WireList,
};
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::forms::Payload;
use crate::session::AuthSession;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody};

#[cfg(test)]
mod tests;

/// Result of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub success: bool,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: AuthSession,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_root", &self.config.api_root())
            .field("session", &self.session)
            .finish()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: AuthSession, config: ClientConfig) -> Self {
        Self {
            transport,
            session,
            config: Arc::new(config),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient {
            api: self.clone(),
            _marker: PhantomData,
        }
    }

    pub fn quests(&self) -> ResourceClient<Quest> {
        self.resource()
    }

    pub fn collectibles(&self) -> ResourceClient<Collectible> {
        self.resource()
    }

    pub fn collections(&self) -> ResourceClient<Collection> {
        self.resource()
    }

    pub fn mementos(&self) -> ResourceClient<Memento> {
        self.resource()
    }

    pub fn passports(&self) -> ResourceClient<Passport> {
        self.resource()
    }

    pub fn subscriptions(&self) -> ResourceClient<Subscription> {
        self.resource()
    }

    /// Exchange credentials for tokens, persist them and activate the session
    ///
    /// Nothing is persisted when the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let request = ApiRequest::new(Method::Post, "/auth/login").with_body(RequestBody::Json(
            json!({ "email": email.trim(), "password": password }),
        ));
        log::debug!("POST /auth/login");
        let response = self.transport.send(request).await?;
        log::debug!("POST /auth/login -> {}", response.status);

        if !response.is_success() {
            let message = match response.status {
                400 | 401 | 403 => "Invalid email or password".to_string(),
                status => response
                    .error_message()
                    .unwrap_or_else(|| format!("Sign-in failed ({})", status)),
            };
            log::warn!("login rejected: {}", message);
            return Err(ApiError::Auth(message));
        }

        let session: Session = response.decode()?;
        if !session.is_usable() {
            return Err(ApiError::Auth("The server returned an empty token".into()));
        }
        self.activate(session)
    }

    /// Use a Google access token as the session
    pub fn login_with_google(&self, access_token: &str) -> ApiResult<Session> {
        let session = Session::new(access_token.trim(), None);
        if !session.is_usable() {
            return Err(ApiError::Auth("Google sign-in returned no access token".into()));
        }
        self.activate(session)
    }

    /// Development bypass; refused unless enabled in the configuration
    pub fn debug_login(&self) -> ApiResult<Session> {
        if !self.config.debug_login {
            return Err(ApiError::Auth("Debug login is disabled".into()));
        }
        let token = format!("debug_token_{}", chrono::Utc::now().timestamp_millis());
        log::warn!("debug login used; requests carry a placeholder token");
        self.activate(Session::new(token, None))
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    fn activate(&self, session: Session) -> ApiResult<Session> {
        self.session.persist(&session)?;
        self.session.login(session.clone());
        Ok(session)
    }

    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let response = self.send(ApiRequest::new(Method::Get, "/dashboard/stats")).await?;
        if !response.is_success() {
            return Err(ApiError::Fetch {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| "Failed to load dashboard statistics.".to_string()),
            });
        }
        response.decode()
    }

    /// Send with the current bearer token; 401 and 403 become `ApiError::Auth`
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let request = request.with_bearer(self.session.bearer_token());
        let method = request.method;
        let path = request.path.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("{} {} failed: {}", method.as_str(), path, e);
                return Err(e);
            }
        };
        log::debug!("{} {} -> {}", method.as_str(), path, response.status);

        if matches!(response.status, 401 | 403) {
            let message = response
                .error_message()
                .unwrap_or_else(|| "Your session has expired or lacks access.".to_string());
            return Err(ApiError::Auth(message));
        }
        Ok(response)
    }
}

/// Client for one resource kind
pub struct ResourceClient<R> {
    api: ApiClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub async fn list(&self, query: &ListQuery) -> ApiResult<PageResult<R>> {
        let request = ApiRequest::new(Method::Get, R::KIND.collection_path())
            .with_query(query.to_params());
        let response = self.api.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Fetch {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| R::KIND.load_error()),
            });
        }
        let wire: WireList<R> = response.decode()?;
        Ok(wire.into_page(query))
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<R> {
        let response = self
            .api
            .send(ApiRequest::new(Method::Get, R::KIND.item_path(id)))
            .await?;
        if !response.is_success() {
            return Err(status_error(R::KIND.name, Some(id), &response));
        }
        response.decode()
    }
}

impl<R: Mutable> ResourceClient<R> {
    pub async fn create(&self, payload: Payload) -> ApiResult<R> {
        let request = ApiRequest::new(Method::Post, R::KIND.collection_path())
            .with_body(payload.into_body());
        let response = self.api.send(request).await?;
        if !response.is_success() {
            return Err(status_error(R::KIND.name, None, &response));
        }
        let created: R = response.decode()?;
        log::info!("created {} {}", R::KIND.name, created.id());
        Ok(created)
    }

    pub async fn update(&self, id: &str, payload: Payload) -> ApiResult<R> {
        let request =
            ApiRequest::new(Method::Put, R::KIND.item_path(id)).with_body(payload.into_body());
        let response = self.api.send(request).await?;
        if !response.is_success() {
            return Err(status_error(R::KIND.name, Some(id), &response));
        }
        log::info!("updated {} {}", R::KIND.name, id);
        response.decode()
    }

    /// 200 and 204 both count as success; a missing id is `NotFound`
    pub async fn remove(&self, id: &str) -> ApiResult<RemoveOutcome> {
        let response = self
            .api
            .send(ApiRequest::new(Method::Delete, R::KIND.item_path(id)))
            .await?;
        if !response.is_success() {
            return Err(status_error(R::KIND.name, Some(id), &response));
        }
        log::info!("deleted {} {}", R::KIND.name, id);
        Ok(RemoveOutcome { success: true })
    }
}

impl ResourceClient<Quest> {
    pub async fn set_status(&self, id: &str, status: QuestStatus) -> ApiResult<Quest> {
        let request = ApiRequest::new(Method::Patch, format!("{}/status", Quest::KIND.item_path(id)))
            .with_body(RequestBody::Json(json!({ "status": status.as_str() })));
        let response = self.api.send(request).await?;
        if !response.is_success() {
            return Err(status_error(Quest::KIND.name, Some(id), &response));
        }
        response.decode()
    }
}

/// Map a non-2xx, non-auth response of a single-record call
fn status_error(kind: &'static str, id: Option<&str>, response: &ApiResponse) -> ApiError {
    match (response.status, id) {
        (404, Some(id)) => ApiError::NotFound {
            kind,
            id: id.to_string(),
        },
        (status, _) if (400..500).contains(&status) => ApiError::Validation {
            message: response
                .error_message()
                .unwrap_or_else(|| format!("The {} was rejected by the server.", kind)),
            fields: server_field_errors(response),
        },
        (status, _) => ApiError::Server { status },
    }
}

/// `errors` object of a validation response: `{field: message}` or `{field: [message, ..]}`
fn server_field_errors(response: &ApiResponse) -> FieldErrors {
    let mut fields = FieldErrors::new();
    let Ok(body) = serde_json::from_slice::<Value>(&response.body) else {
        return fields;
    };
    if let Some(errors) = body.get("errors").and_then(Value::as_object) {
        for (field, value) in errors {
            let message = match value {
                Value::String(s) => Some(s.clone()),
                Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
                _ => None,
            };
            if let Some(message) = message {
                fields.add(field.clone(), message);
            }
        }
    }
    fields
}
