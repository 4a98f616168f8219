//! Auth Session
//!
//! The signed-in state, injected into the client and the views. Durable
//! storage holds the tokens across reloads; the in-memory copy is what the
//! route guard looks at.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::StorageKeys;
use crate::domain::Session;
use crate::error::ApiResult;

/// Durable key/value storage for tokens (browser local storage in the app)
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;
    fn remove(&self, key: &str);
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}

/// What a protected route should do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Storage not read yet; render nothing
    Pending,
    Allow,
    RedirectToLogin,
}

#[derive(Debug)]
struct SessionState {
    loading: bool,
    session: Option<Session>,
}

struct SessionInner {
    store: Arc<dyn TokenStore>,
    keys: StorageKeys,
    state: RwLock<SessionState>,
}

/// Shared handle to the auth session; clones refer to the same state
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("AuthSession")
            .field("loading", &state.loading)
            .field("authenticated", &state.session.is_some())
            .finish()
    }
}

impl AuthSession {
    pub fn new(store: Arc<dyn TokenStore>, keys: StorageKeys) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store,
                keys,
                state: RwLock::new(SessionState {
                    loading: true,
                    session: None,
                }),
            }),
        }
    }

    /// Hydrate from durable storage
    pub fn init(&self) {
        let keys = &self.inner.keys;
        let session = self
            .inner
            .store
            .get(&keys.auth_token)
            .map(|token| Session::new(token, self.inner.store.get(&keys.refresh_token)))
            .filter(Session::is_usable);

        log::info!("session: initialised (authenticated: {})", session.is_some());
        let mut state = self.inner.state.write();
        state.session = session;
        state.loading = false;
    }

    /// Drop the in-memory session; durable storage is left alone
    pub fn dispose(&self) {
        self.inner.state.write().session = None;
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().session.is_some()
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.state.read().session.clone()
    }

    /// Write both tokens to durable storage
    ///
    /// A missing refresh token clears any stale one.
    pub fn persist(&self, session: &Session) -> ApiResult<()> {
        let keys = &self.inner.keys;
        self.inner.store.set(&keys.auth_token, &session.access_token)?;
        match &session.refresh_token {
            Some(refresh) => self.inner.store.set(&keys.refresh_token, refresh)?,
            None => self.inner.store.remove(&keys.refresh_token),
        }
        Ok(())
    }

    /// Replace the in-memory session
    pub fn login(&self, session: Session) {
        log::info!("session: signed in");
        let mut state = self.inner.state.write();
        state.session = Some(session);
        state.loading = false;
    }

    /// Clear durable and in-memory state
    pub fn logout(&self) {
        let keys = &self.inner.keys;
        self.inner.store.remove(&keys.auth_token);
        self.inner.store.remove(&keys.refresh_token);
        self.inner.state.write().session = None;
        log::info!("session: signed out");
    }

    /// Token for the next request, read at call time
    pub fn bearer_token(&self) -> Option<String> {
        self.current()
            .map(|s| s.access_token)
            .or_else(|| self.inner.store.get(&self.inner.keys.auth_token))
            .filter(|t| !t.trim().is_empty())
    }

    pub fn guard(&self) -> RouteGuard {
        let state = self.inner.state.read();
        if state.loading {
            RouteGuard::Pending
        } else if state.session.is_some() {
            RouteGuard::Allow
        } else {
            RouteGuard::RedirectToLogin
        }
    }
}
