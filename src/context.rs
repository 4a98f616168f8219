//! Application Context
//!
//! Shared state provided via Leptos Context API.

use explorers_client::{ApiClient, ApiError, RouteGuard};
use leptos::prelude::*;

use crate::route::Route;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<ApiClient>,
    /// Current screen - read
    pub route: ReadSignal<Route>,
    /// Current screen - write
    set_route: WriteSignal<Route>,
    /// Bumped on sign-in and sign-out so guards re-evaluate
    auth_version: RwSignal<u32>,
}

impl AppContext {
    pub fn new(client: ApiClient, route: (ReadSignal<Route>, WriteSignal<Route>)) -> Self {
        Self {
            client: StoredValue::new(client),
            route: route.0,
            set_route: route.1,
            auth_version: RwSignal::new(0),
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    /// Move to a screen and record it in the URL fragment
    pub fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(&route.href());
        }
        self.set_route.set(route);
    }

    /// Called from the `hashchange` listener
    pub fn sync_from_hash(&self, hash: &str) {
        let route = Route::parse(hash);
        if self.route.get_untracked() != route {
            self.set_route.set(route);
        }
    }

    /// Reactive route guard
    pub fn guard(&self) -> RouteGuard {
        self.auth_version.track();
        self.client.with_value(|c| c.session().guard())
    }

    /// Notify guards that the session changed
    pub fn session_changed(&self) {
        self.auth_version.update(|v| *v += 1);
    }

    pub fn logout(&self) {
        self.client.with_value(|c| c.logout());
        self.session_changed();
        self.navigate(Route::Login);
    }

    /// Send the user to login when an error says the session is gone
    pub fn handle_auth_error(&self, err: &ApiError) {
        if err.requires_login() {
            log::info!("session rejected by the API; returning to login");
            self.logout();
        }
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
