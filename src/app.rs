//! Explorers Admin App
//!
//! Builds the API client, provides context and switches screens on the hash
//! route behind the session guard.

use std::sync::Arc;

use explorers_client::forms::{
    CollectibleForm, CollectionForm, MementoForm, PassportForm, QuestForm,
};
use explorers_client::{
    ApiClient, AuthSession, Collectible, Collection, HttpTransport, InMemoryApi, Memento, Passport,
    Quest, ReqwestTransport, RouteGuard, Subscription,
};
use leptos::ev;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{
    detail_page, edit_page, list_page, DashboardPage, Layout, LoginPage,
};
use crate::config;
use crate::context::{use_app, AppContext};
use crate::route::{Route, Section};
use crate::storage::LocalStorageTokenStore;
use crate::store::AppState;

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

fn build_client() -> ApiClient {
    let config = config::client_config();
    let transport: Arc<dyn HttpTransport> = if config::demo_backend() {
        log::info!("using the in-memory demo backend");
        Arc::new(InMemoryApi::with_demo_data())
    } else {
        log::info!("API root {}", config.api_root());
        Arc::new(ReqwestTransport::new(config.api_root()))
    };
    let session = AuthSession::new(Arc::new(LocalStorageTokenStore), config.storage_keys.clone());
    session.init();
    ApiClient::new(transport, session, config)
}

fn screen(route: Route) -> AnyView {
    match route {
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Dashboard => view! { <DashboardPage /> }.into_any(),
        Route::List(section) => match section {
            Section::Passports => list_page::<Passport>().into_any(),
            Section::Subscriptions => list_page::<Subscription>().into_any(),
            Section::Collectibles => list_page::<Collectible>().into_any(),
            Section::Collections => list_page::<Collection>().into_any(),
            Section::Quests => list_page::<Quest>().into_any(),
            Section::Mementos => list_page::<Memento>().into_any(),
        },
        Route::New(section) => form_screen(section, None),
        Route::Edit(section, id) => form_screen(section, Some(id)),
        Route::Detail(section, id) => match section {
            Section::Collectibles => detail_page::<Collectible>(id).into_any(),
            Section::Collections => detail_page::<Collection>(id).into_any(),
            Section::Subscriptions => detail_page::<Subscription>(id).into_any(),
            _ => not_found(Route::Detail(section, id).href()),
        },
        Route::NotFound(path) => not_found(path),
    }
}

fn form_screen(section: Section, id: Option<String>) -> AnyView {
    match section {
        Section::Passports => edit_page::<PassportForm>(id).into_any(),
        Section::Collectibles => edit_page::<CollectibleForm>(id).into_any(),
        Section::Collections => edit_page::<CollectionForm>(id).into_any(),
        Section::Quests => edit_page::<QuestForm>(id).into_any(),
        Section::Mementos => edit_page::<MementoForm>(id).into_any(),
        Section::Subscriptions => not_found(format!("/{}/new", section.segment())),
    }
}

fn not_found(path: String) -> AnyView {
    view! {
        <section class="not-found">
            <h1>"Page not found"</h1>
            <p>{path}</p>
            <a href=Route::Dashboard.href()>"Back to the dashboard"</a>
        </section>
    }
    .into_any()
}

/// Routes behind the session guard
#[component]
fn Guarded() -> impl IntoView {
    let ctx = use_app();

    Effect::new(move |_| {
        let route = ctx.route.get();
        if !route.is_public() && ctx.guard() == RouteGuard::RedirectToLogin {
            log::info!("no session; redirecting to login");
            ctx.navigate(Route::Login);
        }
    });

    move || {
        let route = ctx.route.get();
        if route.is_public() {
            return untrack(|| screen(route));
        }
        match ctx.guard() {
            RouteGuard::Allow => untrack(|| view! { <Layout>{screen(route)}</Layout> }.into_any()),
            RouteGuard::Pending | RouteGuard::RedirectToLogin => ().into_any(),
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let client = build_client();
    let session = client.session().clone();
    on_cleanup(move || session.dispose());
    let route = signal(Route::parse(&current_hash()));

    // Provide context to all children
    let ctx = AppContext::new(client, route);
    provide_context(ctx);
    provide_context(Store::new(AppState::default()));

    let _ = window_event_listener(ev::hashchange, move |_| {
        ctx.sync_from_hash(&current_hash());
    });

    view! { <Guarded /> }
}
