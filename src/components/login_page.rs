//! Login Screen
//!
//! Email/password sign-in, a Google access-token option and, when enabled in
//! the build, a debug bypass.

use explorers_client::forms::LoginForm;
use explorers_client::{ApiError, ApiResult, FieldErrors, Session};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app, AppContext};
use crate::route::Route;

fn finish_login(ctx: AppContext, banner: RwSignal<Option<String>>, result: ApiResult<Session>) {
    match result {
        Ok(_) => {
            log::info!("signed in");
            ctx.session_changed();
            ctx.navigate(Route::Dashboard);
        }
        Err(err) => {
            log::warn!("sign-in failed: {}", err);
            banner.try_set(Some(match err {
                ApiError::Auth(message) => message,
                other => other.user_message(),
            }));
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let debug_login = ctx.client().config().debug_login;

    let form = RwSignal::new(LoginForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let banner = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let google_token = RwSignal::new(String::new());

    let error_for = move |field: &'static str| {
        move || {
            errors.with(|e| e.get(field).map(str::to_string))
                .map(|message| view! { <span class="field-error">{message}</span> })
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        let problems = current.validate();
        let blocked = !problems.is_empty();
        errors.set(problems);
        if blocked {
            return;
        }
        banner.set(None);
        busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = client.login(current.email.trim(), &current.password).await;
            busy.try_set(false);
            finish_login(ctx, banner, result);
        });
    };

    let on_google = move |_: web_sys::MouseEvent| {
        let token = google_token.get_untracked();
        if token.trim().is_empty() {
            banner.set(Some("Paste a Google access token first.".to_string()));
            return;
        }
        finish_login(ctx, banner, ctx.client().login_with_google(token.trim()));
    };

    let on_debug = move |_: web_sys::MouseEvent| finish_login(ctx, banner, ctx.client().debug_login());

    view! {
        <div class="login-page">
            <h1>"Explorers Admin"</h1>

            {move || banner.get().map(|message| view! { <div class="alert error">{message}</div> })}

            <form class="login-form" on:submit=on_submit>
                <div class="form-field">
                    <label>"Email"</label>
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| {
                            form.update(|f| f.email = event_target_value(&ev));
                            errors.update(|e| e.clear_field("email"));
                        }
                    />
                    {error_for("email")}
                </div>
                <div class="form-field">
                    <label>"Password"</label>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| {
                            form.update(|f| f.password = event_target_value(&ev));
                            errors.update(|e| e.clear_field("password"));
                        }
                    />
                    {error_for("password")}
                </div>
                <button type="submit" class="primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>

            <div class="login-alt">
                <input
                    type="text"
                    placeholder="Google access token"
                    prop:value=move || google_token.get()
                    on:input=move |ev| google_token.set(event_target_value(&ev))
                />
                <button on:click=on_google>"Sign in with Google"</button>
            </div>

            {debug_login.then(|| view! {
                <button class="debug-login" on:click=on_debug>"Debug Login"</button>
            })}
        </div>
    }
}
