//! Console Layout
//!
//! Side navigation around the signed-in screens.

use leptos::prelude::*;

use crate::context::use_app;
use crate::route::{Route, Section};

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let ctx = use_app();
    let active = move |section: Option<Section>| ctx.route.with(|r| r.section() == section);

    view! {
        <div class="layout">
            <nav class="sidebar">
                <div class="brand">"Explorers"</div>
                <a
                    href=Route::Dashboard.href()
                    class:active=move || ctx.route.with(|r| *r == Route::Dashboard)
                >
                    "Dashboard"
                </a>
                {Section::ALL
                    .into_iter()
                    .map(|section| view! {
                        <a href=Route::List(section).href() class:active=move || active(Some(section))>
                            {section.label()}
                        </a>
                    })
                    .collect_view()}
                <button class="logout" on:click=move |_| ctx.logout()>"Log out"</button>
            </nav>
            <main class="content">{children()}</main>
        </div>
    }
}
