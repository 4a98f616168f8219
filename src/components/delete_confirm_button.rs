//! Delete Confirm Button Component
//!
//! Inline delete with a confirm/cancel step. The list controller owns the
//! pending state, so only one row can be awaiting confirmation.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows "Delete" initially; while `pending`, shows "Delete?" with confirm and
/// cancel buttons. Nothing is sent until `on_confirm` runs.
#[component]
pub fn DeleteConfirmButton(
    /// This row is the one awaiting confirmation
    #[prop(into)] pending: Signal<bool>,
    /// Another change to the row is in flight
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_request: Callback<()>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show
            when=move || pending.get()
            fallback=move || view! {
                <button
                    class="delete-btn"
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_request.run(());
                    }
                >
                    "Delete"
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_cancel.run(());
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
