//! List Toolbar Component
//!
//! Search box, optional filter select and sort controls above a list.

use leptos::prelude::*;

/// `(value, label)` option
pub type Choice = (&'static str, &'static str);

#[component]
pub fn ListToolbar(
    /// Options for the filter select; empty hides it
    filters: &'static [Choice],
    /// Sortable fields; empty hides the sort controls
    sorts: &'static [Choice],
    #[prop(into)] on_search: Callback<String>,
    #[prop(into)] on_filter: Callback<String>,
    /// `(field, descending)`
    #[prop(into)] on_sort: Callback<(String, bool)>,
) -> impl IntoView {
    let (search, set_search) = signal(String::new());
    let (order, set_order) = signal(String::new());
    let (descending, set_descending) = signal(false);

    let apply_sort = move || on_sort.run((order.get_untracked(), descending.get_untracked()));

    view! {
        <div class="list-toolbar">
            <form
                class="search-form"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    on_search.run(search.get_untracked());
                }
            >
                <input
                    type="search"
                    placeholder="Search..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button type="submit">"Search"</button>
            </form>

            <Show when=move || !filters.is_empty()>
                <select on:change=move |ev| on_filter.run(event_target_value(&ev))>
                    <option value="">"All"</option>
                    {filters.iter().map(|(value, label)| view! {
                        <option value=*value>{*label}</option>
                    }).collect_view()}
                </select>
            </Show>

            <Show when=move || !sorts.is_empty()>
                <select on:change=move |ev| {
                    set_order.set(event_target_value(&ev));
                    apply_sort();
                }>
                    <option value="">"Sort by..."</option>
                    {sorts.iter().map(|(value, label)| view! {
                        <option value=*value>{*label}</option>
                    }).collect_view()}
                </select>
                <button
                    type="button"
                    class="direction-btn"
                    on:click=move |_| {
                        set_descending.update(|d| *d = !*d);
                        apply_sort();
                    }
                >
                    {move || if descending.get() { "↓ Desc" } else { "↑ Asc" }}
                </button>
            </Show>
        </div>
    }
}
