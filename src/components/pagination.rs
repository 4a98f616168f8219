//! Pagination Component
//!
//! Page controls driven by the server's totals, never by the row count.

use leptos::prelude::*;

#[component]
pub fn Pagination(
    /// 1-based
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] total_count: Signal<u64>,
    #[prop(into)] page_size: Signal<u32>,
    page_size_options: Vec<u32>,
    #[prop(into)] on_page: Callback<u32>,
    #[prop(into)] on_page_size: Callback<u32>,
) -> impl IntoView {
    let at_start = move || page.get() <= 1;
    let at_end = move || page.get() >= total_pages.get();

    view! {
        <div class="pagination">
            <button disabled=at_start on:click=move |_| on_page.run(page.get_untracked().saturating_sub(1).max(1))>
                "‹ Prev"
            </button>
            <span class="page-info">
                {move || format!(
                    "Page {} of {} ({} total)",
                    page.get(),
                    total_pages.get().max(1),
                    total_count.get()
                )}
            </span>
            <button disabled=at_end on:click=move |_| on_page.run(page.get_untracked() + 1)>
                "Next ›"
            </button>
            <select
                class="page-size"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size.run(size);
                    }
                }
            >
                {page_size_options.into_iter().map(|size| view! {
                    <option value=size.to_string() selected=move || page_size.get() == size>
                        {format!("{} / page", size)}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}
