//! Resource List Page
//!
//! One generic table screen for every resource. The `ListController` lives in
//! an `RwSignal`; requests run in `spawn_local` between `begin_*` and
//! `finish_*`, and `try_update` drops results once the page is unmounted.

use std::future::Future;
use std::pin::Pin;

use explorers_client::{
    ApiClient, ApiError, ApiResult, FilterOperator, ListController, ListPhase, Mutable,
    RemoveOutcome, Resource, SortDirection,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::list_toolbar::Choice;
use crate::components::{DeleteConfirmButton, ListToolbar, Pagination};
use crate::context::{use_app, AppContext};
use crate::route::{Route, Section};
use crate::store::{store_take_flash, use_app_store};

pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// How a resource shows up as a table
pub trait ListView: Resource {
    const SECTION: Section;
    const HEADERS: &'static [&'static str];
    const FILTERS: &'static [Choice] = &[];
    const SORTS: &'static [Choice] = &[];
    const DELETABLE: bool = false;
    /// Header of a leading image column, if the table has one
    const IMAGE_COLUMN: Option<&'static str> = None;

    fn cells(&self) -> Vec<String>;

    fn thumbnail(&self) -> Option<String> {
        None
    }

    fn remove(_client: ApiClient, id: String) -> LocalFuture<ApiResult<RemoveOutcome>> {
        Box::pin(async move {
            Err(ApiError::validation(format!(
                "{} {} is read-only.",
                Self::KIND.name,
                id
            )))
        })
    }

    /// Extra per-row control (the quest status toggle)
    fn row_action(_list: ListHandle<Self>, _row: &Self) -> Option<AnyView> {
        None
    }
}

/// `ListView::remove` for resources the console may delete
pub fn remove_record<R: Mutable>(client: ApiClient, id: String) -> LocalFuture<ApiResult<RemoveOutcome>> {
    Box::pin(async move { client.resource::<R>().remove(&id).await })
}

/// The controller plus the context needed to drive it
pub struct ListHandle<R: 'static> {
    pub ctx: AppContext,
    pub ctrl: RwSignal<ListController<R>>,
}

impl<R: 'static> Clone for ListHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for ListHandle<R> {}

impl<R: ListView> ListHandle<R> {
    pub fn new(ctx: AppContext, page_size: u32) -> Self {
        Self {
            ctx,
            ctrl: RwSignal::new(ListController::new(page_size)),
        }
    }

    /// Refetch with the controller's current query
    pub fn fetch(self) {
        let Some(ticket) = self.ctrl.try_update(|c| c.begin_fetch()) else {
            return;
        };
        let client = self.ctx.client().resource::<R>();
        spawn_local(async move {
            let result = client.list(&ticket.query).await;
            let auth_failed = matches!(&result, Err(e) if e.requires_login());
            self.ctrl.try_update(|c| c.finish_fetch(&ticket, result));
            if auth_failed {
                self.ctx.logout();
            }
        });
    }

    /// Apply a query change, then refetch
    pub fn change(self, edit: impl FnOnce(&mut ListController<R>)) {
        if self.ctrl.try_update(edit).is_some() {
            self.fetch();
        }
    }

    pub fn confirm_delete(self) {
        let Some(Some(id)) = self.ctrl.try_update(|c| c.confirm_delete()) else {
            return;
        };
        let future = R::remove(self.ctx.client(), id.clone());
        spawn_local(async move {
            let result = future.await;
            let auth_failed = matches!(&result, Err(e) if e.requires_login());
            let removed = self
                .ctrl
                .try_update(|c| c.finish_delete(&id, result))
                .unwrap_or(false);
            if auth_failed {
                self.ctx.logout();
            } else if removed {
                self.fetch();
            }
        });
    }
}

fn render_rows<R: ListView>(list: ListHandle<R>) -> impl IntoView {
    let ctx = list.ctx;
    move || {
        let rows = list.ctrl.with(|c| c.rows().to_vec());
        rows.into_iter()
            .map(|row| {
                let id = row.id().to_string();
                let thumb = row.thumbnail();
                let cells = row.cells();
                let action = R::row_action(list, &row);
                let (pending_id, busy_id, request_id) = (id.clone(), id.clone(), id.clone());
                let detail_id = id.clone();
                let edit_id = id.clone();
                view! {
                    <tr>
                        {R::IMAGE_COLUMN.map(|_| view! {
                            <td class="thumb">{thumb.map(|src| view! { <img src=src alt="" /> })}</td>
                        })}
                        {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                        <td class="actions">
                            {action}
                            {R::SECTION.has_detail().then(|| view! {
                                <button on:click=move |_| ctx.navigate(Route::Detail(R::SECTION, detail_id.clone()))>
                                    "View"
                                </button>
                            })}
                            {R::SECTION.editable().then(|| view! {
                                <button on:click=move |_| ctx.navigate(Route::Edit(R::SECTION, edit_id.clone()))>
                                    "Edit"
                                </button>
                            })}
                            {R::DELETABLE.then(|| view! {
                                <DeleteConfirmButton
                                    pending=Signal::derive(move || {
                                        list.ctrl.with(|c| c.pending_delete() == Some(pending_id.as_str()))
                                    })
                                    disabled=Signal::derive(move || list.ctrl.with(|c| c.is_busy(&busy_id)))
                                    on_request=move |_| {
                                        list.ctrl.update(|c| {
                                            c.request_delete(&request_id);
                                        });
                                    }
                                    on_confirm=move |_| list.confirm_delete()
                                    on_cancel=move |_| list.ctrl.update(|c| c.cancel_delete())
                                />
                            })}
                        </td>
                    </tr>
                }
            })
            .collect_view()
    }
}

/// Table screen for `R`
pub fn list_page<R: ListView>() -> impl IntoView {
    let ctx = use_app();
    let store = use_app_store();
    let config = ctx.client().config().clone();
    let list = ListHandle::<R>::new(ctx, config.default_page_size);
    let flash = store_take_flash(&store);

    list.fetch();
    on_cleanup(move || {
        list.ctrl.try_update(|c| c.dispose());
    });

    view! {
        <section class="list-page">
            <header class="page-header">
                <h1>{R::SECTION.label()}</h1>
                {R::SECTION.editable().then(|| view! {
                    <button class="primary" on:click=move |_| ctx.navigate(Route::New(R::SECTION))>
                        {format!("New {}", R::KIND.name)}
                    </button>
                })}
            </header>

            {flash.map(|message| view! { <div class="alert success">{message}</div> })}

            {move || list.ctrl.with(|c| c.banner().map(str::to_string)).map(|message| view! {
                <div class="alert error">
                    {message}
                    <button class="dismiss" on:click=move |_| list.ctrl.update(|c| c.dismiss_banner())>"×"</button>
                </div>
            })}

            <ListToolbar
                filters=R::FILTERS
                sorts=R::SORTS
                on_search=move |key: String| list.change(|c| c.set_search(key))
                on_filter=move |value: String| list.change(|c| c.set_filter(value, Some(FilterOperator::Equals)))
                on_sort=move |(order, desc): (String, bool)| list.change(|c| {
                    c.set_sort(order, if desc { SortDirection::Desc } else { SortDirection::Asc })
                })
            />

            <table class="data-table">
                <thead>
                    <tr>
                        {R::IMAGE_COLUMN.map(|h| view! { <th>{h}</th> })}
                        {R::HEADERS.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{render_rows(list)}</tbody>
            </table>

            {move || match list.ctrl.with(|c| c.phase().clone()) {
                ListPhase::Loading => Some(view! { <p class="loading">"Loading..."</p> }.into_any()),
                ListPhase::Loaded if list.ctrl.with(|c| c.rows().is_empty()) => {
                    Some(view! { <p class="empty">{format!("No {} found.", R::KIND.plural)}</p> }.into_any())
                }
                _ => None,
            }}

            <Pagination
                page=Signal::derive(move || list.ctrl.with(|c| c.query().page_number))
                total_pages=Signal::derive(move || list.ctrl.with(|c| c.total_pages()))
                total_count=Signal::derive(move || list.ctrl.with(|c| c.total_count()))
                page_size=Signal::derive(move || list.ctrl.with(|c| c.query().page_size))
                page_size_options=config.page_size_options.clone()
                on_page=move |page: u32| list.change(|c| c.set_page(page))
                on_page_size=move |size: u32| list.change(|c| c.set_page_size(size))
            />
        </section>
    }
}
