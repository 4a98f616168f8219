//! List View Controller
//!
//! State behind every list screen: the query, the current page, per-row busy
//! flags and the delete confirmation. Async work is split into `begin_*` and
//! `finish_*` so a view can run the request without holding the controller;
//! the `async` helpers chain the two for callers that can.

use std::collections::BTreeSet;

use crate::client::{RemoveOutcome, ResourceClient};
use crate::domain::{
    FilterOperator, ListQuery, Mutable, PageResult, Quest, QuestStatus, Resource, SortDirection,
};
use crate::error::{ApiError, ApiResult};

use super::speculative::{PendingMutation, SpeculativeMutation};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Banner text
    Errored(String),
}

/// Identifies one fetch; results for an older ticket are dropped
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub id: u64,
    pub query: ListQuery,
}

fn resource_id<R: Resource>(row: &R) -> &str {
    row.id()
}

#[derive(Debug)]
pub struct ListController<R> {
    query: ListQuery,
    phase: ListPhase,
    page: PageResult<R>,
    /// Latest issued fetch ticket
    ticket: u64,
    disposed: bool,
    busy: BTreeSet<String>,
    pending_delete: Option<String>,
    banner: Option<String>,
    needs_login: bool,
}

impl<R: Resource> ListController<R> {
    pub fn new(page_size: u32) -> Self {
        Self::with_query(ListQuery::new(page_size))
    }

    pub fn with_query(query: ListQuery) -> Self {
        Self {
            query,
            phase: ListPhase::Idle,
            page: PageResult::default(),
            ticket: 0,
            disposed: false,
            busy: BTreeSet::new(),
            pending_delete: None,
            banner: None,
            needs_login: false,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn rows(&self) -> &[R] {
        &self.page.items
    }

    pub fn page(&self) -> &PageResult<R> {
        &self.page
    }

    pub fn total_count(&self) -> u64 {
        self.page.total_count
    }

    pub fn total_pages(&self) -> u32 {
        self.page.total_pages
    }

    /// Error from the last fetch or mutation, if any
    pub fn banner(&self) -> Option<&str> {
        match &self.phase {
            ListPhase::Errored(message) => Some(message.as_str()),
            _ => self.banner.as_deref(),
        }
    }

    pub fn set_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Set after an auth failure; the view routes to login
    pub fn needs_login(&self) -> bool {
        self.needs_login
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.contains(id)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ---- query changes; each resets to page 1 except paging itself ----

    pub fn set_search(&mut self, key: impl Into<String>) {
        self.query.key = Some(key.into());
        self.query.page_number = 1;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>, operator: Option<FilterOperator>) {
        self.query.filter = Some(filter.into());
        self.query.operator = operator;
        self.query.page_number = 1;
    }

    pub fn set_sort(&mut self, order: impl Into<String>, direction: SortDirection) {
        self.query.order = Some(order.into());
        self.query.direction = Some(direction);
        self.query.page_number = 1;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.query.page_size = page_size.max(1);
        self.query.page_number = 1;
    }

    pub fn set_page(&mut self, page_number: u32) {
        self.query.page_number = page_number.max(1);
    }

    // ---- fetching ----

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.ticket += 1;
        self.phase = ListPhase::Loading;
        FetchTicket {
            id: self.ticket,
            query: self.query.clone(),
        }
    }

    /// Apply a fetch result; `false` when it was superseded or the view is gone
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, result: ApiResult<PageResult<R>>) -> bool {
        if self.disposed || ticket.id != self.ticket {
            log::debug!(
                "dropping stale {} page (ticket {}, current {})",
                R::KIND.plural,
                ticket.id,
                self.ticket
            );
            return false;
        }
        match result {
            Ok(page) => {
                log::debug!(
                    "loaded {} page {}/{} ({} total)",
                    R::KIND.plural,
                    page.page_number,
                    page.total_pages,
                    page.total_count
                );
                self.page = page;
                self.phase = ListPhase::Loaded;
            }
            Err(err) => {
                log::warn!("loading {} failed: {}", R::KIND.plural, err);
                self.needs_login |= err.requires_login();
                self.page = PageResult {
                    page_number: ticket.query.page_number,
                    ..PageResult::default()
                };
                self.phase = ListPhase::Errored(err.user_message());
            }
        }
        true
    }

    pub async fn refresh(&mut self, client: &ResourceClient<R>) -> bool {
        let ticket = self.begin_fetch();
        let result = client.list(&ticket.query).await;
        self.finish_fetch(&ticket, result)
    }

    /// Stop applying results; called when the view unmounts
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.pending_delete = None;
    }

    // ---- speculative row mutations ----

    /// Apply `change` locally and mark the row busy
    ///
    /// Fails for a missing row or one that already has a change in flight.
    pub fn begin_mutation(
        &mut self,
        id: &str,
        failure_message: impl Into<String>,
        change: impl FnOnce(&mut R),
    ) -> ApiResult<PendingMutation<R>> {
        if self.busy.contains(id) {
            return Err(ApiError::validation(format!(
                "A change to {} {} is already in progress.",
                R::KIND.name,
                id
            )));
        }
        let mutation =
            SpeculativeMutation::apply(&mut self.page.items, resource_id::<R>, id, change).ok_or_else(
                || ApiError::NotFound {
                    kind: R::KIND.name,
                    id: id.to_string(),
                },
            )?;
        self.busy.insert(id.to_string());
        self.banner = None;
        Ok(PendingMutation {
            mutation,
            failure_message: failure_message.into(),
        })
    }

    /// Commit the server's row or roll back and raise the banner
    pub fn finish_mutation(&mut self, pending: PendingMutation<R>, result: ApiResult<R>) -> bool {
        self.busy.remove(pending.id());
        if self.disposed {
            return false;
        }
        match result {
            Ok(confirmed) => {
                pending.mutation.commit(&mut self.page.items, confirmed);
                true
            }
            Err(err) => {
                log::warn!("{} {} change rolled back: {}", R::KIND.name, pending.id(), err);
                self.needs_login |= err.requires_login();
                pending.mutation.rollback(&mut self.page.items);
                self.banner = Some(pending.failure_message);
                false
            }
        }
    }

    // ---- delete with confirmation ----

    /// Open the confirmation for a row
    pub fn request_delete(&mut self, id: &str) -> bool {
        if self.busy.contains(id) || !self.page.items.iter().any(|r| r.id() == id) {
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Row awaiting confirmation
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Confirm; returns the id to send the delete for
    pub fn confirm_delete(&mut self) -> Option<String> {
        let id = self.pending_delete.take()?;
        self.busy.insert(id.clone());
        Some(id)
    }

    /// `true` when the row was removed and the page should be refetched
    pub fn finish_delete(&mut self, id: &str, result: ApiResult<RemoveOutcome>) -> bool {
        self.busy.remove(id);
        if self.disposed {
            return false;
        }
        match result {
            Ok(outcome) if outcome.success => {
                self.page.items.retain(|r| r.id() != id);
                self.page.total_count = self.page.total_count.saturating_sub(1);
                self.banner = None;
                true
            }
            Ok(_) => {
                self.banner = Some(R::KIND.delete_error(id));
                false
            }
            Err(err) => {
                log::warn!("deleting {} {} failed: {}", R::KIND.name, id, err);
                self.needs_login |= err.requires_login();
                self.banner = Some(match err {
                    ApiError::Auth(_) => err.user_message(),
                    _ => R::KIND.delete_error(id),
                });
                false
            }
        }
    }
}

impl<R: Mutable> ListController<R> {
    /// Send the confirmed delete and refetch on success
    pub async fn delete_confirmed(&mut self, client: &ResourceClient<R>) -> bool {
        let Some(id) = self.confirm_delete() else {
            return false;
        };
        let result = client.remove(&id).await;
        let removed = self.finish_delete(&id, result);
        if removed {
            self.refresh(client).await;
        }
        removed
    }
}

impl ListController<Quest> {
    /// Flip the quest's status locally; the caller sends the returned status
    pub fn begin_toggle(&mut self, id: &str) -> ApiResult<(PendingMutation<Quest>, QuestStatus)> {
        let mut next = QuestStatus::Active;
        let pending = self.begin_mutation(
            id,
            format!("Failed to update status for quest {}.", id),
            |quest| {
                next = quest.status.toggled();
                quest.status = next;
            },
        )?;
        Ok((pending, next))
    }

    pub async fn toggle_status(&mut self, client: &ResourceClient<Quest>, id: &str) -> bool {
        let (pending, next) = match self.begin_toggle(id) {
            Ok(started) => started,
            Err(err) => {
                self.banner = Some(err.user_message());
                return false;
            }
        };
        let result = client.set_status(id, next).await;
        self.finish_mutation(pending, result)
    }
}
