//! Explorers Admin Client
//!
//! Layered architecture:
//! - domain: resource entities, queries and page results
//! - transport: HTTP abstraction with a reqwest and an in-memory implementation
//! - client: generic per-resource client plus login
//! - session: injected auth session over a durable token store
//! - controller: list/edit view state machines and speculative mutations
//! - forms: per-entity edit forms with local validation

pub mod client;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod forms;
pub mod query;
pub mod session;
pub mod transport;

pub use client::{ApiClient, RemoveOutcome, ResourceClient};
pub use config::{ClientConfig, StorageKeys};
pub use controller::{
    EditController, EditMode, EditPhase, FetchTicket, ListController, ListPhase, PendingMutation,
    SpeculativeMutation, SubmitRequest,
};
pub use domain::{
    Collectible, Collection, DashboardStats, FilterOperator, ListQuery, Memento, Mutable,
    PageResult, Passport, Quest, QuestStatus, Resource, ResourceKind, Session, SortDirection,
    Subscription,
};
pub use error::{ApiError, ApiResult, FieldErrors};
pub use forms::{Attachment, EditForm, Payload};
pub use session::{AuthSession, MemoryTokenStore, RouteGuard, TokenStore};
pub use transport::{HttpTransport, InMemoryApi, ReqwestTransport};
