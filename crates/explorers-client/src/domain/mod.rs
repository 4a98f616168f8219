//! Domain Layer
//!
//! Resource entities and the query/page types exchanged with the API.

mod collectible;
mod collection;
mod dashboard;
mod entity;
mod memento;
mod page;
mod passport;
mod quest;
mod session;
mod subscription;

pub use collectible::Collectible;
pub use collection::{Collection, CollectionType};
pub use dashboard::DashboardStats;
pub use entity::{Mutable, Resource, ResourceKind};
pub use memento::{Location, Memento, MementoType};
pub use page::{total_pages_for, FilterOperator, ListQuery, PageResult, SortDirection};
pub(crate) use page::WireList;
pub use passport::Passport;
pub use quest::{Difficulty, Quest, QuestStatus};
pub use session::Session;
pub use subscription::Subscription;
