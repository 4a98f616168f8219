//! View Controllers
//!
//! Framework-free state machines behind the list and edit screens.

mod edit;
mod list;
mod speculative;

#[cfg(test)]
mod tests;

pub use edit::{EditController, EditMode, EditPhase, SubmitRequest};
pub use list::{FetchTicket, ListController, ListPhase};
pub use speculative::{PendingMutation, SpeculativeMutation};
