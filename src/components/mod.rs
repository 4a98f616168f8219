//! UI Components
//!
//! Reusable Leptos components and the generic resource screens.

mod dashboard_page;
mod delete_confirm_button;
mod detail_page;
mod edit_page;
mod form_views;
mod layout;
mod list_page;
mod list_toolbar;
mod list_views;
mod login_page;
mod pagination;

pub use dashboard_page::DashboardPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use detail_page::detail_page;
pub use edit_page::edit_page;
pub use layout::Layout;
pub use list_page::list_page;
pub use list_toolbar::ListToolbar;
pub use login_page::LoginPage;
pub use pagination::Pagination;
