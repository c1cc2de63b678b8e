//! UI Components
//!
//! Reusable Leptos components.

mod confirm_modal;
mod launch_table;
mod pagination_bar;
mod toaster;

pub use confirm_modal::ConfirmModal;
pub use launch_table::LaunchTable;
pub use pagination_bar::PaginationBar;
pub use toaster::Toaster;
