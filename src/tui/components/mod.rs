//! UI components for the collection browser.
//!
//! Components render read-only controller state and keep only their own
//! widget-local state (cursor position, open/closed, input buffer); all
//! table state mutations go through the controller's handlers.

pub mod bulk_input;
pub mod paginator;
pub mod table_view;

pub use bulk_input::BulkInput;
pub use paginator::Paginator;
pub use table_view::TableView;
