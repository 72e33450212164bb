//! Picker core logic
//!
//! Pure state with no I/O dependencies; the controller drives it.

pub mod reorder;
pub mod rows;
pub mod selection;
pub mod throttle;
pub mod window;

pub use reorder::move_item;
pub use rows::{ProductRow, ProductRows, RowVariant};
pub use selection::SelectionState;
pub use throttle::Throttle;
pub use window::{ResultWindow, near_end};
