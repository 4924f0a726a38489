//! Interaction widgets for Gridkit data tables.
//!
//! Three independent leaf widgets, sharing only the element model and the
//! global pointer streams:
//!
//! - [`ProgressBar`]: presentational loading indicator.
//! - [`LongPressNode`]: long-press detection with periodic `pressing` ticks,
//!   used for header drag-arming.
//! - [`ResizeNode`]: column resize-by-drag via a handle sub-element.
//!
//! The long-press and resize detectors cooperate when composed on the same
//! header cell: the resizer's handle carries [`gesture_constants::RESIZE_HANDLE_CLASS`],
//! which the long-press detector treats as an exclusion marker.

pub mod gesture_constants;
pub mod long_press;
pub mod progress;
pub mod resize;

pub use long_press::{LongPressConfig, LongPressEvent, LongPressNode};
pub use progress::ProgressBar;
pub use resize::{ResizeConfig, ResizeNode};
