//! Pointer event types and stream plumbing for Gridkit.

pub mod bus;
pub mod types;

pub use bus::{PointerEvents, Subscription};
pub use types::{PointerButton, PointerButtons, PointerEvent, PointerEventKind};

pub mod prelude {
    pub use crate::bus::{PointerEvents, Subscription};
    pub use crate::types::{PointerButton, PointerButtons, PointerEvent, PointerEventKind};
}
