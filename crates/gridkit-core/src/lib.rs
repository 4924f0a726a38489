//! Element model and scheduling primitives for Gridkit.
//!
//! The hosting table supplies [`Element`] handles for the cells the
//! interaction widgets attach to, and pumps the [`Scheduler`] from its
//! frame loop so timer-driven gestures (long press) make progress.

pub mod element;
pub mod geometry;
pub mod scheduler;

pub use element::{Element, ElementRef};
pub use geometry::Point;
pub use scheduler::{Scheduler, TimerId, TimerRegistration};
