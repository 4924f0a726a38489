//! Testing utilities and gesture driver for Gridkit widgets.

pub mod recorder;
pub mod robot;

pub use recorder::Recorder;
pub use robot::GestureRobot;
