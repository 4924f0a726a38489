//! Shared gesture constants for consistent pointer handling.
//!
//! The press and resize detectors are routinely composed on the same header
//! cell, so the class names and thresholds they coordinate through live in
//! one place.
//!
//! Values are in logical pixels and milliseconds. For very high-density
//! displays, hosts may want to scale the movement threshold by the device's
//! DPI factor; the fixed value works well for typical desktop displays.

/// Movement tolerance for a held press, in logical pixels.
///
/// While a press is pending confirmation, displacement beyond this distance
/// on either axis (checked independently, not euclidean) ends the press
/// without it ever becoming a long press. Once the press is confirmed,
/// movement no longer cancels it.
pub const PRESS_MOVE_THRESHOLD: f32 = 10.0;

/// Delay before a held press is confirmed as a long press, in milliseconds.
pub const DEFAULT_PRESS_DURATION_MS: u64 = 500;

/// Interval between `pressing` notifications while a long press is held.
pub const PRESS_TICK_INTERVAL_MS: u64 = 50;

/// Class carried by the drag handle the resizer appends to its host.
///
/// Doubles as the exclusion marker for the long-press detector: a
/// pointer-down targeting an element with this class belongs to the resize
/// gesture and never starts a press.
pub const RESIZE_HANDLE_CLASS: &str = "resize-handle";

/// Class carried by the handle when resizing is disabled. Deliberately not a
/// second class next to `resize-handle`, so a disabled handle never matches
/// the activation check.
pub const RESIZE_HANDLE_DISABLED_CLASS: &str = "resize-handle--not-resizable";
