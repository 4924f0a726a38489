//! Robot-style gesture driver.
//!
//! Drives a [`PointerEvents`] bus and a virtual-time [`Scheduler`] the way a
//! host platform would, so gesture tests read as interaction scripts:
//!
//! ```
//! use gridkit_core::Element;
//! use gridkit_testing::GestureRobot;
//!
//! let mut robot = GestureRobot::new();
//! let cell = Element::new("div");
//!
//! let down = robot.press_at(&cell, 100.0, 100.0);
//! // ...route `down` to the node under test...
//! robot.hold(600);
//! robot.release();
//! ```
//!
//! Down events are returned rather than broadcast, mirroring the hosting
//! contract: the table routes a pointer-down to the node attached to the hit
//! element, while moves and ups arrive through the global bus.

use gridkit_core::{ElementRef, Point, Scheduler};
use gridkit_input::{PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerEvents};

pub struct GestureRobot {
    events: PointerEvents,
    scheduler: Scheduler,
    cursor: Point,
    /// Offset added to viewport positions to form screen positions, for
    /// tests that need the two coordinate spaces to differ.
    screen_offset: Point,
    held: PointerButtons,
}

impl GestureRobot {
    pub fn new() -> Self {
        Self {
            events: PointerEvents::new(),
            scheduler: Scheduler::new(),
            cursor: Point::ZERO,
            screen_offset: Point::ZERO,
            held: PointerButtons::NONE,
        }
    }

    pub fn with_screen_offset(mut self, offset: Point) -> Self {
        self.screen_offset = offset;
        self
    }

    /// The bus the widgets under test should subscribe to.
    pub fn events(&self) -> &PointerEvents {
        &self.events
    }

    /// The scheduler the widgets under test should arm timers on.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Number of live gesture subscriptions on the bus; the leak probe.
    pub fn active_subscriptions(&self) -> usize {
        self.events.active_subscriptions()
    }

    /// Primary-button press over `target`. Returns the down event for the
    /// caller to route to the node under test.
    pub fn press_at(&mut self, target: &ElementRef, x: f32, y: f32) -> PointerEvent {
        self.press_with(target, x, y, PointerButtons::new().with(PointerButton::Primary))
    }

    /// Secondary-button press, for non-primary rejection tests.
    pub fn press_secondary_at(&mut self, target: &ElementRef, x: f32, y: f32) -> PointerEvent {
        self.press_with(
            target,
            x,
            y,
            PointerButtons::new().with(PointerButton::Secondary),
        )
    }

    pub fn press_with(
        &mut self,
        target: &ElementRef,
        x: f32,
        y: f32,
        buttons: PointerButtons,
    ) -> PointerEvent {
        self.cursor = Point::new(x, y);
        self.held = buttons;
        self.pointer_event(PointerEventKind::Down)
            .with_target(target)
    }

    /// Moves the pointer and broadcasts the move on the bus.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.cursor = Point::new(x, y);
        let event = self.pointer_event(PointerEventKind::Move);
        self.events.dispatch(&event);
    }

    /// Releases the pointer at its current position.
    pub fn release(&mut self) {
        self.held = PointerButtons::NONE;
        let event = self.pointer_event(PointerEventKind::Up);
        self.events.dispatch(&event);
    }

    /// Holds the pointer still while virtual time passes, firing any due
    /// timers (press confirmation, ticks).
    pub fn hold(&mut self, ms: u64) {
        self.scheduler.advance(ms);
    }

    fn pointer_event(&self, kind: PointerEventKind) -> PointerEvent {
        let screen = Point::new(
            self.cursor.x + self.screen_offset.x,
            self.cursor.y + self.screen_offset.y,
        );
        PointerEvent::new(kind, self.cursor)
            .with_screen_position(screen)
            .with_buttons(self.held)
    }
}

impl Default for GestureRobot {
    fn default() -> Self {
        Self::new()
    }
}
