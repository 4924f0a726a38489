use gridkit_core::{ElementRef, Point};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
}

/// Bitset of pointer buttons held during an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }
}

/// Pointer event with consumption tracking for gesture disambiguation.
///
/// A handler that claims a gesture consumes the event so other handlers on
/// the same element skip it. The column resizer consumes handle pointer-downs
/// this way, which is what keeps a long-press detector composed on the same
/// header cell from starting a press. Consumption is shared across clones via
/// `Rc<Cell>`.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Position in the host viewport's coordinates.
    pub position: Point,
    /// Position in screen coordinates; drag deltas use this axis so the
    /// gesture stays stable when the viewport itself scrolls mid-drag.
    pub screen_position: Point,
    pub buttons: PointerButtons,
    /// Element the event originated on, when hit testing resolved one.
    pub target: Option<ElementRef>,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            screen_position: position,
            buttons: PointerButtons::NONE,
            target: None,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_screen_position(mut self, screen_position: Point) -> Self {
        self.screen_position = screen_position;
        self
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_target(mut self, target: &ElementRef) -> Self {
        self.target = Some(target.clone());
        self
    }

    /// True when the primary button participates in this event.
    pub fn is_primary(&self) -> bool {
        self.buttons.contains(PointerButton::Primary)
    }

    /// Marks this event as consumed, preventing other handlers from acting
    /// on it. The equivalent of stopping propagation.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_bitset_roundtrip() {
        let buttons = PointerButtons::new()
            .with(PointerButton::Primary)
            .with(PointerButton::Middle);
        assert!(buttons.contains(PointerButton::Primary));
        assert!(buttons.contains(PointerButton::Middle));
        assert!(!buttons.contains(PointerButton::Secondary));
    }

    #[test]
    fn consumption_is_shared_across_clones() {
        let event = PointerEvent::new(PointerEventKind::Down, Point::new(1.0, 2.0));
        let copy = event.clone();
        copy.consume();
        assert!(event.is_consumed());
    }
}
