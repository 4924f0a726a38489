//! Shared recording sink for widget output events.

use std::cell::RefCell;
use std::rc::Rc;

/// Clonable event log. Clones share the same entries, so one copy can be
/// moved into a widget callback while the test keeps another for assertions.
pub struct Recorder<T> {
    entries: Rc<RefCell<Vec<T>>>,
}

impl<T> Recorder<T> {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn push(&self, entry: T) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drains and returns everything recorded so far.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }
}

impl<T: Clone> Recorder<T> {
    pub fn items(&self) -> Vec<T> {
        self.entries.borrow().clone()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
