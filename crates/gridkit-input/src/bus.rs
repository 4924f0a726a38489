//! Shared pointer-move / pointer-up streams.
//!
//! The platform integration feeds every global pointer event through one
//! [`PointerEvents`] bus; gesture nodes subscribe for the lifetime of a
//! single gesture and drop their [`Subscription`] guards on the terminal
//! event. Dispatch iterates over a snapshot of the handler table so a
//! handler may unsubscribe itself (or a sibling) mid-dispatch, which is
//! exactly what an up-handler does when it tears a gesture down.

use crate::types::{PointerEvent, PointerEventKind};
use log::trace;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type SubscriptionId = u64;
type Handler = Rc<dyn Fn(&PointerEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamKind {
    Move,
    Up,
}

#[derive(Default)]
struct BusInner {
    next_id: SubscriptionId,
    move_handlers: Vec<(SubscriptionId, Handler)>,
    up_handlers: Vec<(SubscriptionId, Handler)>,
}

impl BusInner {
    fn table_mut(&mut self, kind: StreamKind) -> &mut Vec<(SubscriptionId, Handler)> {
        match kind {
            StreamKind::Move => &mut self.move_handlers,
            StreamKind::Up => &mut self.up_handlers,
        }
    }
}

/// Shared handle to the global pointer streams. Clones refer to the same bus.
#[derive(Clone, Default)]
pub struct PointerEvents {
    inner: Rc<RefCell<BusInner>>,
}

impl PointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to global pointer-move events.
    pub fn subscribe_move(&self, handler: impl Fn(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(StreamKind::Move, Rc::new(handler))
    }

    /// Subscribes to global pointer-up events. Cancel events are delivered on
    /// this stream too, since both terminate a gesture.
    pub fn subscribe_up(&self, handler: impl Fn(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(StreamKind::Up, Rc::new(handler))
    }

    fn subscribe(&self, kind: StreamKind, handler: Handler) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.table_mut(kind).push((id, handler));
        trace!("pointer bus: subscription {id} added to {kind:?}");
        Subscription {
            bus: Rc::downgrade(&self.inner),
            kind,
            id: Some(id),
        }
    }

    /// Routes one global pointer event to the matching stream. Down events
    /// are not broadcast: the host delivers those directly to the node whose
    /// element was hit.
    pub fn dispatch(&self, event: &PointerEvent) {
        let kind = match event.kind {
            PointerEventKind::Move => StreamKind::Move,
            PointerEventKind::Up | PointerEventKind::Cancel => StreamKind::Up,
            PointerEventKind::Down => return,
        };
        let snapshot: SmallVec<[Handler; 4]> = {
            let inner = self.inner.borrow();
            let table = match kind {
                StreamKind::Move => &inner.move_handlers,
                StreamKind::Up => &inner.up_handlers,
            };
            table.iter().map(|(_, h)| h.clone()).collect()
        };
        for handler in snapshot {
            handler(event);
        }
    }

    /// Total live subscriptions across both streams. Gesture teardown tests
    /// use this as a leak probe.
    pub fn active_subscriptions(&self) -> usize {
        let inner = self.inner.borrow();
        inner.move_handlers.len() + inner.up_handlers.len()
    }
}

/// Owned handle to a bus subscription. Unsubscribes on drop.
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    kind: StreamKind,
    id: Option<SubscriptionId>,
}

impl Subscription {
    /// Removes the handler from the bus. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(inner) = self.bus.upgrade() {
                inner
                    .borrow_mut()
                    .table_mut(self.kind)
                    .retain(|(sub_id, _)| *sub_id != id);
                trace!("pointer bus: subscription {id} removed from {:?}", self.kind);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
