//! Long-press detection for table cells.
//!
//! A press begins on a primary-button pointer-down and is confirmed as a
//! long press when the pointer stays within [`PRESS_MOVE_THRESHOLD`] of the
//! anchor until the configured duration elapses. Confirmed presses emit a
//! `pressing` tick every [`PRESS_TICK_INTERVAL_MS`] until release. Movement
//! beyond the threshold before confirmation ends the press outright; after
//! confirmation movement is irrelevant.
//!
//! The host routes pointer-down events on the observed element to
//! [`LongPressNode::pointer_down`]; move and up events arrive through the
//! global [`PointerEvents`] bus for the duration of one gesture.

use crate::gesture_constants::{
    DEFAULT_PRESS_DURATION_MS, PRESS_MOVE_THRESHOLD, PRESS_TICK_INTERVAL_MS, RESIZE_HANDLE_CLASS,
};
use gridkit_core::{ElementRef, Point, Scheduler, TimerRegistration};
use gridkit_input::{PointerEvent, PointerEvents, Subscription};
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

/// Class reflected on the host element while any press is active.
pub const PRESS_CLASS: &str = "press";
/// Class reflected on the host element while a confirmed long press is held.
pub const LONG_PRESS_CLASS: &str = "longpress";

/// Configuration for one [`LongPressNode`]. `model` is an opaque value the
/// hosting table passes through unchanged in every emitted event, typically
/// its column descriptor.
#[derive(Clone, Debug)]
pub struct LongPressConfig<M> {
    pub enabled: bool,
    pub duration_ms: u64,
    pub model: M,
}

impl<M> LongPressConfig<M> {
    pub fn new(model: M) -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_PRESS_DURATION_MS,
            model,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Payload for `press_start` and `pressing` notifications.
#[derive(Clone)]
pub struct LongPressEvent<M> {
    /// The pointer-down that started the gesture.
    pub event: PointerEvent,
    pub model: M,
}

type PressHandler<M> = Rc<dyn Fn(&LongPressEvent<M>)>;
type EndHandler<M> = Rc<dyn Fn(&M)>;

struct LongPressInner<M> {
    element: ElementRef,
    events: PointerEvents,
    scheduler: Scheduler,
    config: LongPressConfig<M>,
    pressing: bool,
    long_pressing: bool,
    anchor: Point,
    press_timer: Option<TimerRegistration>,
    tick_timer: Option<TimerRegistration>,
    up_sub: Option<Subscription>,
    move_sub: Option<Subscription>,
    disposed: bool,
    on_press_start: Option<PressHandler<M>>,
    on_pressing: Option<PressHandler<M>>,
    on_press_end: Option<EndHandler<M>>,
}

/// Long-press detector bound to one element.
pub struct LongPressNode<M: Clone + 'static> {
    inner: Rc<RefCell<LongPressInner<M>>>,
}

impl<M: Clone + 'static> LongPressNode<M> {
    pub fn new(
        element: &ElementRef,
        events: &PointerEvents,
        scheduler: &Scheduler,
        config: LongPressConfig<M>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LongPressInner {
                element: element.clone(),
                events: events.clone(),
                scheduler: scheduler.clone(),
                config,
                pressing: false,
                long_pressing: false,
                anchor: Point::ZERO,
                press_timer: None,
                tick_timer: None,
                up_sub: None,
                move_sub: None,
                disposed: false,
                on_press_start: None,
                on_pressing: None,
                on_press_end: None,
            })),
        }
    }

    /// Called once when the press duration elapses with the pointer still in
    /// place.
    pub fn on_press_start(&self, handler: impl Fn(&LongPressEvent<M>) + 'static) {
        self.inner.borrow_mut().on_press_start = Some(Rc::new(handler));
    }

    /// Called every tick interval while the long press is held.
    pub fn on_pressing(&self, handler: impl Fn(&LongPressEvent<M>) + 'static) {
        self.inner.borrow_mut().on_pressing = Some(Rc::new(handler));
    }

    /// Called once when the press ends, whether by release or by a movement
    /// threshold breach before confirmation.
    pub fn on_press_end(&self, handler: impl Fn(&M) + 'static) {
        self.inner.borrow_mut().on_press_end = Some(Rc::new(handler));
    }

    pub fn is_pressing(&self) -> bool {
        self.inner.borrow().pressing
    }

    pub fn is_long_pressing(&self) -> bool {
        self.inner.borrow().long_pressing
    }

    /// Host entry point for a pointer-down on the observed element.
    ///
    /// Ignored entirely (no state change, no subscriptions, no events) when
    /// the node is disabled or disposed, the press is not primary-button, or
    /// the event originated on a resize handle.
    pub fn pointer_down(&self, event: &PointerEvent) {
        let (events, scheduler, duration_ms) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || !inner.config.enabled {
                return;
            }
            if !event.is_primary() {
                return;
            }
            if let Some(target) = &event.target {
                if target.has_class(RESIZE_HANDLE_CLASS) {
                    return;
                }
            }

            inner.anchor = event.position;
            inner.pressing = true;
            inner.long_pressing = false;
            inner.element.add_class(PRESS_CLASS);
            trace!("long-press: pressing at ({}, {})", event.position.x, event.position.y);
            (
                inner.events.clone(),
                inner.scheduler.clone(),
                inner.config.duration_ms,
            )
        };

        let weak = Rc::downgrade(&self.inner);
        let up_sub = events.subscribe_up(move |_| {
            if let Some(inner) = weak.upgrade() {
                Self::end_press(&inner);
            }
        });

        let weak = Rc::downgrade(&self.inner);
        let move_sub = events.subscribe_move(move |event| {
            if let Some(inner) = weak.upgrade() {
                Self::watch_threshold(&inner, event);
            }
        });

        let weak = Rc::downgrade(&self.inner);
        let origin = event.clone();
        let press_timer = scheduler.schedule(duration_ms, move || {
            if let Some(inner) = weak.upgrade() {
                Self::confirm(&inner, origin);
            }
        });

        let mut inner = self.inner.borrow_mut();
        inner.up_sub = Some(up_sub);
        inner.move_sub = Some(move_sub);
        inner.press_timer = Some(press_timer);
    }

    /// Cancels any pending timers and releases subscriptions without
    /// emitting. Idempotent; safe when no interaction is active.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.press_timer = None;
        inner.tick_timer = None;
        inner.up_sub = None;
        inner.move_sub = None;
        if inner.pressing {
            inner.element.remove_class(PRESS_CLASS);
            inner.element.remove_class(LONG_PRESS_CLASS);
        }
        inner.pressing = false;
        inner.long_pressing = false;
    }

    /// Pre-confirmation movement watch. Displacement past the threshold on
    /// either axis ends the press; once the long press is confirmed the
    /// stream stays subscribed but movement is ignored.
    fn watch_threshold(this: &Rc<RefCell<LongPressInner<M>>>, event: &PointerEvent) {
        let breached = {
            let inner = this.borrow();
            inner.pressing
                && !inner.long_pressing
                && ((event.position.x - inner.anchor.x).abs() > PRESS_MOVE_THRESHOLD
                    || (event.position.y - inner.anchor.y).abs() > PRESS_MOVE_THRESHOLD)
        };
        if breached {
            debug!("long-press: movement threshold breached, ending press");
            Self::end_press(this);
        }
    }

    /// Press-duration timer callback: promote the press to a long press and
    /// start the tick loop.
    fn confirm(this: &Rc<RefCell<LongPressInner<M>>>, origin: PointerEvent) {
        let emit = {
            let mut inner = this.borrow_mut();
            if !inner.pressing {
                return;
            }
            inner.long_pressing = true;
            inner.press_timer = None;
            inner.element.add_class(LONG_PRESS_CLASS);
            inner.on_press_start.clone().map(|handler| {
                (
                    handler,
                    LongPressEvent {
                        event: origin.clone(),
                        model: inner.config.model.clone(),
                    },
                )
            })
        };
        debug!("long-press: confirmed");
        if let Some((handler, payload)) = emit {
            handler(&payload);
        }
        Self::schedule_tick(this, origin);
    }

    /// Self-rescheduling tick loop; runs only while `long_pressing` holds and
    /// unwinds as soon as the flag clears.
    fn schedule_tick(this: &Rc<RefCell<LongPressInner<M>>>, origin: PointerEvent) {
        let scheduler = {
            let inner = this.borrow();
            if !inner.long_pressing {
                return;
            }
            inner.scheduler.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = scheduler.schedule(PRESS_TICK_INTERVAL_MS, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let emit = {
                let state = inner.borrow();
                if !state.long_pressing {
                    return;
                }
                state.on_pressing.clone().map(|handler| {
                    (
                        handler,
                        LongPressEvent {
                            event: origin.clone(),
                            model: state.config.model.clone(),
                        },
                    )
                })
            };
            if let Some((handler, payload)) = emit {
                handler(&payload);
            }
            Self::schedule_tick(&inner, origin.clone());
        });
        this.borrow_mut().tick_timer = Some(registration);
    }

    /// Universal exit: cancel the pending timer, release subscriptions, then
    /// emit the terminal `press_end`. No-op unless a press is active.
    fn end_press(this: &Rc<RefCell<LongPressInner<M>>>) {
        let emit = {
            let mut inner = this.borrow_mut();
            if !inner.pressing {
                return;
            }
            inner.pressing = false;
            inner.long_pressing = false;
            inner.press_timer = None;
            inner.tick_timer = None;
            inner.up_sub = None;
            inner.move_sub = None;
            inner.element.remove_class(PRESS_CLASS);
            inner.element.remove_class(LONG_PRESS_CLASS);
            inner
                .on_press_end
                .clone()
                .map(|handler| (handler, inner.config.model.clone()))
        };
        debug!("long-press: ended");
        if let Some((handler, model)) = emit {
            handler(&model);
        }
    }
}
