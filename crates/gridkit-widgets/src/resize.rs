//! Column resize-by-drag.
//!
//! On attach the node appends a drag handle to its host element. A
//! pointer-down targeting that handle starts a drag: each global move emits
//! `resizing` with the width the column would have, and the release emits a
//! terminal `resize` with the host's then-current rendered width. The down
//! event is consumed so a long-press detector on the same cell never sees it.
//!
//! Width bounds in the config are advisory; this node never clamps. The
//! hosting table owns layout and applies its own limits to the widths it
//! receives.

use crate::gesture_constants::{RESIZE_HANDLE_CLASS, RESIZE_HANDLE_DISABLED_CLASS};
use gridkit_core::{Element, ElementRef};
use gridkit_input::{PointerEvent, PointerEvents, Subscription};
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

/// Class reflected on the host element while resizing is enabled.
pub const RESIZEABLE_CLASS: &str = "resizeable";

#[derive(Clone, Copy, Debug)]
pub struct ResizeConfig {
    pub enabled: bool,
    /// Advisory lower bound for consumers; not enforced here.
    pub min_width: Option<f32>,
    /// Advisory upper bound for consumers; not enforced here.
    pub max_width: Option<f32>,
}

impl ResizeConfig {
    pub fn with_bounds(mut self, min_width: Option<f32>, max_width: Option<f32>) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_width: None,
            max_width: None,
        }
    }
}

type WidthHandler = Rc<dyn Fn(f32)>;

struct ResizeInner {
    element: ElementRef,
    events: PointerEvents,
    config: ResizeConfig,
    handle: Option<ElementRef>,
    initial_width: f32,
    anchor_screen_x: f32,
    up_sub: Option<Subscription>,
    move_sub: Option<Subscription>,
    attached: bool,
    disposed: bool,
    on_resizing: Option<WidthHandler>,
    on_resize: Option<WidthHandler>,
}

/// Column resize detector bound to one header cell.
pub struct ResizeNode {
    inner: Rc<RefCell<ResizeInner>>,
}

impl ResizeNode {
    pub fn new(element: &ElementRef, events: &PointerEvents, config: ResizeConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ResizeInner {
                element: element.clone(),
                events: events.clone(),
                config,
                handle: None,
                initial_width: 0.0,
                anchor_screen_x: 0.0,
                up_sub: None,
                move_sub: None,
                attached: false,
                disposed: false,
                on_resizing: None,
                on_resize: None,
            })),
        }
    }

    /// Creates the drag handle and appends it to the host. The handle's
    /// class mirrors the enabled state; a disabled handle never matches the
    /// activation check in [`pointer_down`](Self::pointer_down).
    pub fn attach(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.attached || inner.disposed {
            return;
        }
        inner.attached = true;

        let handle = Element::new("span");
        if inner.config.enabled {
            handle.add_class(RESIZE_HANDLE_CLASS);
            inner.element.add_class(RESIZEABLE_CLASS);
        } else {
            handle.add_class(RESIZE_HANDLE_DISABLED_CLASS);
        }
        inner.element.append_child(&handle);
        inner.handle = Some(handle);
    }

    /// Called on every pointer-move while a drag is active, with the width
    /// the column would have at the pointer's current screen position.
    pub fn on_resizing(&self, handler: impl Fn(f32) + 'static) {
        self.inner.borrow_mut().on_resizing = Some(Rc::new(handler));
    }

    /// Called once per drag on release, with the host's rendered width.
    pub fn on_resize(&self, handler: impl Fn(f32) + 'static) {
        self.inner.borrow_mut().on_resize = Some(Rc::new(handler));
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().up_sub.is_some()
    }

    pub fn min_width(&self) -> Option<f32> {
        self.inner.borrow().config.min_width
    }

    pub fn max_width(&self) -> Option<f32> {
        self.inner.borrow().config.max_width
    }

    /// Host entry point for a pointer-down on the observed element. Only a
    /// down targeting the drag handle starts a gesture; anything else is a
    /// pass-through with no state change and no subscriptions.
    pub fn pointer_down(&self, event: &PointerEvent) {
        let is_handle = event
            .target
            .as_ref()
            .is_some_and(|target| target.has_class(RESIZE_HANDLE_CLASS));
        if !is_handle {
            return;
        }

        let events = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.initial_width = inner.element.client_width();
            inner.anchor_screen_x = event.screen_position.x;
            trace!(
                "resize: drag started at screen-x {} with width {}",
                inner.anchor_screen_x,
                inner.initial_width
            );
            inner.events.clone()
        };

        // Keep the down from reaching other detectors on the same cell.
        event.consume();

        let weak = Rc::downgrade(&self.inner);
        let up_sub = events.subscribe_up(move |_| {
            if let Some(inner) = weak.upgrade() {
                Self::finish(&inner);
            }
        });

        let weak = Rc::downgrade(&self.inner);
        let move_sub = events.subscribe_move(move |event| {
            if let Some(inner) = weak.upgrade() {
                Self::drag(&inner, event);
            }
        });

        let mut inner = self.inner.borrow_mut();
        inner.up_sub = Some(up_sub);
        inner.move_sub = Some(move_sub);
    }

    /// Releases subscriptions and detaches the drag handle. Idempotent.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.up_sub = None;
        inner.move_sub = None;
        if let Some(handle) = inner.handle.take() {
            inner.element.remove_child(&handle);
        }
    }

    fn drag(this: &Rc<RefCell<ResizeInner>>, event: &PointerEvent) {
        let emit = {
            let inner = this.borrow();
            if inner.up_sub.is_none() {
                return;
            }
            let delta = event.screen_position.x - inner.anchor_screen_x;
            inner
                .on_resizing
                .clone()
                .map(|handler| (handler, inner.initial_width + delta))
        };
        if let Some((handler, new_width)) = emit {
            handler(new_width);
        }
    }

    /// Release: drop both subscriptions, then report the rendered width.
    fn finish(this: &Rc<RefCell<ResizeInner>>) {
        let emit = {
            let mut inner = this.borrow_mut();
            if inner.up_sub.is_none() {
                return;
            }
            inner.up_sub = None;
            inner.move_sub = None;
            inner
                .on_resize
                .clone()
                .map(|handler| (handler, inner.element.client_width()))
        };
        debug!("resize: drag finished");
        if let Some((handler, final_width)) = emit {
            handler(final_width);
        }
    }
}
