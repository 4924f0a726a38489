//! Minimal retained element tree.
//!
//! The interaction widgets do not render anything themselves; they observe
//! and decorate elements owned by the hosting table (class toggles, a drag
//! handle child). This module carries just enough of an element model for
//! that contract: a tag, a class list, attributes, a client width, and
//! parent/child links. Interior mutability keeps handles cheaply shareable
//! on the single UI thread.

use crate::geometry::Point;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Shared handle to an element. All widget APIs traffic in these.
pub type ElementRef = Rc<Element>;

pub struct Element {
    tag: &'static str,
    classes: RefCell<SmallVec<[String; 4]>>,
    attributes: RefCell<Vec<(String, String)>>,
    client_width: Cell<f32>,
    position: Cell<Point>,
    children: RefCell<Vec<ElementRef>>,
    parent: RefCell<Weak<Element>>,
}

impl Element {
    pub fn new(tag: &'static str) -> ElementRef {
        Rc::new(Self {
            tag,
            classes: RefCell::new(SmallVec::new()),
            attributes: RefCell::new(Vec::new()),
            client_width: Cell::new(0.0),
            position: Cell::new(Point::ZERO),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
        })
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Adds a class token. Duplicate adds are ignored.
    pub fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    /// Removes a class token. Removing an absent class is a no-op.
    pub fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut attributes = self.attributes.borrow_mut();
        if let Some(entry) = attributes.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_owned();
        } else {
            attributes.push((name.to_owned(), value.to_owned()));
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Rendered width in logical pixels, as laid out by the host.
    pub fn client_width(&self) -> f32 {
        self.client_width.get()
    }

    pub fn set_client_width(&self, width: f32) {
        self.client_width.set(width);
    }

    pub fn position(&self) -> Point {
        self.position.get()
    }

    pub fn set_position(&self, position: Point) {
        self.position.set(position);
    }

    pub fn append_child(self: &Rc<Self>, child: &ElementRef) {
        child.detach();
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(child.clone());
    }

    /// Removes `child` from this element. Returns whether it was a child.
    pub fn remove_child(&self, child: &ElementRef) -> bool {
        let mut children = self.children.borrow_mut();
        let before = children.len();
        children.retain(|c| !Rc::ptr_eq(c, child));
        let removed = children.len() != before;
        if removed {
            *child.parent.borrow_mut() = Weak::new();
        }
        removed
    }

    /// Detaches this element from its parent, if any.
    pub fn detach(self: &Rc<Self>) {
        if let Some(parent) = self.parent.borrow().upgrade() {
            parent.children.borrow_mut().retain(|c| !Rc::ptr_eq(c, self));
        }
        *self.parent.borrow_mut() = Weak::new();
    }

    pub fn parent(&self) -> Option<ElementRef> {
        self.parent.borrow().upgrade()
    }

    pub fn children(&self) -> Vec<ElementRef> {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("classes", &*self.classes.borrow())
            .field("client_width", &self.client_width.get())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}
