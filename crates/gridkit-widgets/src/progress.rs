//! Indeterminate progress bar shown while the table loads rows.

use gridkit_core::{Element, ElementRef};

/// Pure presentational widget; no state, no events, no inputs. Always builds
/// the same structure: `div.progress-linear > div.container > div.bar`, with
/// the animation left entirely to stylesheet rules.
pub struct ProgressBar {
    root: ElementRef,
}

impl ProgressBar {
    pub fn new() -> Self {
        let root = Element::new("div");
        root.add_class("progress-linear");
        root.set_attribute("role", "progressbar");

        let container = Element::new("div");
        container.add_class("container");

        let bar = Element::new("div");
        bar.add_class("bar");

        container.append_child(&bar);
        root.append_child(&container);

        Self { root }
    }

    pub fn element(&self) -> &ElementRef {
        &self.root
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_fixed_structure() {
        let progress = ProgressBar::new();
        let root = progress.element();

        assert!(root.has_class("progress-linear"));
        assert_eq!(root.attribute("role").as_deref(), Some("progressbar"));

        let container = &root.children()[0];
        assert!(container.has_class("container"));

        let bar = &container.children()[0];
        assert!(bar.has_class("bar"));
        assert_eq!(bar.child_count(), 0);
    }
}
