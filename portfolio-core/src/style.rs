//! Element abstraction shared by every component.
//!
//! The page keeps its state in inline styles and classes, so components read
//! it back through [`StyleTarget`] instead of caching it.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Inline style properties the page mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleProp {
    MaxHeight,
    Height,
    Opacity,
    Transform,
    Transition,
    Outline,
    OutlineOffset,
    Cursor,
    Display,
}

impl StyleProp {
    /// CSS property name as accepted by `CSSStyleDeclaration.setProperty`.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProp::MaxHeight => "max-height",
            StyleProp::Height => "height",
            StyleProp::Opacity => "opacity",
            StyleProp::Transform => "transform",
            StyleProp::Transition => "transition",
            StyleProp::Outline => "outline",
            StyleProp::OutlineOffset => "outline-offset",
            StyleProp::Cursor => "cursor",
            StyleProp::Display => "display",
        }
    }
}

/// Read/write access to an element's inline style and class list.
///
/// Methods take `&self`: element handles are shared and the underlying node
/// is mutated in place.
pub trait StyleTarget {
    /// Inline value of `prop`, `None` when unset.
    fn style(&self, prop: StyleProp) -> Option<String>;
    fn set_style(&self, prop: StyleProp, value: &str);
    fn clear_style(&self, prop: StyleProp);
    fn has_class(&self, class: &str) -> bool;
    fn set_class(&self, class: &str, enabled: bool);
}

/// Layout measurement of an element.
pub trait Measure {
    /// Height of the content including overflow (`scrollHeight`), in px.
    fn natural_height(&self) -> f64;
}

/// Formats a CSS number the way JavaScript stringifies it (`-0` prints as `0`).
pub(crate) fn css_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn px(value: f64) -> String {
    format!("{}px", css_number(value))
}

pub(crate) fn translate_y(offset_px: f64) -> String {
    if offset_px == 0.0 {
        "translateY(0)".to_string()
    } else {
        format!("translateY({})", px(offset_px))
    }
}

/// In-memory element for hosts without a DOM (tests, headless snapshots).
///
/// Clones share the same node; equality is node identity.
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    inner: Rc<MemoryNode>,
}

#[derive(Debug, Default)]
struct MemoryNode {
    styles: RefCell<BTreeMap<StyleProp, String>>,
    classes: RefCell<BTreeSet<String>>,
    natural_height: Cell<f64>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_natural_height(height: f64) -> Self {
        let element = Self::default();
        element.set_natural_height(height);
        element
    }

    pub fn set_natural_height(&self, height: f64) {
        self.inner.natural_height.set(height);
    }

    pub fn classes(&self) -> Vec<String> {
        self.inner.classes.borrow().iter().cloned().collect()
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for MemoryElement {}

impl StyleTarget for MemoryElement {
    fn style(&self, prop: StyleProp) -> Option<String> {
        self.inner.styles.borrow().get(&prop).cloned()
    }

    fn set_style(&self, prop: StyleProp, value: &str) {
        if value.is_empty() {
            self.clear_style(prop);
        } else {
            self.inner
                .styles
                .borrow_mut()
                .insert(prop, value.to_string());
        }
    }

    fn clear_style(&self, prop: StyleProp) {
        self.inner.styles.borrow_mut().remove(&prop);
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.classes.borrow().contains(class)
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let mut classes = self.inner.classes.borrow_mut();
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }
}

impl Measure for MemoryElement {
    fn natural_height(&self) -> f64 {
        self.inner.natural_height.get()
    }
}
