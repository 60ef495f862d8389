//! Scroll-driven helpers: scroll-to-top control, parallax header and anchor
//! resolution.

use crate::selectors::VISIBLE_CLASS;
use crate::style::{css_number, StyleProp, StyleTarget};

/// Shows its button once the page is scrolled past `threshold` pixels.
pub struct ScrollToTop<E> {
    button: E,
    threshold: f64,
}

impl<E: StyleTarget> ScrollToTop<E> {
    pub fn new(button: E, threshold: f64) -> Self {
        Self { button, threshold }
    }

    /// Re-evaluates visibility for `offset`; returns the new visibility.
    pub fn on_scroll(&self, offset: f64) -> bool {
        let visible = offset > self.threshold;
        self.button.set_class(VISIBLE_CLASS, visible);
        visible
    }

    pub fn is_visible(&self) -> bool {
        self.button.has_class(VISIBLE_CLASS)
    }

    pub fn button(&self) -> &E {
        &self.button
    }
}

/// Moves a header by `rate` times the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    rate: f64,
}

impl Parallax {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn offset_for(&self, scroll: f64) -> f64 {
        scroll * self.rate
    }

    pub fn apply<E: StyleTarget>(&self, header: &E, scroll: f64) {
        let offset = self.offset_for(scroll);
        header.set_style(
            StyleProp::Transform,
            &format!("translateY({}px)", css_number(offset)),
        );
    }
}

/// Id targeted by an in-page link, `None` unless `href` is `#<id>`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
