//! Focus outline and hover cursor.

use crate::style::{StyleProp, StyleTarget};
use crate::PortfolioConfig;

/// Outline drawn around focused buttons and links.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRing {
    outline: String,
    offset: String,
}

impl FocusRing {
    pub fn new(outline: impl Into<String>, offset: impl Into<String>) -> Self {
        Self {
            outline: outline.into(),
            offset: offset.into(),
        }
    }

    pub fn from_config(config: &PortfolioConfig) -> Self {
        Self::new(&config.focus_outline, &config.focus_outline_offset)
    }

    pub fn on_focus<E: StyleTarget>(&self, element: &E) {
        element.set_style(StyleProp::Outline, &self.outline);
        element.set_style(StyleProp::OutlineOffset, &self.offset);
    }

    // outline-offset is left as is; it has no effect once the outline is gone.
    pub fn on_blur<E: StyleTarget>(&self, element: &E) {
        element.set_style(StyleProp::Outline, "none");
    }
}

pub struct HoverCursor;

impl HoverCursor {
    pub fn on_enter<E: StyleTarget>(element: &E) {
        element.set_style(StyleProp::Cursor, "pointer");
    }

    pub fn on_leave<E: StyleTarget>(element: &E) {
        element.set_style(StyleProp::Cursor, "default");
    }
}
