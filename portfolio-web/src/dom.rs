#![cfg(target_arch = "wasm32")]

use portfolio_core::{Measure, StyleProp, StyleTarget};
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlElement};

/// `HtmlElement` seen through the core element traits.
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(pub HtmlElement);

impl DomElement {
    pub fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }

    pub fn html(&self) -> &HtmlElement {
        &self.0
    }
}

impl StyleTarget for DomElement {
    fn style(&self, prop: StyleProp) -> Option<String> {
        self.0
            .style()
            .get_property_value(prop.css_name())
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, prop: StyleProp, value: &str) {
        if let Err(err) = self.0.style().set_property(prop.css_name(), value) {
            console::error_1(&err);
        }
    }

    fn clear_style(&self, prop: StyleProp) {
        if let Err(err) = self.0.style().remove_property(prop.css_name()) {
            console::error_1(&err);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class(&self, class: &str, enabled: bool) {
        if let Err(err) = self.0.class_list().toggle_with_force(class, enabled) {
            console::error_1(&err);
        }
    }
}

impl Measure for DomElement {
    fn natural_height(&self) -> f64 {
        f64::from(self.0.scroll_height())
    }
}

/// Every `HtmlElement` matching `selector` within `root`.
pub fn query_all(root: &Document, selector: &str) -> Vec<DomElement> {
    match root.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(DomElement::from_element)
            .collect(),
        Err(err) => {
            console::error_1(&err);
            Vec::new()
        }
    }
}

pub fn query_one(root: &Document, selector: &str) -> Option<DomElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(DomElement::from_element)
}

pub fn query_within(root: &Element, selector: &str) -> Option<DomElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(DomElement::from_element)
}

pub fn by_id(root: &Document, id: &str) -> Option<DomElement> {
    root.get_element_by_id(id).and_then(DomElement::from_element)
}
