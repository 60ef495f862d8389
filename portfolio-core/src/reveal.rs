//! One-shot reveal animation for cards entering the viewport.

use std::cell::Cell;

use tracing::debug;

use crate::style::{css_number, translate_y, StyleProp, StyleTarget};
use crate::PortfolioConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    /// Terminal.
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTransition {
    /// The card went from hidden to revealed on this report.
    Revealed,
    Unchanged,
}

pub struct RevealCard<E> {
    element: E,
    state: Cell<RevealState>,
}

impl<E: StyleTarget> RevealCard<E> {
    /// Puts `element` in its hidden starting pose.
    pub fn prepare(element: E, offset_px: f64, transition: &str) -> Self {
        element.set_style(StyleProp::Opacity, "0");
        element.set_style(StyleProp::Transform, &translate_y(offset_px));
        element.set_style(StyleProp::Transition, transition);
        Self {
            element,
            state: Cell::new(RevealState::Hidden),
        }
    }

    /// Feeds one intersection report into the state machine.
    pub fn observe(&self, is_intersecting: bool) -> RevealTransition {
        match (self.state.get(), is_intersecting) {
            (RevealState::Hidden, true) => {
                self.element.set_style(StyleProp::Opacity, &css_number(1.0));
                self.element.set_style(StyleProp::Transform, &translate_y(0.0));
                self.state.set(RevealState::Revealed);
                RevealTransition::Revealed
            }
            _ => RevealTransition::Unchanged,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state.get()
    }

    pub fn element(&self) -> &E {
        &self.element
    }
}

/// Reveal state of every card marked at startup.
pub struct RevealAnimator<E> {
    cards: Vec<RevealCard<E>>,
}

impl<E: StyleTarget> RevealAnimator<E> {
    pub fn new(elements: Vec<E>, config: &PortfolioConfig) -> Self {
        let cards = elements
            .into_iter()
            .map(|element| {
                RevealCard::prepare(element, config.reveal_offset_px, &config.reveal_transition)
            })
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[RevealCard<E>] {
        &self.cards
    }

    pub fn position(&self, mut matches: impl FnMut(&E) -> bool) -> Option<usize> {
        self.cards.iter().position(|card| matches(card.element()))
    }

    /// Routes an intersection report to card `index`.
    pub fn on_intersection(&self, index: usize, is_intersecting: bool) -> RevealTransition {
        let Some(card) = self.cards.get(index) else {
            return RevealTransition::Unchanged;
        };
        let transition = card.observe(is_intersecting);
        if transition == RevealTransition::Revealed {
            debug!(index, "card revealed");
        }
        transition
    }

    /// Reveals every card still hidden and returns how many changed.
    pub fn reveal_all(&self) -> usize {
        (0..self.cards.len())
            .filter(|&index| self.on_intersection(index, true) == RevealTransition::Revealed)
            .count()
    }

    pub fn revealed_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.state() == RevealState::Revealed)
            .count()
    }
}
