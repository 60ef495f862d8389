//! Accordion timeline with a derived progress indicator.

use tracing::debug;

use crate::selectors::EXPANDED_CLASS;
use crate::style::{css_number, px, Measure, StyleProp, StyleTarget};

/// Outcome of a title click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineToggle {
    /// Entry opened to its measured content height (px).
    Expanded { height: f64 },
    Collapsed,
}

/// Owns the content panels of the timeline entries wired at startup.
///
/// Expanded state is read back from the panels on every click: a panel is
/// open while it carries a non-zero `max-height` constraint.
pub struct TimelineController<E> {
    contents: Vec<E>,
    progress: Option<E>,
}

impl<E: StyleTarget + Measure> TimelineController<E> {
    pub fn new(contents: Vec<E>, progress: Option<E>) -> Self {
        Self { contents, progress }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Handles a click on the title of entry `index`.
    ///
    /// Every other entry is collapsed first, then the clicked entry flips.
    /// Returns `None` for an index that was never wired.
    pub fn toggle(&self, index: usize) -> Option<TimelineToggle> {
        let clicked = self.contents.get(index)?;

        for (i, other) in self.contents.iter().enumerate() {
            if i != index {
                collapse(other);
            }
        }

        let outcome = if is_open(clicked) {
            collapse(clicked);
            TimelineToggle::Collapsed
        } else {
            let height = clicked.natural_height();
            clicked.set_style(StyleProp::MaxHeight, &px(height));
            clicked.set_class(EXPANDED_CLASS, true);
            TimelineToggle::Expanded { height }
        };

        self.apply_progress();
        debug!(index, ?outcome, "timeline entry toggled");
        Some(outcome)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.contents
            .get(index)
            .is_some_and(|content| content.has_class(EXPANDED_CLASS))
    }

    pub fn expanded_count(&self) -> usize {
        self.contents
            .iter()
            .filter(|content| content.has_class(EXPANDED_CLASS))
            .count()
    }

    /// Share of expanded entries in percent; `0` without entries.
    pub fn progress_percent(&self) -> f64 {
        if self.contents.is_empty() {
            return 0.0;
        }
        self.expanded_count() as f64 / self.contents.len() as f64 * 100.0
    }

    fn apply_progress(&self) {
        if let Some(fill) = &self.progress {
            let height = format!("{}%", css_number(self.progress_percent()));
            fill.set_style(StyleProp::Height, &height);
        }
    }
}

fn is_open<E: StyleTarget>(content: &E) -> bool {
    content
        .style(StyleProp::MaxHeight)
        .is_some_and(|value| !value.is_empty() && value != "0px")
}

fn collapse<E: StyleTarget>(content: &E) {
    content.clear_style(StyleProp::MaxHeight);
    content.set_class(EXPANDED_CLASS, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::MemoryElement;
    use proptest::prelude::*;

    fn controller(heights: &[f64]) -> (TimelineController<MemoryElement>, Vec<MemoryElement>, MemoryElement) {
        let contents: Vec<_> = heights
            .iter()
            .map(|h| MemoryElement::with_natural_height(*h))
            .collect();
        let fill = MemoryElement::new();
        (
            TimelineController::new(contents.clone(), Some(fill.clone())),
            contents,
            fill,
        )
    }

    #[test]
    fn click_expands_to_natural_height() {
        let (timeline, contents, fill) = controller(&[120.0, 80.0, 60.0, 40.0]);

        assert_eq!(timeline.toggle(1), Some(TimelineToggle::Expanded { height: 80.0 }));
        assert_eq!(contents[1].style(StyleProp::MaxHeight).as_deref(), Some("80px"));
        assert!(contents[1].has_class(EXPANDED_CLASS));
        assert_eq!(fill.style(StyleProp::Height).as_deref(), Some("25%"));
    }

    #[test]
    fn second_click_collapses() {
        let (timeline, contents, fill) = controller(&[120.0, 80.0]);
        timeline.toggle(0);

        assert_eq!(timeline.toggle(0), Some(TimelineToggle::Collapsed));
        assert_eq!(contents[0].style(StyleProp::MaxHeight), None);
        assert!(!contents[0].has_class(EXPANDED_CLASS));
        assert_eq!(fill.style(StyleProp::Height).as_deref(), Some("0%"));
    }

    #[test]
    fn selecting_another_entry_collapses_the_previous_one() {
        let (timeline, contents, _) = controller(&[120.0, 80.0, 60.0]);
        timeline.toggle(0);
        timeline.toggle(2);

        assert!(!timeline.is_expanded(0));
        assert!(timeline.is_expanded(2));
        assert_eq!(contents[0].style(StyleProp::MaxHeight), None);
    }

    #[test]
    fn height_is_measured_on_every_expand() {
        let (timeline, contents, _) = controller(&[100.0]);
        timeline.toggle(0);
        timeline.toggle(0);
        contents[0].set_natural_height(340.0);

        assert_eq!(timeline.toggle(0), Some(TimelineToggle::Expanded { height: 340.0 }));
        assert_eq!(contents[0].style(StyleProp::MaxHeight).as_deref(), Some("340px"));
    }

    #[test]
    fn zero_max_height_counts_as_collapsed() {
        let (timeline, contents, _) = controller(&[50.0]);
        contents[0].set_style(StyleProp::MaxHeight, "0px");

        assert_eq!(timeline.toggle(0), Some(TimelineToggle::Expanded { height: 50.0 }));
    }

    #[test]
    fn unknown_index_and_missing_fill_are_ignored() {
        let contents = vec![MemoryElement::with_natural_height(10.0)];
        let timeline = TimelineController::new(contents, None);

        assert_eq!(timeline.toggle(3), None);
        assert!(timeline.toggle(0).is_some());
        assert_eq!(timeline.progress_percent(), 100.0);
    }

    #[test]
    fn empty_timeline_reports_zero_progress() {
        let timeline: TimelineController<MemoryElement> = TimelineController::new(Vec::new(), None);
        assert!(timeline.is_empty());
        assert_eq!(timeline.progress_percent(), 0.0);
    }

    proptest! {
        #[test]
        fn at_most_one_entry_stays_expanded(
            len in 1usize..8,
            clicks in proptest::collection::vec(0usize..8, 0..40),
        ) {
            let heights = vec![64.0; len];
            let (timeline, _, fill) = controller(&heights);

            for click in clicks {
                timeline.toggle(click % len);
                let expanded = timeline.expanded_count();
                prop_assert!(expanded <= 1);

                let expected = format!("{}%", css_number(expanded as f64 / len as f64 * 100.0));
                prop_assert_eq!(fill.style(StyleProp::Height), Some(expected));
            }
        }
    }
}
