//! Page controller owning every interactive component.
//!
//! The host (the browser glue in `portfolio-web`, or a test) collects the
//! elements once, builds a [`Page`] and forwards events to its `on_*`
//! methods. Each method documents the side effects it performs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::chart::{skills_chart_config, ChartHost, ChartLoader, DEFAULT_SKILLS};
use crate::cosmetics::{FocusRing, HoverCursor};
use crate::debounce::{debounce, Debounced};
use crate::reveal::{RevealAnimator, RevealTransition};
use crate::schedule::{Scheduler, TimerId};
use crate::scroll::{anchor_target, Parallax, ScrollToTop};
use crate::style::{Measure, StyleTarget};
use crate::timeline::{TimelineController, TimelineToggle};
use crate::PortfolioConfig;

/// Elements captured at wiring time.
pub struct PageElements<E> {
    /// Content panel of each wired timeline entry, in document order.
    pub timeline_contents: Vec<E>,
    pub timeline_progress: Option<E>,
    pub scroll_to_top: Option<E>,
    pub reveal_cards: Vec<E>,
}

impl<E> Default for PageElements<E> {
    fn default() -> Self {
        Self {
            timeline_contents: Vec::new(),
            timeline_progress: None,
            scroll_to_top: None,
            reveal_cards: Vec::new(),
        }
    }
}

/// Smooth scroll the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Scroll the window to offset 0.
    Top,
    /// Scroll the element with this id to the top of the viewport.
    IntoView { id: String },
}

type SettledScrollHandler = Box<dyn FnMut(f64)>;

pub struct Page<E, H: ChartHost, S: Scheduler> {
    config: PortfolioConfig,
    timeline: TimelineController<E>,
    scroll_to_top: Option<ScrollToTop<E>>,
    parallax: Parallax,
    reveal: RevealAnimator<E>,
    focus: FocusRing,
    chart: ChartLoader<H, S>,
    chart_start: Cell<Option<TimerId>>,
    settled_scroll: Debounced<f64, S>,
    settled_handlers: Rc<RefCell<Vec<SettledScrollHandler>>>,
    scheduler: S,
}

impl<E, H, S> Page<E, H, S>
where
    E: StyleTarget + Measure,
    H: ChartHost + 'static,
    S: Scheduler + Clone + 'static,
{
    /// Builds the controller and puts reveal cards in their hidden pose.
    pub fn new(config: PortfolioConfig, elements: PageElements<E>, chart_host: H, scheduler: S) -> Self {
        let settled_handlers: Rc<RefCell<Vec<SettledScrollHandler>>> = Rc::default();
        let handlers = Rc::clone(&settled_handlers);
        let settled_scroll = debounce(scheduler.clone(), config.scroll_debounce(), move |offset: f64| {
            dispatch_settled(&handlers, offset);
        });

        let chart = ChartLoader::new(
            chart_host,
            scheduler.clone(),
            config.chart_loading_delay(),
            skills_chart_config(&DEFAULT_SKILLS),
        );

        Self {
            timeline: TimelineController::new(elements.timeline_contents, elements.timeline_progress),
            scroll_to_top: elements
                .scroll_to_top
                .map(|button| ScrollToTop::new(button, config.scroll_top_threshold)),
            parallax: Parallax::new(config.parallax_rate),
            reveal: RevealAnimator::new(elements.reveal_cards, &config),
            focus: FocusRing::from_config(&config),
            chart,
            chart_start: Cell::new(None),
            settled_scroll,
            settled_handlers,
            scheduler,
            config,
        }
    }

    /// Schedules the chart load when the page has a chart mount point.
    pub fn start(&self) {
        if !self.chart.has_mount_point() || self.chart_start.get().is_some() {
            return;
        }
        let chart = self.chart.clone();
        let timer = self.scheduler.schedule(
            self.config.chart_start_delay(),
            Box::new(move || {
                chart.start();
            }),
        );
        self.chart_start.set(Some(timer));
        debug!("page started");
    }

    /// Window scroll: updates the scroll-to-top control and the parallax
    /// `header` (queried by the host on each event), then feeds the
    /// debounced settled-scroll slot.
    pub fn on_scroll(&self, offset: f64, header: Option<&E>) {
        if let Some(control) = &self.scroll_to_top {
            control.on_scroll(offset);
        }
        if let Some(header) = header {
            self.parallax.apply(header, offset);
        }
        self.settled_scroll.call(offset);
    }

    pub fn on_title_click(&self, index: usize) -> Option<TimelineToggle> {
        self.timeline.toggle(index)
    }

    pub fn on_scroll_to_top_click(&self) -> ScrollRequest {
        ScrollRequest::Top
    }

    /// In-page link click. The host always suppresses the default jump;
    /// `None` means there is nothing to scroll to.
    pub fn on_anchor_click(&self, href: &str) -> Option<ScrollRequest> {
        anchor_target(href).map(|id| ScrollRequest::IntoView { id: id.to_string() })
    }

    pub fn on_intersection(&self, card: usize, is_intersecting: bool) -> RevealTransition {
        self.reveal.on_intersection(card, is_intersecting)
    }

    /// Fallback when no intersection observer is available.
    pub fn reveal_all(&self) -> usize {
        self.reveal.reveal_all()
    }

    /// Whether the observer should drop a card after this transition.
    pub fn stops_observing(&self, transition: RevealTransition) -> bool {
        self.config.reveal_unobserve && transition == RevealTransition::Revealed
    }

    pub fn on_focus(&self, element: &E) {
        self.focus.on_focus(element);
    }

    pub fn on_blur(&self, element: &E) {
        self.focus.on_blur(element);
    }

    pub fn on_pointer_enter(&self, element: &E) {
        HoverCursor::on_enter(element);
    }

    pub fn on_pointer_leave(&self, element: &E) {
        HoverCursor::on_leave(element);
    }

    /// Registers a handler run with the offset once scrolling has been
    /// quiet for `scroll_debounce_ms`.
    pub fn subscribe_settled_scroll(&self, handler: impl FnMut(f64) + 'static) {
        self.settled_handlers.borrow_mut().push(Box::new(handler));
    }

    /// Cancels every pending timer owned by the page.
    pub fn shutdown(&self) {
        if let Some(timer) = self.chart_start.take() {
            self.scheduler.cancel(timer);
        }
        self.chart.cancel();
        self.settled_scroll.cancel();
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn timeline(&self) -> &TimelineController<E> {
        &self.timeline
    }

    pub fn reveal(&self) -> &RevealAnimator<E> {
        &self.reveal
    }

    pub fn chart(&self) -> &ChartLoader<H, S> {
        &self.chart
    }

    pub fn scroll_to_top(&self) -> Option<&ScrollToTop<E>> {
        self.scroll_to_top.as_ref()
    }
}

fn dispatch_settled(handlers: &RefCell<Vec<SettledScrollHandler>>, offset: f64) {
    // Handlers may subscribe more handlers while running.
    let mut running = std::mem::take(&mut *handlers.borrow_mut());
    for handler in running.iter_mut() {
        handler(offset);
    }
    let mut slot = handlers.borrow_mut();
    running.append(&mut *slot);
    *slot = running;
}
