use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use portfolio_core::{
    ChartConfig, ChartHost, ChartPhase, ManualScheduler, MemoryElement, Page, PageElements,
    PortfolioConfig, PortfolioError, RevealTransition, ScrollRequest, StyleProp, StyleTarget,
    TimelineToggle,
};

#[derive(Clone)]
struct RecordingHost {
    mounted: bool,
    indicator: MemoryElement,
    configs: Rc<RefCell<Vec<ChartConfig>>>,
}

impl RecordingHost {
    fn new(mounted: bool) -> Self {
        Self {
            mounted,
            indicator: MemoryElement::new(),
            configs: Rc::default(),
        }
    }
}

impl ChartHost for RecordingHost {
    type Widget = ();
    type Element = MemoryElement;

    fn has_mount_point(&self) -> bool {
        self.mounted
    }

    fn loading_indicator(&self) -> Option<MemoryElement> {
        Some(self.indicator.clone())
    }

    fn construct(&self, config: &ChartConfig) -> Result<(), PortfolioError> {
        self.configs.borrow_mut().push(config.clone());
        Ok(())
    }
}

struct Fixture {
    page: Page<MemoryElement, RecordingHost, ManualScheduler>,
    scheduler: ManualScheduler,
    host: RecordingHost,
    contents: Vec<MemoryElement>,
    fill: MemoryElement,
    button: MemoryElement,
    cards: Vec<MemoryElement>,
}

fn fixture(mounted: bool) -> Fixture {
    fixture_with(PortfolioConfig::default(), mounted)
}

fn fixture_with(config: PortfolioConfig, mounted: bool) -> Fixture {
    let scheduler = ManualScheduler::new();
    let host = RecordingHost::new(mounted);
    let contents: Vec<_> = [180.0, 96.0, 240.0, 64.0]
        .into_iter()
        .map(MemoryElement::with_natural_height)
        .collect();
    let fill = MemoryElement::new();
    let button = MemoryElement::new();
    let cards: Vec<_> = (0..3).map(|_| MemoryElement::new()).collect();

    let page = Page::new(
        config,
        PageElements {
            timeline_contents: contents.clone(),
            timeline_progress: Some(fill.clone()),
            scroll_to_top: Some(button.clone()),
            reveal_cards: cards.clone(),
        },
        host.clone(),
        scheduler.clone(),
    );

    Fixture {
        page,
        scheduler,
        host,
        contents,
        fill,
        button,
        cards,
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn timeline_clicks_keep_a_single_entry_open() {
    let f = fixture(false);

    assert_eq!(
        f.page.on_title_click(2),
        Some(TimelineToggle::Expanded { height: 240.0 })
    );
    assert_eq!(f.fill.style(StyleProp::Height).as_deref(), Some("25%"));

    f.page.on_title_click(0);
    assert!(f.contents[0].has_class("expanded"));
    assert!(!f.contents[2].has_class("expanded"));
    assert_eq!(f.contents[2].style(StyleProp::MaxHeight), None);
    assert_eq!(f.fill.style(StyleProp::Height).as_deref(), Some("25%"));

    assert_eq!(f.page.on_title_click(0), Some(TimelineToggle::Collapsed));
    assert_eq!(f.fill.style(StyleProp::Height).as_deref(), Some("0%"));
}

#[test]
fn scrolling_drives_button_parallax_and_settled_handlers() {
    let f = fixture(false);
    let header = MemoryElement::new();
    let settled = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&settled);
    f.page
        .subscribe_settled_scroll(move |offset| sink.borrow_mut().push(offset));

    f.page.on_scroll(300.0, Some(&header));
    assert!(!f.button.has_class("visible"));
    assert_eq!(
        header.style(StyleProp::Transform).as_deref(),
        Some("translateY(-150px)")
    );

    f.scheduler.advance_to(ms(5));
    f.page.on_scroll(640.0, None);
    assert!(f.button.has_class("visible"));
    assert_eq!(
        header.style(StyleProp::Transform).as_deref(),
        Some("translateY(-150px)")
    );

    f.scheduler.advance_to(ms(20));
    assert!(settled.borrow().is_empty());
    f.scheduler.advance_to(ms(21));
    assert_eq!(*settled.borrow(), vec![640.0]);
}

#[test]
fn chart_loads_after_start_delay_and_loading_window() {
    let f = fixture(true);
    f.page.start();
    f.page.start();

    f.scheduler.advance_to(ms(99));
    assert_eq!(f.host.indicator.style(StyleProp::Display), None);

    f.scheduler.advance_to(ms(100));
    assert_eq!(
        f.host.indicator.style(StyleProp::Display).as_deref(),
        Some("block")
    );
    assert_eq!(f.page.chart().phase(), ChartPhase::Loading);

    f.scheduler.advance_to(ms(1099));
    assert!(f.host.configs.borrow().is_empty());

    f.scheduler.advance_to(ms(1100));
    assert_eq!(
        f.host.indicator.style(StyleProp::Display).as_deref(),
        Some("none")
    );
    assert_eq!(f.host.configs.borrow().len(), 1);
    assert_eq!(f.host.configs.borrow()[0].data.labels.len(), 5);
    assert_eq!(f.page.chart().phase(), ChartPhase::Ready);
}

#[test]
fn page_without_chart_mount_schedules_nothing() {
    let f = fixture(false);
    f.page.start();

    assert_eq!(f.scheduler.pending(), 0);
    f.scheduler.advance(ms(5000));
    assert_eq!(f.host.indicator.style(StyleProp::Display), None);
    assert!(f.host.configs.borrow().is_empty());
}

#[test]
fn shutdown_cancels_pending_work() {
    let f = fixture(true);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    f.page.subscribe_settled_scroll(move |_| counter.set(counter.get() + 1));

    f.page.start();
    f.page.on_scroll(10.0, None);
    f.page.shutdown();
    f.scheduler.advance(ms(5000));

    assert_eq!(calls.get(), 0);
    assert!(f.host.configs.borrow().is_empty());
    assert_eq!(f.scheduler.pending(), 0);
}

#[test]
fn cards_reveal_once() {
    let f = fixture(false);
    assert!(f
        .cards
        .iter()
        .all(|card| card.style(StyleProp::Opacity).as_deref() == Some("0")));

    let index = f
        .page
        .reveal()
        .position(|el| *el == f.cards[1])
        .expect("card is wired");
    assert_eq!(f.page.on_intersection(index, true), RevealTransition::Revealed);
    assert_eq!(f.page.on_intersection(index, true), RevealTransition::Unchanged);

    assert_eq!(f.cards[1].style(StyleProp::Opacity).as_deref(), Some("1"));
    assert_eq!(f.cards[0].style(StyleProp::Opacity).as_deref(), Some("0"));
    assert_eq!(f.page.reveal().revealed_count(), 1);
}

#[test]
fn revealed_cards_leave_the_observer_unless_configured_otherwise() {
    let f = fixture(false);
    let transition = f.page.on_intersection(0, true);
    assert!(f.page.stops_observing(transition));
    assert!(!f.page.stops_observing(f.page.on_intersection(0, true)));
    assert!(!f.page.stops_observing(f.page.on_intersection(1, false)));

    let config = PortfolioConfig {
        reveal_unobserve: false,
        ..PortfolioConfig::default()
    };
    let f = fixture_with(config, false);
    let transition = f.page.on_intersection(0, true);
    assert_eq!(transition, RevealTransition::Revealed);
    assert!(!f.page.stops_observing(transition));
}

#[test]
fn reveal_all_shows_every_card_without_an_observer() {
    let f = fixture(false);
    f.page.on_intersection(2, true);

    assert_eq!(f.page.reveal_all(), 2);
    assert_eq!(f.page.reveal().revealed_count(), f.cards.len());
    for card in &f.cards {
        assert_eq!(card.style(StyleProp::Opacity).as_deref(), Some("1"));
        assert_eq!(card.style(StyleProp::Transform).as_deref(), Some("translateY(0)"));
    }
}

#[test]
fn scroll_requests_for_controls_and_anchors() {
    let f = fixture(false);

    assert_eq!(f.page.on_scroll_to_top_click(), ScrollRequest::Top);
    assert_eq!(
        f.page.on_anchor_click("#experience"),
        Some(ScrollRequest::IntoView {
            id: "experience".to_string()
        })
    );
    assert_eq!(f.page.on_anchor_click("#"), None);
}

#[test]
fn focus_and_hover_cosmetics() {
    let f = fixture(false);
    let link = MemoryElement::new();

    f.page.on_focus(&link);
    assert_eq!(
        link.style(StyleProp::Outline).as_deref(),
        Some("2px solid #f59e0b")
    );
    f.page.on_blur(&link);
    assert_eq!(link.style(StyleProp::Outline).as_deref(), Some("none"));

    f.page.on_pointer_enter(&link);
    assert_eq!(link.style(StyleProp::Cursor).as_deref(), Some("pointer"));
    f.page.on_pointer_leave(&link);
    assert_eq!(link.style(StyleProp::Cursor).as_deref(), Some("default"));
}
