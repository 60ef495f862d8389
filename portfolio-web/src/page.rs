#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use js_sys::{Array, Function};
use portfolio_core::selectors::{
    ANCHOR_LINKS, CARD_REVEAL, FOCUSABLE, HEADER_PARALLAX, HOVERABLE, SCROLL_TO_TOP_ID,
    TIMELINE_CONTENT, TIMELINE_ITEM, TIMELINE_PROGRESS, TIMELINE_TITLE,
};
use portfolio_core::{Page, PageElements, PortfolioConfig, ScrollRequest};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, Element, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::chart_host::DomChartHost;
use crate::dom::{self, DomElement};
use crate::timers::WindowScheduler;

type DomPage = Page<DomElement, DomChartHost, Rc<WindowScheduler>>;
type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Event listener that unregisters itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        event,
        callback,
    })
}

/// Trang portfolio đã gắn sự kiện.
///
/// Giải phóng (`free()`) sẽ gỡ mọi listener, ngắt observer và huỷ việc tải
/// biểu đồ đang chờ.
#[wasm_bindgen]
pub struct PortfolioPage {
    page: Rc<DomPage>,
    observer: Option<IntersectionObserver>,
    _observer_callback: Option<ObserverCallback>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PortfolioPage {
    /// Gắn sự kiện ngay lập tức; gọi sau khi DOM đã sẵn sàng.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<PortfolioPage, JsValue> {
        console_error_panic_hook::set_once();
        let config = crate::resolve_config(config)?;
        let (window, document) = environment()?;
        wire(window, document, config)
    }

    /// Đăng ký hàm nhận độ lệch cuộn sau khi người dùng ngừng cuộn.
    #[wasm_bindgen(js_name = onSettledScroll)]
    pub fn on_settled_scroll(&self, callback: Function) {
        self.page.subscribe_settled_scroll(move |offset| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_f64(offset)) {
                console::error_1(&err);
            }
        });
    }

    #[wasm_bindgen(js_name = revealedCards)]
    pub fn revealed_cards(&self) -> usize {
        self.page.reveal().revealed_count()
    }

    #[wasm_bindgen(js_name = timelineProgress)]
    pub fn timeline_progress(&self) -> f64 {
        self.page.timeline().progress_percent()
    }
}

impl Drop for PortfolioPage {
    fn drop(&mut self) {
        self.page.shutdown();
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

/// Gắn trang khi tài liệu đã tải xong; trang tồn tại suốt vòng đời tài liệu.
#[wasm_bindgen]
pub fn init_portfolio(config: Option<JsValue>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = crate::resolve_config(config)?;
    let (window, document) = environment()?;

    if document.ready_state() != "loading" {
        std::mem::forget(wire(window, document, config)?);
        return Ok(());
    }

    let ready_document = document.clone();
    let on_ready = Closure::once_into_js(move || match wire(window, ready_document, config) {
        Ok(page) => std::mem::forget(page),
        Err(err) => console::error_1(&err),
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

fn environment() -> Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;
    Ok((window, document))
}

fn wire(window: Window, document: Document, config: PortfolioConfig) -> Result<PortfolioPage, JsValue> {
    let scheduler = Rc::new(WindowScheduler::new(window.clone()));

    let mut titles = Vec::new();
    let mut contents = Vec::new();
    for item in dom::query_all(&document, TIMELINE_ITEM) {
        let title = dom::query_within(item.html(), TIMELINE_TITLE);
        let content = dom::query_within(item.html(), TIMELINE_CONTENT);
        if let (Some(title), Some(content)) = (title, content) {
            titles.push(title);
            contents.push(content);
        }
    }

    let elements = PageElements {
        timeline_contents: contents,
        timeline_progress: dom::query_one(&document, TIMELINE_PROGRESS),
        scroll_to_top: dom::by_id(&document, SCROLL_TO_TOP_ID),
        reveal_cards: dom::query_all(&document, CARD_REVEAL),
    };
    let scroll_to_top = elements.scroll_to_top.clone();
    let reveal_threshold = config.reveal_threshold;
    let reveal_root_margin = config.reveal_root_margin.clone();

    let page = Rc::new(Page::new(
        config,
        elements,
        DomChartHost::new(document.clone()),
        scheduler,
    ));
    let mut listeners = Vec::new();

    for (index, title) in titles.iter().enumerate() {
        let page = Rc::clone(&page);
        listeners.push(listen(title.html(), "click", move |_| {
            page.on_title_click(index);
        })?);
    }

    {
        let page = Rc::clone(&page);
        let scroll_window = window.clone();
        let scroll_document = document.clone();
        listeners.push(listen(&window, "scroll", move |_| {
            let offset = scroll_window.scroll_y().unwrap_or(0.0);
            let header = dom::query_one(&scroll_document, HEADER_PARALLAX);
            page.on_scroll(offset, header.as_ref());
        })?);
    }

    if let Some(button) = scroll_to_top {
        let page = Rc::clone(&page);
        let click_window = window.clone();
        let click_document = document.clone();
        listeners.push(listen(button.html(), "click", move |_| {
            perform_scroll(&click_window, &click_document, &page.on_scroll_to_top_click());
        })?);
    }

    for anchor in dom::query_all(&document, ANCHOR_LINKS) {
        let page = Rc::clone(&page);
        let link = anchor.clone();
        let click_window = window.clone();
        let click_document = document.clone();
        listeners.push(listen(anchor.html(), "click", move |event| {
            event.prevent_default();
            let href = link.html().get_attribute("href").unwrap_or_default();
            if let Some(request) = page.on_anchor_click(&href) {
                perform_scroll(&click_window, &click_document, &request);
            }
        })?);
    }

    for element in dom::query_all(&document, FOCUSABLE) {
        let (on_focus, on_blur) = (Rc::clone(&page), Rc::clone(&page));
        let (focused, blurred) = (element.clone(), element.clone());
        listeners.push(listen(element.html(), "focus", move |_| on_focus.on_focus(&focused))?);
        listeners.push(listen(element.html(), "blur", move |_| on_blur.on_blur(&blurred))?);
    }

    for element in dom::query_all(&document, HOVERABLE) {
        let (on_enter, on_leave) = (Rc::clone(&page), Rc::clone(&page));
        let (entered, left) = (element.clone(), element.clone());
        listeners.push(listen(element.html(), "mouseenter", move |_| {
            on_enter.on_pointer_enter(&entered)
        })?);
        listeners.push(listen(element.html(), "mouseleave", move |_| {
            on_leave.on_pointer_leave(&left)
        })?);
    }

    let (observer, observer_callback) =
        match observe_cards(&page, reveal_threshold, &reveal_root_margin) {
            Ok((observer, callback)) => (Some(observer), Some(callback)),
            Err(err) => {
                // Without an observer the cards would stay hidden for good.
                console::error_1(&err);
                page.reveal_all();
                (None, None)
            }
        };

    page.start();
    console::debug_1(&JsValue::from_str(&format!(
        "portfolio page wired: {} timeline entries, {} reveal cards, {} listeners",
        page.timeline().len(),
        page.reveal().cards().len(),
        listeners.len(),
    )));

    Ok(PortfolioPage {
        page,
        observer,
        _observer_callback: observer_callback,
        _listeners: listeners,
    })
}

fn observe_cards(
    page: &Rc<DomPage>,
    threshold: f64,
    root_margin: &str,
) -> Result<(IntersectionObserver, ObserverCallback), JsValue> {
    let routed = Rc::clone(page);
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let index = routed.reveal().position(|card| {
                let element: &Element = card.html();
                *element == target
            });
            let Some(index) = index else {
                continue;
            };
            let transition = routed.on_intersection(index, entry.is_intersecting());
            if routed.stops_observing(transition) {
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    init.set_root_margin(root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    for card in page.reveal().cards() {
        observer.observe(card.element().html());
    }
    Ok((observer, callback))
}

fn perform_scroll(window: &Window, document: &Document, request: &ScrollRequest) {
    match request {
        ScrollRequest::Top => {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
        ScrollRequest::IntoView { id } => {
            if let Some(target) = document.get_element_by_id(id) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    }
}
