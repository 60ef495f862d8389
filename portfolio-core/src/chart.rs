//! Skills radar chart: declarative configuration and the deferred loader.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::schedule::{Scheduler, TimerId};
use crate::style::{StyleProp, StyleTarget};
use crate::PortfolioError;

/// Highest rating on the proficiency scale.
pub const MAX_RATING: u8 = 5;

/// One labelled proficiency dimension, rated `0..=MAX_RATING`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Skill {
    pub label: &'static str,
    pub rating: u8,
}

/// 5 = Expert, 4 = Advanced, 3 = Proficient.
pub const DEFAULT_SKILLS: [Skill; 5] = [
    Skill { label: "AI / ML", rating: 5 },
    Skill { label: "Backend & API", rating: 4 },
    Skill { label: "Databases & Vector Stores", rating: 4 },
    Skill { label: "Cloud & DevOps", rating: 3 },
    Skill { label: "Product & Pedagogy", rating: 5 },
];

const AMBER: &str = "rgba(245, 158, 11, 1)";
const AMBER_FILL: &str = "rgba(245, 158, 11, 0.2)";
const AMBER_400: &str = "#fbbf24";
const FAINT_LINE: &str = "rgba(0, 0, 0, 0.1)";
const WHITE: &str = "#fff";

/// Chart.js configuration object, serialized in its camelCase shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Radar,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub point_background_color: String,
    pub point_border_color: String,
    pub point_hover_background_color: String,
    pub point_hover_border_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scales {
    pub r: RadialScale,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RadialScale {
    pub angle_lines: LineStyle,
    pub grid: LineStyle,
    pub point_labels: PointLabels,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineStyle {
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointLabels {
    pub font: Font,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Font {
    pub size: u32,
    pub family: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub backdrop_color: String,
    pub color: String,
    pub step_size: u32,
    pub begin_at_zero: bool,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Legend {
    pub display: bool,
}

/// Radar chart of `skills` in the amber page theme.
pub fn skills_chart_config(skills: &[Skill]) -> ChartConfig {
    let line = || LineStyle {
        color: FAINT_LINE.to_string(),
    };

    ChartConfig {
        kind: ChartKind::Radar,
        data: ChartData {
            labels: skills.iter().map(|s| s.label.to_string()).collect(),
            datasets: vec![Dataset {
                label: "Proficiency".to_string(),
                data: skills.iter().map(|s| f64::from(s.rating)).collect(),
                background_color: AMBER_FILL.to_string(),
                border_color: AMBER.to_string(),
                border_width: 2,
                point_background_color: AMBER.to_string(),
                point_border_color: WHITE.to_string(),
                point_hover_background_color: WHITE.to_string(),
                point_hover_border_color: AMBER.to_string(),
            }],
        },
        options: ChartOptions {
            maintain_aspect_ratio: false,
            scales: Scales {
                r: RadialScale {
                    angle_lines: line(),
                    grid: line(),
                    point_labels: PointLabels {
                        font: Font {
                            size: 14,
                            family: "Aptos Display".to_string(),
                        },
                        color: AMBER_400.to_string(),
                    },
                    ticks: Ticks {
                        backdrop_color: "rgba(0, 0, 0, 0.8)".to_string(),
                        color: AMBER_400.to_string(),
                        step_size: 1,
                        begin_at_zero: true,
                        max: u32::from(MAX_RATING),
                    },
                },
            },
            plugins: Plugins {
                legend: Legend { display: false },
            },
        },
    }
}

/// Environment the chart is mounted into.
pub trait ChartHost {
    /// Handle of a constructed chart.
    type Widget;
    type Element: StyleTarget;

    fn has_mount_point(&self) -> bool;
    fn loading_indicator(&self) -> Option<Self::Element>;
    fn construct(&self, config: &ChartConfig) -> Result<Self::Widget, PortfolioError>;

    /// Called once when construction fails. Hosts without a `tracing`
    /// subscriber surface the error here.
    fn report_failure(&self, _err: &PortfolioError) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    Idle,
    Loading,
    Ready,
    /// Construction failed; the loader stays inert.
    Failed,
    Cancelled,
}

/// Shows a loading state, waits, then builds the chart exactly once.
pub struct ChartLoader<H: ChartHost, S> {
    shared: Rc<LoaderShared<H, S>>,
}

impl<H: ChartHost, S> Clone for ChartLoader<H, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

struct LoaderShared<H: ChartHost, S> {
    host: H,
    scheduler: S,
    delay: Duration,
    config: ChartConfig,
    state: RefCell<LoaderState<H::Widget>>,
}

struct LoaderState<W> {
    phase: ChartPhase,
    timer: Option<TimerId>,
    widget: Option<W>,
}

impl<H, S> ChartLoader<H, S>
where
    H: ChartHost + 'static,
    S: Scheduler + 'static,
{
    pub fn new(host: H, scheduler: S, delay: Duration, config: ChartConfig) -> Self {
        Self {
            shared: Rc::new(LoaderShared {
                host,
                scheduler,
                delay,
                config,
                state: RefCell::new(LoaderState {
                    phase: ChartPhase::Idle,
                    timer: None,
                    widget: None,
                }),
            }),
        }
    }

    /// Begins loading. No-op without a mount point or once a load is
    /// underway or finished; returns whether a load was started.
    pub fn start(&self) -> bool {
        let shared = &self.shared;
        if !shared.host.has_mount_point() {
            debug!("no chart mount point, skipping");
            return false;
        }
        if !matches!(self.phase(), ChartPhase::Idle | ChartPhase::Cancelled) {
            return false;
        }

        set_indicator(&shared.host, true);

        let weak: Weak<LoaderShared<H, S>> = Rc::downgrade(shared);
        let timer = shared.scheduler.schedule(
            shared.delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    complete(&shared);
                }
            }),
        );

        let mut state = shared.state.borrow_mut();
        state.phase = ChartPhase::Loading;
        state.timer = Some(timer);
        debug!(delay_ms = shared.delay.as_millis() as u64, "chart loading");
        true
    }

    /// Abandons a pending load and hides the indicator.
    pub fn cancel(&self) -> bool {
        let timer = {
            let mut state = self.shared.state.borrow_mut();
            if state.phase != ChartPhase::Loading {
                return false;
            }
            state.phase = ChartPhase::Cancelled;
            state.timer.take()
        };
        if let Some(timer) = timer {
            self.shared.scheduler.cancel(timer);
        }
        set_indicator(&self.shared.host, false);
        debug!("chart loading cancelled");
        true
    }

    pub fn phase(&self) -> ChartPhase {
        self.shared.state.borrow().phase
    }

    pub fn has_mount_point(&self) -> bool {
        self.shared.host.has_mount_point()
    }

    pub fn has_widget(&self) -> bool {
        self.shared.state.borrow().widget.is_some()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.shared.config
    }
}

fn complete<H: ChartHost, S>(shared: &LoaderShared<H, S>) {
    shared.state.borrow_mut().timer = None;
    set_indicator(&shared.host, false);

    let (phase, widget) = match shared.host.construct(&shared.config) {
        Ok(widget) => (ChartPhase::Ready, Some(widget)),
        Err(err) => {
            error!(%err, "skills chart construction failed");
            shared.host.report_failure(&err);
            (ChartPhase::Failed, None)
        }
    };

    let mut state = shared.state.borrow_mut();
    state.phase = phase;
    state.widget = widget;
    debug!(?phase, "chart loader settled");
}

fn set_indicator<H: ChartHost>(host: &H, visible: bool) {
    if let Some(indicator) = host.loading_indicator() {
        indicator.set_style(StyleProp::Display, if visible { "block" } else { "none" });
    }
}
