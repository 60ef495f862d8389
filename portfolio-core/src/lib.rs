//! Logic lõi cho các hiệu ứng tương tác của trang portfolio.
//!
//! Mọi thành phần đều trừu tượng hoá DOM qua [`StyleTarget`], bộ hẹn giờ qua
//! [`Scheduler`] và thư viện biểu đồ qua [`ChartHost`], nên có thể chạy và
//! kiểm thử ngoài trình duyệt.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod chart;
pub mod cosmetics;
pub mod debounce;
pub mod page;
pub mod reveal;
pub mod schedule;
pub mod scroll;
pub mod style;
pub mod timeline;

pub use chart::{
    skills_chart_config, ChartConfig, ChartHost, ChartLoader, ChartPhase, Skill, DEFAULT_SKILLS,
};
pub use cosmetics::{FocusRing, HoverCursor};
pub use debounce::{debounce, Debounced};
pub use page::{Page, PageElements, ScrollRequest};
pub use reveal::{RevealAnimator, RevealCard, RevealState, RevealTransition};
pub use schedule::{ManualScheduler, Scheduler, TimerId};
pub use scroll::{anchor_target, Parallax, ScrollToTop};
pub use style::{Measure, MemoryElement, StyleProp, StyleTarget};
pub use timeline::{TimelineController, TimelineToggle};

/// Selector và class mà trang HTML cung cấp.
pub mod selectors {
    pub const TIMELINE_ITEM: &str = ".timeline-item";
    pub const TIMELINE_TITLE: &str = ".timeline-title";
    pub const TIMELINE_CONTENT: &str = ".timeline-item-content";
    pub const TIMELINE_PROGRESS: &str = ".timeline-progress-fill";
    /// Id (không có `#`) của nút cuộn lên đầu trang.
    pub const SCROLL_TO_TOP_ID: &str = "scrollToTop";
    /// Id (không có `#`) của canvas biểu đồ kỹ năng.
    pub const SKILLS_CHART_ID: &str = "skillsChart";
    pub const CHART_LOADING: &str = ".chart-loading";
    pub const CARD_REVEAL: &str = ".card-reveal";
    pub const HEADER_PARALLAX: &str = ".header-parallax";
    pub const FOCUSABLE: &str = "button, a";
    pub const HOVERABLE: &str = ".tab-btn, .bg-gray-50, .timeline-title";
    pub const ANCHOR_LINKS: &str = "a[href^=\"#\"]";

    pub const EXPANDED_CLASS: &str = "expanded";
    pub const VISIBLE_CLASS: &str = "visible";
}

/// Cấu hình các ngưỡng, độ trễ và giao diện của trang.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Độ lệch cuộn (px) phải vượt qua để hiện nút lên đầu trang.
    pub scroll_top_threshold: f64,
    /// Hệ số nhân độ lệch cuộn cho header parallax.
    pub parallax_rate: f64,
    /// Độ trễ (ms) sau khi gắn sự kiện trước khi bắt đầu tải biểu đồ.
    pub chart_start_delay_ms: u32,
    /// Thời gian (ms) hiển thị trạng thái đang tải của biểu đồ.
    pub chart_loading_ms: u32,
    /// Tỉ lệ diện tích hiển thị để kích hoạt hiệu ứng xuất hiện.
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    /// Khoảng dịch xuống (px) ban đầu của thẻ chưa xuất hiện.
    pub reveal_offset_px: f64,
    pub reveal_transition: String,
    /// Ngừng quan sát thẻ sau khi đã xuất hiện.
    pub reveal_unobserve: bool,
    pub scroll_debounce_ms: u32,
    pub focus_outline: String,
    pub focus_outline_offset: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            scroll_top_threshold: 300.0,
            parallax_rate: -0.5,
            chart_start_delay_ms: 100,
            chart_loading_ms: 1000,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            reveal_offset_px: 20.0,
            reveal_transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
            reveal_unobserve: true,
            scroll_debounce_ms: 16,
            focus_outline: "2px solid #f59e0b".to_string(),
            focus_outline_offset: "2px".to_string(),
        }
    }
}

impl PortfolioConfig {
    pub fn chart_start_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.chart_start_delay_ms))
    }

    pub fn chart_loading_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.chart_loading_ms))
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.scroll_debounce_ms))
    }
}

/// Lỗi chung của các thành phần trang.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("Không tạo được biểu đồ: {0}")]
    Chart(String),
    #[error("Cấu hình không hợp lệ: {0}")]
    Config(String),
    #[error("Lỗi DOM: {0}")]
    Dom(String),
}
