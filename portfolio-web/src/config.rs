//! Cấu hình nhận từ JavaScript, mọi trường đều tuỳ chọn.

use portfolio_core::PortfolioConfig;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JsPortfolioConfig {
    #[serde(default)]
    scroll_top_threshold: Option<f64>,
    #[serde(default)]
    parallax_rate: Option<f64>,
    #[serde(default)]
    chart_start_delay_ms: Option<u32>,
    #[serde(default)]
    chart_loading_ms: Option<u32>,
    #[serde(default)]
    reveal_threshold: Option<f64>,
    #[serde(default)]
    reveal_root_margin: Option<String>,
    #[serde(default)]
    reveal_offset_px: Option<f64>,
    #[serde(default)]
    reveal_transition: Option<String>,
    #[serde(default)]
    reveal_unobserve: Option<bool>,
    #[serde(default)]
    scroll_debounce_ms: Option<u32>,
    #[serde(default)]
    focus_outline: Option<String>,
    #[serde(default)]
    focus_outline_offset: Option<String>,
}

impl From<JsPortfolioConfig> for PortfolioConfig {
    fn from(cfg: JsPortfolioConfig) -> Self {
        let mut base = PortfolioConfig::default();
        if let Some(threshold) = cfg.scroll_top_threshold {
            base.scroll_top_threshold = threshold;
        }
        if let Some(rate) = cfg.parallax_rate {
            base.parallax_rate = rate;
        }
        if let Some(ms) = cfg.chart_start_delay_ms {
            base.chart_start_delay_ms = ms;
        }
        if let Some(ms) = cfg.chart_loading_ms {
            base.chart_loading_ms = ms;
        }
        if let Some(threshold) = cfg.reveal_threshold {
            base.reveal_threshold = threshold.clamp(0.0, 1.0);
        }
        if let Some(margin) = cfg.reveal_root_margin {
            base.reveal_root_margin = margin;
        }
        if let Some(offset) = cfg.reveal_offset_px {
            base.reveal_offset_px = offset;
        }
        if let Some(transition) = cfg.reveal_transition {
            base.reveal_transition = transition;
        }
        if let Some(unobserve) = cfg.reveal_unobserve {
            base.reveal_unobserve = unobserve;
        }
        if let Some(ms) = cfg.scroll_debounce_ms {
            base.scroll_debounce_ms = ms;
        }
        if let Some(outline) = cfg.focus_outline {
            base.focus_outline = outline;
        }
        if let Some(offset) = cfg.focus_outline_offset {
            base.focus_outline_offset = offset;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg: JsPortfolioConfig = serde_json::from_str("{}").expect("JSON hợp lệ");
        assert_eq!(PortfolioConfig::from(cfg), PortfolioConfig::default());
    }

    #[test]
    fn provided_fields_override_defaults() {
        let cfg: JsPortfolioConfig = serde_json::from_str(
            r#"{"scroll_top_threshold": 500, "chart_loading_ms": 0, "focus_outline": "3px dashed red"}"#,
        )
        .expect("JSON hợp lệ");
        let merged = PortfolioConfig::from(cfg);

        assert_eq!(merged.scroll_top_threshold, 500.0);
        assert_eq!(merged.chart_loading_ms, 0);
        assert_eq!(merged.focus_outline, "3px dashed red");
        assert_eq!(merged.parallax_rate, -0.5);
    }

    #[test]
    fn reveal_threshold_is_kept_in_range() {
        let cfg: JsPortfolioConfig =
            serde_json::from_str(r#"{"reveal_threshold": 4.0}"#).expect("JSON hợp lệ");
        assert_eq!(PortfolioConfig::from(cfg).reveal_threshold, 1.0);
    }
}
