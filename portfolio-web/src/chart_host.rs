#![cfg(target_arch = "wasm32")]

use portfolio_core::selectors::{CHART_LOADING, SKILLS_CHART_ID};
use portfolio_core::{ChartConfig, ChartHost, PortfolioError};
use wasm_bindgen::prelude::*;
use web_sys::{console, Document};

use crate::dom::{self, DomElement};

#[wasm_bindgen]
extern "C" {
    /// Global `Chart` constructor from Chart.js.
    #[wasm_bindgen(js_name = Chart)]
    pub type ChartWidget;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &web_sys::Element, config: &JsValue) -> Result<ChartWidget, JsValue>;
}

/// Mounts the skills chart into `#skillsChart`, looked up on every call.
pub struct DomChartHost {
    document: Document,
}

impl DomChartHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ChartHost for DomChartHost {
    type Widget = ChartWidget;
    type Element = DomElement;

    fn has_mount_point(&self) -> bool {
        self.document.get_element_by_id(SKILLS_CHART_ID).is_some()
    }

    fn loading_indicator(&self) -> Option<DomElement> {
        dom::query_one(&self.document, CHART_LOADING)
    }

    fn construct(&self, config: &ChartConfig) -> Result<ChartWidget, PortfolioError> {
        let canvas = self
            .document
            .get_element_by_id(SKILLS_CHART_ID)
            .ok_or_else(|| PortfolioError::Dom(format!("không tìm thấy #{SKILLS_CHART_ID}")))?;
        let config = serde_wasm_bindgen::to_value(config)
            .map_err(|err| PortfolioError::Chart(format!("không serialize được config: {err}")))?;
        ChartWidget::new(&canvas, &config).map_err(|err| PortfolioError::Chart(format!("{err:?}")))
    }

    fn report_failure(&self, err: &PortfolioError) {
        console::error_1(&JsValue::from_str(&crate::format_portfolio_error(err)));
    }
}
