//! Cầu nối WASM: gắn các hiệu ứng tương tác của trang portfolio vào DOM.

mod config;

#[cfg(target_arch = "wasm32")]
mod chart_host;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod page;
#[cfg(target_arch = "wasm32")]
mod timers;

use portfolio_core::{PortfolioConfig, PortfolioError};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::JsValue;

use crate::config::JsPortfolioConfig;

#[cfg(target_arch = "wasm32")]
pub use page::{init_portfolio, PortfolioPage};

/// Gộp object cấu hình (có thể thiếu trường) từ JavaScript với mặc định.
pub fn resolve_config(config: Option<JsValue>) -> Result<PortfolioConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsPortfolioConfig = from_value(js_cfg).map_err(|err| {
                let err = PortfolioError::Config(err.to_string());
                JsValue::from_str(&format_portfolio_error(&err))
            })?;
            Ok(PortfolioConfig::from(cfg))
        }
        _ => Ok(PortfolioConfig::default()),
    }
}

pub(crate) fn format_portfolio_error(err: &PortfolioError) -> String {
    format!("Portfolio error: {err}")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_portfolio(_: Option<JsValue>) -> Result<(), JsValue> {
    Err(JsValue::from_str(
        "portfolio-web chỉ hỗ trợ biên dịch target wasm32",
    ))
}
