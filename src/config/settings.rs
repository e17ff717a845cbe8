use std::path::Path;

use serde::Deserialize;

use crate::analysis::coverage::{
    AnalysisConfig, DEFAULT_COLOR_PIXEL_THRESHOLD, DEFAULT_WORKING_WIDTH,
};
use crate::pricing::{
    DEFAULT_COVERAGE_THRESHOLD_PERCENT, DEFAULT_PRICE_BW, DEFAULT_PRICE_COLOR, PricingConfig,
};
use crate::render::DEFAULT_DPI;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub working_width: u32,
    pub color_pixel_threshold: u8,
    pub coverage_threshold_percent: f64,
    pub price_bw: u64,
    pub price_color: u64,
    pub dpi: u32,
    pub bind: String,
    pub port: u16,
    pub upload_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            working_width: DEFAULT_WORKING_WIDTH,
            color_pixel_threshold: DEFAULT_COLOR_PIXEL_THRESHOLD,
            coverage_threshold_percent: DEFAULT_COVERAGE_THRESHOLD_PERCENT,
            price_bw: DEFAULT_PRICE_BW,
            price_color: DEFAULT_PRICE_COLOR,
            dpi: DEFAULT_DPI,
            bind: "127.0.0.1".to_string(),
            port: 5000,
            upload_limit: 50 * 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let settings: Settings = serde_yml::from_str(yaml).map_err(|e| {
            crate::error::PrintCostError::config(format!("Failed to parse settings YAML: {e}"))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// 解析・料金計算に使えない値を弾く。
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.working_width == 0 {
            return Err(crate::error::PrintCostError::config(
                "working_width must be greater than 0",
            ));
        }
        if self.dpi == 0 {
            return Err(crate::error::PrintCostError::config(
                "dpi must be greater than 0",
            ));
        }
        if !self.coverage_threshold_percent.is_finite() || self.coverage_threshold_percent < 0.0 {
            return Err(crate::error::PrintCostError::config(format!(
                "coverage_threshold_percent must be a non-negative number, got {}",
                self.coverage_threshold_percent
            )));
        }
        Ok(())
    }

    /// ピクセル解析用の設定を取り出す。
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            working_width: self.working_width,
            color_pixel_threshold: self.color_pixel_threshold,
        }
    }

    /// 料金判定用の設定を取り出す。
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            coverage_threshold_percent: self.coverage_threshold_percent,
            price_bw: self.price_bw,
            price_color: self.price_color,
        }
    }
}
