// JSON レポート: 処理済みページ -> 見積り結果

use serde::Serialize;

use crate::pipeline::page_processor::ProcessedPage;
use crate::pricing::{Category, total_cost};

/// Approximate per-channel share of colored pixels, for charts only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelBreakdown {
    pub approx_r: f64,
    pub approx_g: f64,
    pub approx_b: f64,
}

/// One row of the estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    pub page: u32,
    pub category: Category,
    pub coverage_percent: f64,
    pub channel_breakdown: ChannelBreakdown,
    pub reason: String,
    pub unit_price: u64,
}

impl From<ProcessedPage> for PageReport {
    fn from(page: ProcessedPage) -> Self {
        PageReport {
            page: page.page_number,
            category: page.classification.category,
            coverage_percent: page.coverage.coverage_percent,
            channel_breakdown: ChannelBreakdown {
                approx_r: page.coverage.approx_r,
                approx_g: page.coverage.approx_g,
                approx_b: page.coverage.approx_b,
            },
            reason: page.classification.reason,
            unit_price: page.classification.unit_price,
        }
    }
}

/// Print cost estimate for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub status: String,
    pub filename: String,
    pub total_cost: u64,
    pub pages: Vec<PageReport>,
}

impl CostReport {
    /// Build a report from pages already sorted by page number.
    pub fn new(filename: impl Into<String>, pages: Vec<ProcessedPage>) -> Self {
        let total_cost = total_cost(pages.iter().map(|p| &p.classification));
        CostReport {
            status: "success".to_string(),
            filename: filename.into(),
            total_cost,
            pages: pages.into_iter().map(PageReport::from).collect(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages priced as color.
    pub fn color_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.category == Category::Color)
            .count()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self)
            .expect("serializing a cost report of plain values to JSON must not fail")
    }
}
