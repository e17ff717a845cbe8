// ページ単位処理: ラスタ -> 被覆率解析 -> 料金判定

use crate::analysis::CoverageResult;
use crate::analysis::coverage::{AnalysisConfig, analyze_raster};
use crate::pricing::{Classification, PricingConfig, classify};
use crate::render::RasterPage;

/// Single page processing result.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedPage {
    pub page_number: u32,
    pub coverage: CoverageResult,
    pub classification: Classification,
}

/// Process a single page: analyze color coverage -> classify.
///
/// Never fails. A page without a usable raster scores zero coverage and is
/// priced as black-and-white.
pub fn process_page(
    raster: RasterPage,
    analysis_config: &AnalysisConfig,
    pricing_config: &PricingConfig,
) -> ProcessedPage {
    let analysis = analyze_raster(raster, analysis_config);
    let classification = classify(
        analysis.page_number,
        analysis.coverage.coverage_percent,
        pricing_config,
    );

    ProcessedPage {
        page_number: analysis.page_number,
        coverage: analysis.coverage,
        classification,
    }
}
