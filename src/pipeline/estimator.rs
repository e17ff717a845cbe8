// ドキュメント単位: 入力検証 -> ラスタ化 -> 並列ページ解析 -> 見積り組立

use std::path::Path;

use rayon::prelude::*;

use crate::config::settings::Settings;
use crate::error::PrintCostError;
use crate::pipeline::page_processor::{ProcessedPage, process_page};
use crate::pipeline::report::CostReport;
use crate::render::{RasterPage, render_pages};

/// Estimate the print cost of one uploaded document.
///
/// Phase A: Input validation
/// Phase B: Rasterization (sequential)
/// Phase C: Coverage analysis + classification (rayon parallel)
/// Phase D: Report assembly, in page order
///
/// # Errors
/// - `PrintCostError::EmptyInputError` if the filename or the content is empty
/// - `PrintCostError::UnsupportedFormatError` if the document cannot be opened
/// - `PrintCostError::RenderError` if the PDF renderer is unavailable
///
/// Failures of individual pages never surface; those pages are priced as
/// black-and-white.
pub fn estimate(filename: &str, bytes: &[u8], settings: &Settings) -> crate::error::Result<CostReport> {
    // --- Phase A: Input validation ---
    if filename.trim().is_empty() || bytes.is_empty() {
        return Err(PrintCostError::EmptyInputError);
    }

    // --- Phase B: Rasterization (sequential) ---
    let rasters = render_pages(bytes, filename, settings.dpi)?;

    // --- Phase C: Per-page processing (rayon parallel) ---
    let pages = process_pages(rasters, settings);

    // --- Phase D: Report assembly ---
    let report = CostReport::new(filename, pages);
    tracing::info!(
        filename,
        pages = report.page_count(),
        color_pages = report.color_pages(),
        total_cost = report.total_cost,
        "document estimated"
    );
    Ok(report)
}

/// Analyze and classify pages in parallel, returning them sorted by page number.
pub fn process_pages(rasters: Vec<RasterPage>, settings: &Settings) -> Vec<ProcessedPage> {
    let analysis_config = settings.analysis();
    let pricing_config = settings.pricing();

    let mut pages: Vec<ProcessedPage> = rasters
        .into_par_iter()
        .map(|raster| process_page(raster, &analysis_config, &pricing_config))
        .collect();

    // Sort by page number for deterministic output
    pages.sort_by_key(|p| p.page_number);
    pages
}

/// Estimate a document on disk, using its file name as the declared filename.
pub fn estimate_file(path: &Path, settings: &Settings) -> crate::error::Result<CostReport> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    estimate(&filename, &bytes, settings)
}
