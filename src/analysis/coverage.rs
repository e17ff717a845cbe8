// Color coverage: RGB page raster -> percentage of colored area

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::analysis::{CoverageResult, PageAnalysis, PixelBuffer};
use crate::error::PrintCostError;
use crate::render::RasterPage;

/// Width every page is resampled to before counting pixels.
pub const DEFAULT_WORKING_WIDTH: u32 = 800;

/// Channel spread above which a pixel counts as colored.
///
/// Re-encoding noise on gray content stays around 10-15; blue hyperlinks and
/// colored graphics sit well above 30.
pub const DEFAULT_COLOR_PIXEL_THRESHOLD: u8 = 30;

/// Bicubic resampling.
const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Upper bound on the resampled page area (48 MiB of RGB8).
///
/// Slivers a few pixels wide exceed it after upscaling.
pub const MAX_WORKING_PIXELS: u64 = 16 * 1024 * 1024;

/// Tunables of the coverage analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub working_width: u32,
    pub color_pixel_threshold: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            working_width: DEFAULT_WORKING_WIDTH,
            color_pixel_threshold: DEFAULT_COLOR_PIXEL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

/// Colored-pixel tallies for one page.
#[derive(Debug, Default)]
struct PixelCounts {
    colored: u64,
    red: u64,
    green: u64,
    blue: u64,
}

impl PixelCounts {
    fn tally(image: &RgbImage, threshold: u8) -> Self {
        let mut counts = Self::default();
        for pixel in image.pixels() {
            if channel_spread(pixel) <= threshold {
                continue;
            }
            counts.colored += 1;
            match dominant_channel(pixel) {
                Some(Channel::Red) => counts.red += 1,
                Some(Channel::Green) => counts.green += 1,
                Some(Channel::Blue) => counts.blue += 1,
                None => {}
            }
        }
        counts
    }

    fn into_result(self, total_pixels: u64) -> CoverageResult {
        let percent = |count: u64| count as f64 / total_pixels as f64 * 100.0;
        CoverageResult {
            coverage_percent: round_to(percent(self.colored), 4),
            approx_r: round_to(percent(self.red), 2),
            approx_g: round_to(percent(self.green), 2),
            approx_b: round_to(percent(self.blue), 2),
        }
    }
}

/// `max(R,G,B) - min(R,G,B)`: zero for black, white and gray.
#[inline]
pub fn channel_spread(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    r.max(g).max(b) - r.min(g).min(b)
}

/// The channel strictly greater than both others, if any.
#[inline]
fn dominant_channel(pixel: &Rgb<u8>) -> Option<Channel> {
    let [r, g, b] = pixel.0;
    if r > g && r > b {
        Some(Channel::Red)
    } else if g > r && g > b {
        Some(Channel::Green)
    } else if b > r && b > g {
        Some(Channel::Blue)
    } else {
        None
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Resample a page to `working_width`, keeping its aspect ratio.
///
/// The target height is `round(working_width * height / width)`, never less
/// than one row. A page that already has the working width is returned as-is.
///
/// # Errors
/// Returns `PrintCostError::DecodeError` if the page or the working width is
/// empty, or if the resampled page would exceed [`MAX_WORKING_PIXELS`].
pub fn normalize_scale(buffer: PixelBuffer, working_width: u32) -> crate::error::Result<RgbImage> {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Err(PrintCostError::decode(format!(
            "page raster is empty ({}x{})",
            width, height
        )));
    }
    if working_width == 0 {
        return Err(PrintCostError::decode("working width must be greater than 0"));
    }

    let image = buffer.into_image();
    if width == working_width {
        return Ok(image);
    }

    let target_height = (working_width as f64 * height as f64 / width as f64).round();
    let target_pixels = working_width as f64 * target_height;
    if target_pixels > MAX_WORKING_PIXELS as f64 {
        return Err(PrintCostError::decode(format!(
            "page {}x{} would resample to {}x{}, above the {} pixel limit",
            width, height, working_width, target_height, MAX_WORKING_PIXELS
        )));
    }
    let target_height = (target_height as u32).max(1);

    Ok(imageops::resize(
        &image,
        working_width,
        target_height,
        RESAMPLE_FILTER,
    ))
}

/// Measure the colored area of a page.
///
/// # Errors
/// Returns `PrintCostError::DecodeError` if the raster cannot be normalized.
pub fn try_analyze(
    buffer: PixelBuffer,
    config: &AnalysisConfig,
) -> crate::error::Result<CoverageResult> {
    let image = normalize_scale(buffer, config.working_width)?;
    let total_pixels = image.width() as u64 * image.height() as u64;

    let counts = PixelCounts::tally(&image, config.color_pixel_threshold);
    Ok(counts.into_result(total_pixels))
}

/// Measure the colored area of a page, never failing.
///
/// A page that cannot be analyzed scores [`CoverageResult::zero`], which
/// prices it as black-and-white instead of aborting the document.
pub fn analyze_page(buffer: PixelBuffer, config: &AnalysisConfig) -> CoverageResult {
    match try_analyze(buffer, config) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "page analysis failed, scoring as zero coverage");
            CoverageResult::zero()
        }
    }
}

/// Analyze a rendered page, including pages whose rendering already failed.
pub fn analyze_raster(page: RasterPage, config: &AnalysisConfig) -> PageAnalysis {
    let page_number = page.page_number;
    let coverage = match page.pixels {
        Ok(buffer) => analyze_page(buffer, config),
        Err(e) => {
            tracing::warn!(page = page_number, error = %e, "page could not be decoded, scoring as zero coverage");
            CoverageResult::zero()
        }
    };
    tracing::debug!(
        page = page_number,
        coverage = coverage.coverage_percent,
        "page analyzed"
    );

    PageAnalysis {
        page_number,
        coverage,
    }
}
