pub mod coverage;

use image::{DynamicImage, RgbImage};
use serde::Serialize;

use crate::error::PrintCostError;

/// An owned RGB8 raster of a single page.
///
/// Alpha is dropped on construction, so every pixel has exactly three
/// channels. The buffer is consumed by the analysis call that scores it.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Build a buffer from tightly packed RGB bytes (3 bytes per pixel).
    pub fn from_raw(width: u32, height: u32, rgb_data: Vec<u8>) -> crate::error::Result<Self> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(3))
            .ok_or_else(|| {
                PrintCostError::decode(format!(
                    "Overflow computing buffer size for {}x{} RGB image",
                    width, height
                ))
            })?;

        if rgb_data.len() != expected_len {
            return Err(PrintCostError::decode(format!(
                "RGB data size mismatch: expected {} bytes, got {}",
                expected_len,
                rgb_data.len()
            )));
        }

        let image = RgbImage::from_raw(width, height, rgb_data)
            .ok_or_else(|| PrintCostError::decode("Failed to create image from RGB data"))?;
        Ok(Self { image })
    }

    /// Convert a decoded or rendered image, discarding any alpha channel.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgb8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub(crate) fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Color coverage of one page.
///
/// `approx_r`, `approx_g` and `approx_b` count colored pixels whose single
/// dominant channel is red, green or blue, as a percentage of *all* pixels.
/// Pixels with no strictly dominant channel fall in no bucket, so the three
/// values need not add up to `coverage_percent`. They are meant for display
/// and never drive pricing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CoverageResult {
    pub coverage_percent: f64,
    pub approx_r: f64,
    pub approx_g: f64,
    pub approx_b: f64,
}

impl CoverageResult {
    /// The neutral result used when a page cannot be analyzed.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Coverage of a page, with its 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageAnalysis {
    pub page_number: u32,
    pub coverage: CoverageResult,
}
