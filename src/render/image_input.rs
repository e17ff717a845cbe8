// image crate: standalone image upload -> single RGB page

use crate::analysis::PixelBuffer;
use crate::error::PrintCostError;
use crate::render::{RasterPage, non_empty};

/// Decode a standalone image as page 1.
///
/// The container format is sniffed from the bytes, not the filename.
///
/// # Errors
/// Returns `PrintCostError::UnsupportedFormatError` if the bytes are not a
/// recognized image format. A recognized but corrupt image is returned as a
/// page carrying a `DecodeError`.
pub fn decode_image_page(bytes: &[u8], filename: &str) -> crate::error::Result<RasterPage> {
    let format = image::guess_format(bytes).map_err(|e| {
        PrintCostError::unsupported_format(format!("{filename}: {e}"))
    })?;

    let pixels = image::load_from_memory_with_format(bytes, format)
        .map(PixelBuffer::from_dynamic)
        .map_err(PrintCostError::from)
        .and_then(non_empty);

    Ok(RasterPage {
        page_number: 1,
        pixels,
    })
}
