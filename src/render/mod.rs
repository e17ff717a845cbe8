pub mod image_input;
#[cfg(feature = "pdf")]
pub mod pdfium;

use crate::analysis::PixelBuffer;
use crate::error::PrintCostError;

/// Resolution PDF pages are rasterized at unless configured otherwise.
pub const DEFAULT_DPI: u32 = 100;

/// A rasterized page, or the reason it could not be rasterized.
///
/// Per-page failures are carried here instead of aborting the document.
#[derive(Debug)]
pub struct RasterPage {
    /// 1-based page number.
    pub page_number: u32,
    pub pixels: crate::error::Result<PixelBuffer>,
}

/// Whether the declared filename names a PDF document.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf")
}

/// Rasterize a document into its pages.
///
/// PDFs (by filename extension) are rendered page by page at `dpi`. Any other
/// input is treated as a single image page.
///
/// # Errors
/// Returns `PrintCostError::UnsupportedFormatError` if the document cannot be
/// opened at all. Failures of individual pages are reported through
/// [`RasterPage::pixels`].
pub fn render_pages(
    bytes: &[u8],
    filename: &str,
    dpi: u32,
) -> crate::error::Result<Vec<RasterPage>> {
    if is_pdf_filename(filename) {
        render_pdf(bytes, filename, dpi)
    } else {
        image_input::decode_image_page(bytes, filename).map(|page| vec![page])
    }
}

#[cfg(feature = "pdf")]
fn render_pdf(bytes: &[u8], _filename: &str, dpi: u32) -> crate::error::Result<Vec<RasterPage>> {
    pdfium::render_pdf_pages(bytes, dpi)
}

#[cfg(not(feature = "pdf"))]
fn render_pdf(_bytes: &[u8], filename: &str, _dpi: u32) -> crate::error::Result<Vec<RasterPage>> {
    Err(PrintCostError::unsupported_format(format!(
        "{filename}: PDF support is not enabled in this build"
    )))
}

/// Check that a raster has at least one pixel before handing it to analysis.
pub(crate) fn non_empty(buffer: PixelBuffer) -> crate::error::Result<PixelBuffer> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(PrintCostError::decode(format!(
            "rasterized page is empty ({}x{})",
            buffer.width(),
            buffer.height()
        )));
    }
    Ok(buffer)
}
