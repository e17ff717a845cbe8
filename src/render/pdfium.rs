// pdfium-render wrapper: PDF bytes -> one RGB raster per page (in-memory only)

use pdfium_render::prelude::*;
use std::path::PathBuf;

use crate::analysis::PixelBuffer;
use crate::error::PrintCostError;
use crate::render::{RasterPage, non_empty};

/// Resolves the path to the pdfium shared library.
///
/// Search order:
/// 1. `PDFIUM_DYNAMIC_LIB_PATH` environment variable
/// 2. `vendor/pdfium/lib/` relative to the project root (for development)
///
/// Returns `Ok(None)` when neither is present, so the caller can fall back to
/// the system library.
fn resolve_pdfium_lib_path() -> crate::error::Result<Option<PathBuf>> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        return Err(PrintCostError::render(format!(
            "PDFIUM_DYNAMIC_LIB_PATH is set to '{}' but the path does not exist",
            path
        )));
    }

    // In development, CARGO_MANIFEST_DIR points to the project root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let vendor_path = PathBuf::from(&manifest_dir).join("vendor/pdfium/lib");
        if vendor_path.exists() {
            return Ok(Some(vendor_path));
        }
    }

    Ok(None)
}

/// Creates a new Pdfium instance by dynamically loading the shared library.
pub fn create_pdfium() -> crate::error::Result<Pdfium> {
    let bindings = match resolve_pdfium_lib_path()? {
        Some(lib_path) => {
            let lib_path_str = lib_path.to_str().ok_or_else(|| {
                PrintCostError::render("pdfium library path contains non-UTF-8 characters")
            })?;
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(lib_path_str))
        }
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| {
        PrintCostError::render(format!(
            "pdfium library not found ({e}): set PDFIUM_DYNAMIC_LIB_PATH or place libpdfium in vendor/pdfium/lib/"
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// Whether a pdfium library can be loaded in this environment.
pub fn is_available() -> bool {
    create_pdfium().is_ok()
}

/// Renders every page of an in-memory PDF at the specified DPI.
///
/// Pages come back in document order, numbered from 1. A page that fails to
/// render is returned with a `DecodeError` instead of failing the document.
///
/// # Errors
/// - `PrintCostError::RenderError` if the pdfium library cannot be loaded or
///   `dpi` is 0
/// - `PrintCostError::UnsupportedFormatError` if the bytes are not a readable PDF
///   or the document has no pages
pub fn render_pdf_pages(pdf_bytes: &[u8], dpi: u32) -> crate::error::Result<Vec<RasterPage>> {
    if dpi == 0 {
        return Err(PrintCostError::render("dpi must be greater than 0"));
    }

    let pdfium = create_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| PrintCostError::unsupported_format(format!("cannot open PDF: {e}")))?;

    let pages = document.pages();
    if pages.len() == 0 {
        return Err(PrintCostError::unsupported_format("PDF has no pages"));
    }

    let mut rasters = Vec::with_capacity(pages.len() as usize);
    for (index, page) in pages.iter().enumerate() {
        let page_number = index as u32 + 1;
        let pixels = render_page(&page, dpi).and_then(non_empty);
        if let Err(e) = &pixels {
            tracing::warn!(page = page_number, error = %e, "failed to render PDF page");
        }
        rasters.push(RasterPage {
            page_number,
            pixels,
        });
    }

    Ok(rasters)
}

/// Renders one page to an RGB raster.
fn render_page(page: &PdfPage<'_>, dpi: u32) -> crate::error::Result<PixelBuffer> {
    // PDF default user unit: 1 point = 1/72 inch
    // At the given DPI, each point maps to (dpi / 72) pixels
    let width_pts = page.width().value;
    let height_pts = page.height().value;
    let width_px = (width_pts * dpi as f32 / 72.0).round() as i32;
    let height_px = (height_pts * dpi as f32 / 72.0).round() as i32;

    let config = PdfRenderConfig::new()
        .set_target_width(width_px)
        .set_target_height(height_px);

    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| PrintCostError::decode(e.to_string()))?;

    Ok(PixelBuffer::from_dynamic(bitmap.as_image()))
}
