//! PDF to PNG transform via pdfium.
//!
//! Each page is rasterized at twice the base rendering scale (roughly
//! 144 DPI) and encoded as PNG. The pdfium shared library is looked up next
//! to the executable first, then on the system library path; a missing
//! library is an internal fault, not a payload error.

use std::io::Cursor;

use image::ImageFormat;
use pdfium_render::prelude::*;

use super::TransformError;

/// Rendering scale relative to the PDF's native 72 DPI coordinate space.
const RENDER_SCALE: f32 = 2.0;

/// Rasterize every page of a PDF into a PNG buffer, in page order.
pub fn pdf_to_pngs(bytes: &[u8]) -> Result<Vec<Vec<u8>>, TransformError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| TransformError::Invalid(format!("invalid PDF data: {e:?}")))?;

    let render_config = PdfRenderConfig::new().scale_page_by_factor(RENDER_SCALE);

    let pages = document.pages();
    let mut outputs = Vec::with_capacity(pages.len() as usize);

    for (index, page) in pages.iter().enumerate() {
        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            TransformError::Invalid(format!("failed to render page {}: {e:?}", index + 1))
        })?;

        let image = bitmap.as_image();
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| TransformError::Internal(format!("PNG encoding failed: {e}")))?;

        outputs.push(buffer);
    }

    Ok(outputs)
}

/// Whether a pdfium library can be bound in this environment.
///
/// Used by tests to skip rendering assertions on hosts without pdfium.
pub fn pdfium_available() -> bool {
    bind_pdfium().is_ok()
}

fn bind_pdfium() -> Result<Pdfium, TransformError> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| TransformError::Internal(format!("pdfium library unavailable: {e:?}")))
}
