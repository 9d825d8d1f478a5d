//! Batch conversion service.
//!
//! The service turns a batch of uploaded files into converted output through
//! a fixed [`Converter`]: an allow-list of declared media types, a transform
//! from input bytes to one or more output buffers, and the output format's
//! extension and content type. [`batch::convert_batch`] applies a converter
//! to a whole batch and decides between a single-file result and a ZIP
//! archive.
//!
//! Four converters exist: CSV to XLSX, PNG to WebP, WebP to PNG, and PDF to
//! one PNG per page.

pub mod batch;
pub mod pdf;
pub mod raster;
pub mod spreadsheet;

pub use batch::{convert_batch, BatchOutput};

use bytes::Bytes;

/// One uploaded file, owned by the request for its duration.
#[derive(Debug, Clone)]
pub struct UploadItem {
    /// Client-supplied filename, if any.
    pub name: Option<String>,
    /// Client-declared media type, if any.
    pub media_type: Option<String>,
    /// The full upload payload.
    pub bytes: Bytes,
}

impl UploadItem {
    pub fn new(
        name: Option<String>,
        media_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name,
            media_type,
            bytes: bytes.into(),
        }
    }

    /// Name used when reporting errors for this item.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Filename with its last extension stripped, or the fixed default stem
    /// when the client supplied no filename.
    pub fn stem(&self) -> &str {
        match self.name.as_deref() {
            Some(name) => name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name),
            None => batch::DEFAULT_STEM,
        }
    }
}

/// Failure modes of a [`Converter`] transform, not yet tied to an item.
///
/// [`batch::convert_batch`] attaches the offending item's name when mapping
/// these into [`crate::Error`].
#[derive(Debug)]
pub enum TransformError {
    /// The payload could not be decoded as text.
    Decode,
    /// The codec rejected the payload as malformed.
    Invalid(String),
    /// The conversion machinery itself failed; not the caller's fault.
    Internal(String),
}

/// A fixed association between accepted input types, a transform, and an
/// output format.
pub struct Converter {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// Declared media types this converter accepts.
    pub accepted_types: &'static [&'static str],
    /// Extension appended to output names (without the dot).
    pub output_extension: &'static str,
    /// Content type of a single-file response.
    pub output_content_type: &'static str,
    /// Pure transform from input bytes to one or more output buffers.
    pub transform: fn(&[u8]) -> Result<Vec<Vec<u8>>, TransformError>,
}

impl Converter {
    /// Whether the declared media type is on this converter's allow-list.
    pub fn accepts(&self, media_type: &str) -> bool {
        self.accepted_types.contains(&media_type)
    }
}

/// CSV to a single-sheet XLSX workbook.
pub static CSV_TO_XLSX: Converter = Converter {
    name: "csv-to-xlsx",
    accepted_types: &["text/csv", "application/csv", "text/plain"],
    output_extension: "xlsx",
    output_content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    transform: spreadsheet::csv_to_xlsx,
};

/// PNG to lossy WebP.
pub static PNG_TO_WEBP: Converter = Converter {
    name: "png-to-webp",
    accepted_types: &["image/png"],
    output_extension: "webp",
    output_content_type: "image/webp",
    transform: raster::png_to_webp,
};

/// WebP to lossless PNG.
pub static WEBP_TO_PNG: Converter = Converter {
    name: "webp-to-png",
    accepted_types: &["image/webp"],
    output_extension: "png",
    output_content_type: "image/png",
    transform: raster::webp_to_png,
};

/// PDF to one PNG per page.
pub static PDF_TO_PNG: Converter = Converter {
    name: "pdf-to-png",
    accepted_types: &["application/pdf"],
    output_extension: "png",
    output_content_type: "image/png",
    transform: pdf::pdf_to_pngs,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_last_extension() {
        let item = UploadItem::new(Some("report.final.csv".into()), None, Vec::<u8>::new());
        assert_eq!(item.stem(), "report.final");
    }

    #[test]
    fn stem_without_extension_is_whole_name() {
        let item = UploadItem::new(Some("data".into()), None, Vec::<u8>::new());
        assert_eq!(item.stem(), "data");
    }

    #[test]
    fn stem_defaults_when_unnamed() {
        let item = UploadItem::new(None, None, Vec::<u8>::new());
        assert_eq!(item.stem(), "converted");
        assert_eq!(item.display_name(), "<unnamed>");
    }

    #[test]
    fn csv_converter_accepts_plain_text() {
        assert!(CSV_TO_XLSX.accepts("text/csv"));
        assert!(CSV_TO_XLSX.accepts("application/csv"));
        assert!(CSV_TO_XLSX.accepts("text/plain"));
        assert!(!CSV_TO_XLSX.accepts("application/json"));
    }

    #[test]
    fn image_converters_accept_one_type_each() {
        assert!(PNG_TO_WEBP.accepts("image/png"));
        assert!(!PNG_TO_WEBP.accepts("image/webp"));
        assert!(WEBP_TO_PNG.accepts("image/webp"));
        assert!(!WEBP_TO_PNG.accepts("image/png"));
        assert!(PDF_TO_PNG.accepts("application/pdf"));
    }
}
