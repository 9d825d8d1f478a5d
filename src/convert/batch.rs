//! Batch processing and result packaging.
//!
//! Validation and conversion interleave per item: the first invalid or
//! unconvertible item aborts the whole batch, discarding any outputs already
//! produced. A batch that yields exactly one output becomes a single-file
//! response; anything more is packaged into a ZIP archive.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

use super::{Converter, TransformError, UploadItem};

/// Output stem used when the client supplied no filename.
pub const DEFAULT_STEM: &str = "converted";

/// Suggested filename for archive responses. Fixed, not derived from inputs.
pub const ARCHIVE_NAME: &str = "converted.zip";

/// A single named output buffer.
#[derive(Debug)]
struct NamedOutput {
    name: String,
    bytes: Vec<u8>,
}

/// Result of converting a whole batch.
#[derive(Debug)]
pub enum BatchOutput {
    /// The batch produced exactly one output.
    Single {
        /// Computed output name, used as the filename hint.
        name: String,
        /// Content type of the converter's output format.
        content_type: &'static str,
        bytes: Vec<u8>,
    },
    /// The batch produced two or more outputs, packaged as a ZIP archive.
    Archive { bytes: Vec<u8> },
}

/// Convert every item of a batch with the given converter.
///
/// Items are processed strictly in order. The first failure of any kind
/// aborts the batch; no partial output is ever returned. Output names follow
/// the input order, with `_page_<n>` suffixes for items that expand into
/// multiple outputs (multi-page PDFs).
pub fn convert_batch(items: &[UploadItem], converter: &Converter) -> Result<BatchOutput> {
    if items.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let mut outputs: Vec<NamedOutput> = Vec::with_capacity(items.len());

    for item in items {
        let media_type = item.media_type.as_deref().unwrap_or("");
        if !converter.accepts(media_type) {
            return Err(Error::UnsupportedMediaType {
                name: item.display_name().to_string(),
                media_type: media_type.to_string(),
            });
        }

        tracing::debug!(
            converter = converter.name,
            item = item.display_name(),
            size = item.bytes.len(),
            "converting upload"
        );

        let buffers = (converter.transform)(&item.bytes)
            .map_err(|e| attach_item(e, item.display_name()))?;

        if buffers.is_empty() {
            return Err(Error::Conversion {
                name: item.display_name().to_string(),
                message: "document has no pages".to_string(),
            });
        }

        let stem = item.stem();
        let paged = buffers.len() > 1;
        for (index, bytes) in buffers.into_iter().enumerate() {
            let name = if paged {
                format!(
                    "{stem}_page_{}.{}",
                    index + 1,
                    converter.output_extension
                )
            } else {
                format!("{stem}.{}", converter.output_extension)
            };
            outputs.push(NamedOutput { name, bytes });
        }
    }

    if outputs.len() > 1 {
        return Ok(BatchOutput::Archive {
            bytes: pack_archive(&outputs)?,
        });
    }

    match outputs.pop() {
        Some(output) => Ok(BatchOutput::Single {
            name: output.name,
            content_type: converter.output_content_type,
            bytes: output.bytes,
        }),
        // Unreachable: the batch is non-empty and every item yields output.
        None => Err(Error::Internal("batch produced no outputs".into())),
    }
}

fn attach_item(err: TransformError, name: &str) -> Error {
    match err {
        TransformError::Decode => Error::Decode {
            name: name.to_string(),
        },
        TransformError::Invalid(message) => Error::Conversion {
            name: name.to_string(),
            message,
        },
        TransformError::Internal(message) => Error::Internal(message),
    }
}

/// Write outputs into an in-memory ZIP archive, in order. Duplicate names
/// are written as-is; extractors see the later entry.
fn pack_archive(outputs: &[NamedOutput]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for output in outputs {
            zip.start_file(output.name.clone(), options)
                .map_err(|e| Error::Archive(format!("failed to add {}: {e}", output.name)))?;
            zip.write_all(&output.bytes)?;
        }

        zip.finish()
            .map_err(|e| Error::Archive(format!("failed to finalize archive: {e}")))?;
    }
    Ok(buffer)
}
