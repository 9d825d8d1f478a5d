//! Conversion API routes.
//!
//! Each endpoint reads a multipart upload batch, runs it through one of the
//! fixed converters on the blocking thread pool, and streams back either the
//! converted file or a ZIP archive of the converted files.

use axum::{
    extract::Multipart,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::convert::{self, batch::ARCHIVE_NAME, BatchOutput, Converter, UploadItem};
use crate::error::Error;

use super::error::AppError;

/// Convert CSV uploads to XLSX.
pub async fn convert_csv(multipart: Multipart) -> Result<Response, AppError> {
    run_conversion(multipart, &convert::CSV_TO_XLSX).await
}

/// Convert PNG uploads to WebP.
pub async fn convert_png(multipart: Multipart) -> Result<Response, AppError> {
    run_conversion(multipart, &convert::PNG_TO_WEBP).await
}

/// Convert WebP uploads to PNG.
pub async fn convert_webp(multipart: Multipart) -> Result<Response, AppError> {
    run_conversion(multipart, &convert::WEBP_TO_PNG).await
}

/// Convert PDF uploads to one PNG per page.
pub async fn convert_pdf(multipart: Multipart) -> Result<Response, AppError> {
    run_conversion(multipart, &convert::PDF_TO_PNG).await
}

async fn run_conversion(
    multipart: Multipart,
    converter: &'static Converter,
) -> Result<Response, AppError> {
    let items = collect_items(multipart).await?;

    // Codec work is CPU-bound; keep it off the async workers.
    let output = tokio::task::spawn_blocking(move || convert::convert_batch(&items, converter))
        .await
        .map_err(|e| Error::Internal(format!("conversion task failed: {e}")))??;

    Ok(into_download_response(output))
}

/// Collect uploaded files from the multipart body, in submission order.
///
/// Every part that carries a filename or a content type is treated as an
/// upload; bare text fields are ignored. The field name itself does not
/// matter, so the browser form's `files` and `images` fields both work.
async fn collect_items(mut multipart: Multipart) -> Result<Vec<UploadItem>, Error> {
    let mut items = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Multipart(e.to_string()))?
    {
        let name = field.file_name().map(ToOwned::to_owned);
        let media_type = field.content_type().map(ToOwned::to_owned);
        if name.is_none() && media_type.is_none() {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::Multipart(e.to_string()))?;

        items.push(UploadItem::new(name, media_type, bytes));
    }

    Ok(items)
}

fn into_download_response(output: BatchOutput) -> Response {
    match output {
        BatchOutput::Single {
            name,
            content_type,
            bytes,
        } => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{name}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        BatchOutput::Archive { bytes } => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{ARCHIVE_NAME}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
    }
}
