//! Unified error type for the fileforge crate.
//!
//! Every failure mode funnels into [`Error`]. Payload faults (empty batch,
//! unsupported media type, undecodable text, codec rejection, malformed
//! multipart) map to HTTP 400; archive/IO/internal faults map to HTTP 500.
//! [`Error::http_status`] derives the status and [`Error::code`] the short
//! machine-readable kind used in JSON error bodies.

/// Unified error type covering all failure modes in fileforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No files were supplied in the batch.
    #[error("empty batch: no files to convert")]
    EmptyBatch,

    /// An item's declared media type is not on the converter's allow-list.
    #[error("unsupported media type '{media_type}' for {name}")]
    UnsupportedMediaType {
        /// Name of the offending item.
        name: String,
        /// The declared media type that was rejected.
        media_type: String,
    },

    /// An item's payload could not be decoded as text.
    #[error("could not decode {name} as text")]
    Decode {
        /// Name of the offending item.
        name: String,
    },

    /// A converter transform rejected an item's payload.
    #[error("conversion failed for {name}: {message}")]
    Conversion {
        /// Name of the offending item.
        name: String,
        /// Human-readable description of the failure.
        message: String,
    },

    /// The multipart request body was malformed.
    #[error("malformed multipart request: {0}")]
    Multipart(String),

    /// Packaging the outputs into a ZIP archive failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for unexpected internal errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    ///
    /// Caller-fault errors are 400; system-fault errors are 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::EmptyBatch => 400,
            Error::UnsupportedMediaType { .. } => 400,
            Error::Decode { .. } => 400,
            Error::Conversion { .. } => 400,
            Error::Multipart(_) => 400,
            Error::Archive(_) => 500,
            Error::Io(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable kind, used as the `code` field of JSON bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::EmptyBatch => "empty_batch",
            Error::UnsupportedMediaType { .. } => "unsupported_media_type",
            Error::Decode { .. } => "decode_error",
            Error::Conversion { .. } => "conversion_error",
            Error::Multipart(_) => "multipart_error",
            Error::Archive(_) => "archive_error",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
