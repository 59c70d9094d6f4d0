//! The closed share error taxonomy.

/// Terminal failure kinds for a share attempt.
///
/// Every internal failure (resource access, metadata, discovery, slot
/// negotiation, transfer) is mapped to exactly one of these at its origin
/// and surfaced unchanged. The `Display` text is the fixed user-facing
/// message for the kind; callers present it as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("Please try again later.")]
    Unknown,

    #[error("It was not possible to access the file.")]
    NoAccess,

    #[error("Could not retrieve file size.")]
    NoFileSize,

    #[error("Could not detect MIME type of a file.")]
    NoMimeType,

    #[error("Feature not supported by the server")]
    NotSupported,

    #[error("File is too big to share")]
    FileTooBig,

    #[error("Upload to HTTP server failed.")]
    HttpError,
}
