//! Unified error types for convopack.
//!
//! Errors come in two tiers:
//!
//! - [`ConvopackError`] - fatal, archive-level failures. These abort the whole
//!   parse and are returned to the caller; no partial result exists.
//! - [`SkipReason`] - recoverable, entry-level failures. These never leave the
//!   archive parser: the offending entry is skipped, a warning event is
//!   emitted and a [`ParseWarning`](crate::parser::ParseWarning) is recorded.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// A specialized [`Result`] type for convopack operations.
///
/// # Example
///
/// ```rust
/// use convopack::error::Result;
/// use convopack::Conversation;
///
/// fn my_function() -> Result<Vec<Conversation>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvopackError>;

/// The error type for all fatal convopack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvopackError {
    /// No buffer was supplied at all.
    ///
    /// Distinct from [`EmptyArchive`](Self::EmptyArchive): this is the
    /// absent-input case, not the zero-length one.
    #[error("Invalid input: no archive buffer was provided")]
    InvalidInput,

    /// The buffer was supplied but has zero length.
    #[error("Archive is empty (0 bytes)")]
    EmptyArchive,

    /// The buffer could not be opened as a ZIP container.
    ///
    /// This occurs when:
    /// - The input is not a ZIP file at all (e.g. plain text)
    /// - The end-of-central-directory record is missing or truncated
    /// - The archive uses an unsupported container feature
    #[error("Invalid archive{}: {source}", file_suffix(path.as_ref()))]
    InvalidArchive {
        /// The underlying ZIP error
        #[source]
        source: ZipError,
        /// The archive path, if the buffer came from a file
        path: Option<PathBuf>,
    },

    /// An I/O error occurred.
    ///
    /// Only raised by the file-based entry points and the output writers;
    /// in-memory parsing performs no I/O.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error while rendering output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested output format is unknown or not compiled in.
    #[error("Invalid output format: {message}")]
    InvalidFormat {
        /// Human-readable description
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn file_suffix(path: Option<&PathBuf>) -> String {
    path.map(|p| format!(" (file: {})", p.display()))
        .unwrap_or_default()
}

impl ConvopackError {
    /// Creates an invalid archive error without a file path.
    pub fn invalid_archive(source: ZipError) -> Self {
        ConvopackError::InvalidArchive { source, path: None }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        ConvopackError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Attaches the originating file path to an [`InvalidArchive`](Self::InvalidArchive) error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, archive_path: impl Into<PathBuf>) -> Self {
        match self {
            ConvopackError::InvalidArchive { source, .. } => ConvopackError::InvalidArchive {
                source,
                path: Some(archive_path.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if no input buffer was supplied.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ConvopackError::InvalidInput)
    }

    /// Returns `true` if the input buffer was empty.
    pub fn is_empty_archive(&self) -> bool {
        matches!(self, ConvopackError::EmptyArchive)
    }

    /// Returns `true` if the input could not be opened as an archive.
    pub fn is_invalid_archive(&self) -> bool {
        matches!(self, ConvopackError::InvalidArchive { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ConvopackError::Io(_))
    }
}

/// Why a single archive entry contributed nothing to the result.
///
/// Produced per entry by the archive parser and never propagated past it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkipReason {
    /// The entry header could not be read from the archive.
    #[error("failed to open entry: {0}")]
    Zip(#[from] ZipError),

    /// The entry's compressed stream could not be read.
    #[error("failed to read entry: {0}")]
    Read(#[from] io::Error),

    /// The entry bytes are not valid UTF-8 text.
    #[error("entry is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The entry text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well-formed but its top level cannot hold a conversation.
    #[error("expected a JSON object or array at the top level, found {kind}")]
    NotADocument {
        /// JSON type name of the top-level value
        kind: &'static str,
    },
}

impl SkipReason {
    /// Short machine-friendly label for the reason, used in log fields and CSV.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::Zip(_) => "zip",
            SkipReason::Read(_) => "read",
            SkipReason::Utf8(_) => "utf8",
            SkipReason::Json(_) => "json",
            SkipReason::NotADocument { .. } => "not_a_document",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = ConvopackError::InvalidInput;
        assert!(err.to_string().contains("no archive buffer"));
        assert!(err.is_invalid_input());
        assert!(!err.is_empty_archive());
    }

    #[test]
    fn test_empty_archive_display() {
        let err = ConvopackError::EmptyArchive;
        assert!(err.to_string().contains("empty"));
        assert!(err.is_empty_archive());
        assert!(!err.is_invalid_archive());
    }

    #[test]
    fn test_invalid_archive_with_path() {
        let err = ConvopackError::invalid_archive(ZipError::InvalidArchive("bad header"))
            .with_path("/tmp/export.zip");
        let display = err.to_string();
        assert!(err.is_invalid_archive());
        assert!(display.contains("/tmp/export.zip"));
        assert!(display.contains("bad header"));
    }

    #[test]
    fn test_invalid_archive_without_path() {
        let err = ConvopackError::invalid_archive(ZipError::InvalidArchive("bad header"));
        assert!(!err.to_string().contains("file:"));
    }

    #[test]
    fn test_with_path_leaves_other_variants() {
        let err = ConvopackError::EmptyArchive.with_path("x.zip");
        assert!(err.is_empty_archive());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err = ConvopackError::invalid_archive(ZipError::FileNotFound);
        assert!(err.source().is_some());

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ConvopackError::from(io_err);
        assert!(err.is_io());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ConvopackError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_skip_reason_labels() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(SkipReason::from(json_err).label(), "json");

        let utf8_err = std::str::from_utf8(&[0xff, 0xfe]).unwrap_err();
        let reason = SkipReason::from(utf8_err);
        assert_eq!(reason.label(), "utf8");
        assert!(reason.to_string().contains("UTF-8"));

        let reason = SkipReason::NotADocument { kind: "number" };
        assert_eq!(reason.label(), "not_a_document");
        assert!(reason.to_string().contains("number"));
    }

    #[test]
    fn test_error_debug() {
        let debug = format!("{:?}", ConvopackError::EmptyArchive);
        assert!(debug.contains("EmptyArchive"));
    }
}
