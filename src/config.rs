//! Configuration types for archive parsing.
//!
//! Plain structs without any CLI framework dependencies, so the library can be
//! driven from any host (upload handlers, batch jobs, tests).
//!
//! # Example
//!
//! ```rust
//! use convopack::config::ParseConfig;
//! use convopack::parser::ArchiveParser;
//!
//! let config = ParseConfig::new()
//!     .with_parallel(false)
//!     .with_attachment_extension("dat");
//!
//! let parser = ArchiveParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for [`ArchiveParser`](crate::parser::ArchiveParser).
///
/// # Example
///
/// ```rust
/// use convopack::config::ParseConfig;
///
/// let config = ParseConfig::sequential().with_expand_document_arrays(false);
/// assert!(!config.parallel);
/// assert!(!config.expand_document_arrays);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Process entries on the rayon pool (default: true).
    ///
    /// Has no effect when the crate is built without the `parallel` feature.
    pub parallel: bool,

    /// Treat a root document whose top level is an array as a list of
    /// conversation documents (default: true).
    ///
    /// When disabled, such documents are skipped with a warning.
    pub expand_document_arrays: bool,

    /// Extensions accepted as attachments in addition to the built-in set.
    ///
    /// Matched case-insensitively; a leading dot is ignored.
    pub extra_attachment_extensions: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            expand_document_arrays: true,
            extra_attachment_extensions: Vec::new(),
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that processes entries on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Enables or disables parallel entry processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Enables or disables expansion of array documents.
    #[must_use]
    pub fn with_expand_document_arrays(mut self, enabled: bool) -> Self {
        self.expand_document_arrays = enabled;
        self
    }

    /// Accepts one more extension as an attachment.
    ///
    /// A leading dot is ignored and matching is case-insensitive, so `".DAT"`
    /// and `"dat"` are equivalent.
    #[must_use]
    pub fn with_attachment_extension(mut self, ext: impl AsRef<str>) -> Self {
        let ext = ext.as_ref().trim_start_matches('.').to_ascii_lowercase();
        if !ext.is_empty() && !self.extra_attachment_extensions.contains(&ext) {
            self.extra_attachment_extensions.push(ext);
        }
        self
    }

    /// Returns `true` if entry processing should use the rayon pool.
    pub fn use_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}
