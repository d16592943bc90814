//! Archive parser: the single entry point of the crate.
//!
//! Opens a ZIP export, classifies every entry by name, normalizes root-level
//! JSON documents into conversations and extracts attachment payloads.
//!
//! # Failure model
//!
//! - Archive-level problems (no buffer, empty buffer, not a ZIP) are fatal and
//!   returned as [`ConvopackError`].
//! - Entry-level problems (unreadable entry, invalid UTF-8, invalid JSON) only
//!   skip that entry. Each one is emitted as a `tracing` warning and recorded
//!   in [`ParseResult::warnings`].
//! - Discarded entries and documents without usable messages are dropped
//!   silently.
//!
//! # Example
//!
//! ```rust,no_run
//! use convopack::parser::ArchiveParser;
//!
//! let parser = ArchiveParser::new();
//! let result = parser.parse_file("chat-export.zip".as_ref())?;
//!
//! for conversation in &result.conversations {
//!     println!("{} ({} messages)", conversation.title, conversation.messages.len());
//! }
//! for warning in &result.warnings {
//!     eprintln!("skipped {warning}");
//! }
//! # Ok::<(), convopack::ConvopackError>(())
//! ```

use std::fmt;
use std::io::{Cursor, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zip::ZipArchive;

use crate::config::ParseConfig;
use crate::conversation::{Attachment, Conversation};
use crate::error::{ConvopackError, Result, SkipReason};
use crate::parsing::classify::{EntryKind, classify_entry_with};
use crate::parsing::conversation::{normalize_conversation, normalize_conversation_at};

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

// Upper bound on up-front allocation; entry sizes come from untrusted headers.
const MAX_PREALLOC: usize = 16 * 1024 * 1024;

/// Summary counters for one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMetadata {
    /// Every entry in the archive, directories included.
    pub total_entries: usize,
    /// Conversations produced.
    pub conversation_count: usize,
    /// Attachments produced.
    pub attachment_count: usize,
}

/// An entry that was skipped because it could not be processed.
#[derive(Debug)]
pub struct ParseWarning {
    /// Entry name inside the archive.
    pub entry: String,
    /// What went wrong.
    pub reason: SkipReason,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entry, self.reason)
    }
}

/// Everything extracted from one archive.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Normalized conversations. Each has at least one message.
    pub conversations: Vec<Conversation>,
    /// Extracted attachment payloads.
    pub attachments: Vec<Attachment>,
    /// Summary counters.
    pub metadata: ParseMetadata,
    /// Entries skipped because of entry-level errors.
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    /// Total number of messages across all conversations.
    pub fn message_count(&self) -> usize {
        self.conversations.iter().map(|c| c.messages.len()).sum()
    }

    /// Returns `true` if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty() && self.attachments.is_empty()
    }

    /// Returns `true` if any entry was skipped because of an error.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Parses the archive with the default configuration.
///
/// `None` stands for "no buffer supplied" and fails with
/// [`ConvopackError::InvalidInput`].
///
/// # Example
///
/// ```rust
/// use convopack::parse_archive;
///
/// assert!(parse_archive(None).unwrap_err().is_invalid_input());
/// assert!(parse_archive(Some(&[])).unwrap_err().is_empty_archive());
/// assert!(parse_archive(Some(b"plain text")).unwrap_err().is_invalid_archive());
/// ```
pub fn parse_archive(buffer: Option<&[u8]>) -> Result<ParseResult> {
    ArchiveParser::new().parse(buffer)
}

/// A root-level entry selected for processing.
#[derive(Debug)]
struct PlannedEntry {
    index: usize,
    name: String,
    kind: EntryKind,
}

/// What a processed entry contributes to the result.
#[derive(Debug)]
enum EntryOutcome {
    /// Zero or more conversations from one document entry.
    Conversations(Vec<Conversation>),
    Attachment(Attachment),
}

/// Parser for conversation export archives.
///
/// Holds only configuration; every parse is independent, so one parser can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ArchiveParser {
    config: ParseConfig,
}

impl ArchiveParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses an optional buffer.
    ///
    /// # Errors
    ///
    /// - [`ConvopackError::InvalidInput`] if `buffer` is `None`
    /// - [`ConvopackError::EmptyArchive`] if it has zero length
    /// - [`ConvopackError::InvalidArchive`] if it is not a readable ZIP
    pub fn parse(&self, buffer: Option<&[u8]>) -> Result<ParseResult> {
        let bytes = buffer.ok_or(ConvopackError::InvalidInput)?;
        self.parse_bytes(bytes)
    }

    /// Reads and parses an archive file.
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes).map_err(|e| e.with_path(path))
    }

    /// Parses an in-memory archive.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseResult> {
        if bytes.is_empty() {
            return Err(ConvopackError::EmptyArchive);
        }

        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(ConvopackError::invalid_archive)?;
        let total_entries = archive.len();

        let mut warnings = Vec::new();
        let entries = self.plan_entries(&mut archive, &mut warnings);

        let outcomes = self.process_entries(&mut archive, &entries);

        let mut result = ParseResult::default();
        for (entry, outcome) in entries.into_iter().zip(outcomes) {
            match outcome {
                Ok(EntryOutcome::Conversations(conversations)) => {
                    result.conversations.extend(conversations);
                }
                Ok(EntryOutcome::Attachment(attachment)) => result.attachments.push(attachment),
                Err(reason) => record_skip(&mut warnings, entry.name, reason),
            }
        }

        result.warnings = warnings;
        result.metadata = ParseMetadata {
            total_entries,
            conversation_count: result.conversations.len(),
            attachment_count: result.attachments.len(),
        };

        tracing::debug!(
            total_entries,
            conversations = result.metadata.conversation_count,
            attachments = result.metadata.attachment_count,
            skipped = result.warnings.len(),
            "archive parsed"
        );

        Ok(result)
    }

    /// Lists the entries worth processing, dropping directories and noise.
    fn plan_entries(
        &self,
        archive: &mut Archive<'_>,
        warnings: &mut Vec<ParseWarning>,
    ) -> Vec<PlannedEntry> {
        let extra = &self.config.extra_attachment_extensions;
        let mut entries = Vec::new();

        for index in 0..archive.len() {
            let file = match archive.by_index_raw(index) {
                Ok(file) => file,
                Err(e) => {
                    record_skip(warnings, format!("<entry #{index}>"), SkipReason::Zip(e));
                    continue;
                }
            };
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            match classify_entry_with(&name, extra) {
                EntryKind::Discard => tracing::trace!(entry = %name, "discarding entry"),
                kind => entries.push(PlannedEntry { index, name, kind }),
            }
        }

        entries
    }

    fn process_entries(
        &self,
        archive: &mut Archive<'_>,
        entries: &[PlannedEntry],
    ) -> Vec<std::result::Result<EntryOutcome, SkipReason>> {
        #[cfg(feature = "parallel")]
        if self.config.use_parallel() {
            return self.process_parallel(archive, entries);
        }

        entries
            .iter()
            .map(|entry| self.process_entry(archive, entry))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn process_parallel(
        &self,
        archive: &Archive<'_>,
        entries: &[PlannedEntry],
    ) -> Vec<std::result::Result<EntryOutcome, SkipReason>> {
        use rayon::prelude::*;

        // Clones share the parsed central directory; only the cursor is per worker.
        entries
            .par_iter()
            .map_init(
                || archive.clone(),
                |archive, entry| self.process_entry(archive, entry),
            )
            .collect()
    }

    fn process_entry(
        &self,
        archive: &mut Archive<'_>,
        entry: &PlannedEntry,
    ) -> std::result::Result<EntryOutcome, SkipReason> {
        let _span = tracing::debug_span!("entry", name = %entry.name).entered();

        let bytes = read_entry(archive, entry.index)?;
        match entry.kind {
            EntryKind::StructuredDocument => self
                .parse_document(&bytes, &entry.name)
                .map(EntryOutcome::Conversations),
            EntryKind::Attachment => Ok(EntryOutcome::Attachment(Attachment::from_entry(
                entry.name.as_str(),
                bytes,
            ))),
            EntryKind::Discard => Ok(EntryOutcome::Conversations(Vec::new())),
        }
    }

    /// Decodes one document entry into zero or more conversations.
    fn parse_document(
        &self,
        bytes: &[u8],
        entry_name: &str,
    ) -> std::result::Result<Vec<Conversation>, SkipReason> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let document: Value = serde_json::from_str(text)?;

        match &document {
            Value::Object(_) => Ok(normalize_conversation(&document, entry_name)
                .into_iter()
                .collect()),
            Value::Array(items) if self.config.expand_document_arrays => Ok(items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    normalize_conversation_at(item, entry_name, Some(index))
                })
                .collect()),
            other => Err(SkipReason::NotADocument {
                kind: json_kind(other),
            }),
        }
    }
}

fn read_entry(archive: &mut Archive<'_>, index: usize) -> std::result::Result<Vec<u8>, SkipReason> {
    let mut file = archive.by_index(index)?;
    let capacity = usize::try_from(file.size()).unwrap_or(0).min(MAX_PREALLOC);
    let mut bytes = Vec::with_capacity(capacity);
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn record_skip(warnings: &mut Vec<ParseWarning>, entry: String, reason: SkipReason) {
    tracing::warn!(
        entry = %entry,
        reason = reason.label(),
        error = %reason,
        "skipping archive entry"
    );
    warnings.push(ParseWarning { entry, reason });
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
