//! Output format writers.
//!
//! Renders a [`ParseResult`] in one of three formats:
//! - [`write_json`] / [`to_json`] - one JSON document with metadata,
//!   conversations and the attachment listing - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one conversation per line, best for
//!   ingestion pipelines - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - one row per message, semicolon delimited -
//!   requires `csv-output` feature
//!
//! Attachment payloads are never rendered; only their name, path, content
//! type and size.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> convopack::Result<()> {
//! use convopack::output::{OutputConfig, to_csv, write_json, write_jsonl};
//!
//! let bytes = std::fs::read("export.zip")?;
//! let result = convopack::parse_archive(Some(&bytes))?;
//!
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_json(&result, "conversations.json", &config)?;
//! write_jsonl(&result, "conversations.jsonl", &config)?;
//! let csv_string = to_csv(&result, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::conversation::{Attachment, Conversation, ConversationMetadata};
#[cfg(feature = "json-output")]
use crate::message::{Message, Role};

/// Controls which optional fields are rendered.
///
/// Everything is off by default: the bare output carries conversation ids,
/// titles, roles and content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include message and conversation timestamps
    pub include_timestamps: bool,
    /// Include the attachment listing (JSON only)
    pub include_attachments: bool,
    /// Include parse metadata, per-conversation metadata and skipped entries
    pub include_metadata: bool,
}

impl OutputConfig {
    /// Creates a config with only the required fields enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every optional field.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_attachments: true,
            include_metadata: true,
        }
    }

    /// Includes timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    /// Includes the attachment listing.
    #[must_use]
    pub fn with_attachments(mut self) -> Self {
        self.include_attachments = true;
        self
    }

    /// Includes parse metadata and skipped entries.
    #[must_use]
    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }
}

/// Conversation as rendered by the JSON writers.
/// Only includes fields enabled in `OutputConfig`.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
pub(crate) struct ConversationView<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<&'a str>,
    messages: Vec<MessageView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a ConversationMetadata>,
}

#[cfg(feature = "json-output")]
impl<'a> ConversationView<'a> {
    pub(crate) fn new(conversation: &'a Conversation, config: &OutputConfig) -> Self {
        let timestamp = |value: &'a Option<String>| {
            value.as_deref().filter(|_| config.include_timestamps)
        };
        Self {
            id: &conversation.id,
            title: &conversation.title,
            created_at: timestamp(&conversation.created_at),
            updated_at: timestamp(&conversation.updated_at),
            messages: conversation
                .messages
                .iter()
                .map(|m| MessageView::new(m, config))
                .collect(),
            metadata: config.include_metadata.then_some(&conversation.metadata),
        }
    }
}

#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct MessageView<'a> {
    role: Role,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    attachments: &'a [String],
}

#[cfg(feature = "json-output")]
impl<'a> MessageView<'a> {
    fn new(message: &'a Message, config: &OutputConfig) -> Self {
        Self {
            role: message.role,
            content: &message.content,
            timestamp: message
                .timestamp
                .as_deref()
                .filter(|_| config.include_timestamps),
            attachments: &message.attachments,
        }
    }
}

/// Attachment listing entry; the payload is never rendered.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
pub(crate) struct AttachmentView<'a> {
    name: &'a str,
    relative_path: &'a str,
    content_type: &'a str,
    size: usize,
}

#[cfg(feature = "json-output")]
impl<'a> From<&'a Attachment> for AttachmentView<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            name: &attachment.name,
            relative_path: &attachment.relative_path,
            content_type: &attachment.content_type,
            size: attachment.size,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bare() {
        let config = OutputConfig::new();
        assert!(!config.include_timestamps);
        assert!(!config.include_attachments);
        assert!(!config.include_metadata);
    }

    #[test]
    fn test_builders() {
        let config = OutputConfig::new().with_timestamps().with_metadata();
        assert!(config.include_timestamps);
        assert!(!config.include_attachments);
        assert!(config.include_metadata);
        assert_eq!(
            OutputConfig::new()
                .with_timestamps()
                .with_attachments()
                .with_metadata(),
            OutputConfig::all()
        );
    }
}
