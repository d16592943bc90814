//! Conversation and attachment records produced by an archive parse.

use serde::{Deserialize, Serialize};

use crate::Message;

/// Title used when a document carries neither `title` nor `name`.
pub const UNTITLED_CONVERSATION: &str = "Untitled Conversation";

/// Provenance details kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMetadata {
    /// Full name of the archive entry the conversation came from.
    pub source_entry: String,

    /// Number of messages that survived normalization.
    pub message_count: usize,

    /// Position inside the entry when the entry held an array of documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub source_index: Option<usize>,
}

/// A normalized conversation.
///
/// Constructed only by the conversation normalizer, which guarantees that
/// `messages` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Identifier from the export, or derived from the entry name.
    pub id: String,

    /// Title, or [`UNTITLED_CONVERSATION`].
    pub title: String,

    /// Messages in source order. Never empty.
    pub messages: Vec<Message>,

    /// Creation time, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update time, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Provenance.
    pub metadata: ConversationMetadata,
}

impl Conversation {
    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false` for conversations built by the normalizer.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A binary payload extracted from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Base file name, without directory components.
    pub name: String,

    /// Raw bytes.
    pub content: Vec<u8>,

    /// MIME type inferred from the extension.
    pub content_type: String,

    /// Byte length of `content`.
    pub size: usize,

    /// Full entry path inside the archive.
    pub relative_path: String,
}

impl Attachment {
    /// Builds an attachment from an entry path and its bytes.
    ///
    /// The base name and content type are derived from `relative_path`.
    pub fn from_entry(relative_path: impl Into<String>, content: Vec<u8>) -> Self {
        let relative_path = relative_path.into();
        let name = crate::parsing::classify::base_name(&relative_path).to_string();
        let content_type = crate::parsing::content_type::content_type_for_name(&name).to_string();
        Self {
            name,
            size: content.len(),
            content,
            content_type,
            relative_path,
        }
    }
}
