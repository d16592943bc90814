//! Normalized message type shared by every export shape.
//!
//! This module provides [`Message`] and [`Role`], the canonical representation
//! a raw message node is converted into. Whatever key names or nesting the
//! source export used, downstream code only ever sees these two types.
//!
//! # Examples
//!
//! ```
//! use convopack::{Message, Role};
//!
//! let msg = Message::new(Role::Assistant, "Hello!")
//!     .with_timestamp("2024-01-15T10:30:00Z")
//!     .with_attachments(vec!["file-abc123".to_string()]);
//!
//! assert_eq!(msg.role(), Role::Assistant);
//! assert_eq!(msg.content(), "Hello!");
//! assert!(msg.has_attachments());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Author of a message.
///
/// Exactly one of three values. Exports sometimes carry other roles (`tool`,
/// `function`, `human`); the message normalizer coerces those to
/// [`Role::User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt or instructions
    System,
    /// Human participant (also the fallback for unrecognized roles)
    #[default]
    User,
    /// Model response
    Assistant,
}

impl Role {
    /// Parses one of the three canonical role names.
    ///
    /// Matching is exact: `"User"` or `"human"` are not canonical.
    ///
    /// ```
    /// use convopack::Role;
    ///
    /// assert_eq!(Role::from_canonical("assistant"), Some(Role::Assistant));
    /// assert_eq!(Role::from_canonical("tool"), None);
    /// ```
    pub fn from_canonical(value: &str) -> Option<Role> {
        match value {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized message inside a [`Conversation`](crate::Conversation).
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `role` | [`Role`] | Who wrote the message |
/// | `content` | `String` | Trimmed, never empty |
/// | `timestamp` | `Option<String>` | Verbatim from the export |
/// | `attachments` | `Vec<String>` | Inline attachment references |
///
/// Timestamps are kept exactly as the export wrote them; no parsing or
/// validation happens at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author role.
    pub role: Role,

    /// Text content, trimmed.
    pub content: String,

    /// When the message was written, in the export's own format.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Attachment references found on the message itself.
    ///
    /// These are opaque strings (file ids or names) and are independent of
    /// the archive-level [`Attachment`](crate::Attachment) records.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl Message {
    /// Creates a message with no timestamp and no attachment references.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
            attachments: Vec::new(),
        }
    }

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    /// Builder method to set the inline attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Returns the author role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp, if available.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Returns the inline attachment references.
    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    /// Returns `true` if the message references any attachments.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}
