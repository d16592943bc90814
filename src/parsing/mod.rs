//! Pure building blocks of an archive parse.
//!
//! Leaf-first:
//!
//! - [`classify`] - entry name → [`EntryKind`]
//! - [`content_type`] - extension → MIME type
//! - [`message`] - raw message node → [`Message`](crate::Message)
//! - [`conversation`] - raw document → [`Conversation`](crate::Conversation)
//!
//! None of these touch the archive; [`crate::parser`] wires them together.

pub mod classify;
pub mod content_type;
pub mod conversation;
pub mod message;

pub use classify::{EntryKind, classify_entry, classify_entry_with};
pub use content_type::{content_type_for, content_type_for_name};
pub use conversation::{normalize_conversation, normalize_conversation_at};
pub use message::{RawContent, RawMessage, normalize_message};
