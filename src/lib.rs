//! # Convopack
//!
//! A Rust library for parsing conversation export archives from AI chat
//! services into normalized, strongly typed conversations.
//!
//! ## Overview
//!
//! Chat services let users download their history as a ZIP archive: one or
//! more JSON documents at the archive root plus uploaded files in
//! subdirectories. The JSON layout has changed across export versions:
//!
//! - a flat `messages` array per conversation
//! - a `mapping` graph of message nodes keyed by id
//! - a single `conversations.json` holding an array of conversations
//! - message bodies as plain strings, `{"parts": [...]}` or `{"text": "..."}`
//!
//! Convopack accepts all of them and produces one shape: [`Conversation`]s of
//! [`Message`]s, plus the extracted [`Attachment`]s.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convopack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let bytes = std::fs::read("chat-export.zip")?;
//!     let result = parse_archive(Some(&bytes))?;
//!
//!     println!(
//!         "{} conversations, {} attachments",
//!         result.metadata.conversation_count, result.metadata.attachment_count
//!     );
//!
//!     for conversation in &result.conversations {
//!         for message in &conversation.messages {
//!             println!("[{}] {}: {}", conversation.title, message.role, message.content);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Tolerant Parsing
//!
//! Only archive-level problems are errors. A single unreadable or malformed
//! entry is skipped: it is reported through a `tracing` warning and listed in
//! [`ParseResult::warnings`], and the rest of the archive is still returned.
//!
//! ```rust
//! use convopack::parse_archive;
//!
//! let err = parse_archive(Some(b"definitely not a zip")).unwrap_err();
//! assert!(err.is_invalid_archive());
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ArchiveParser`], [`parse_archive`], [`ParseResult`]
//! - [`parsing`] - pure building blocks
//!   - [`parsing::classify`] - entry name classification
//!   - [`parsing::content_type`] - MIME type inference
//!   - [`parsing::conversation`] - document normalization
//!   - [`parsing::message`] - message normalization
//! - [`config`] - [`ParseConfig`](config::ParseConfig)
//! - [`conversation`], [`message`] - output data model
//! - [`output`] - JSON, JSONL and CSV writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - [`ConvopackError`], [`SkipReason`](error::SkipReason), [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `parallel` | yes | entry processing on the rayon pool |
//! | `json-output` | yes | JSON and JSONL writers |
//! | `csv-output` | yes | CSV writer |
//! | `cli` | yes | the `convopack` binary |
//! | `gen-test` | no | the `gen_test` archive generator |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod message;
pub mod output;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use conversation::{Attachment, Conversation};
pub use error::{ConvopackError, Result};
pub use message::{Message, Role};
pub use parser::{ArchiveParser, ParseResult, parse_archive};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use convopack::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::conversation::{Attachment, Conversation, ConversationMetadata};
    pub use crate::message::{Message, Role};

    // Error types
    pub use crate::error::{ConvopackError, Result, SkipReason};

    // Parsing
    pub use crate::config::ParseConfig;
    pub use crate::parser::{ArchiveParser, ParseMetadata, ParseResult, ParseWarning, parse_archive};

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::output::OutputConfig;
    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, to_jsonl, write_json, write_jsonl};
}
