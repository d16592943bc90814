//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::{AttachmentView, ConversationView, OutputConfig};
use crate::error::Result;
use crate::parser::{ParseMetadata, ParseResult};

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a ParseMetadata>,
    conversations: Vec<ConversationView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<AttachmentView<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<Vec<SkippedEntry<'a>>>,
}

#[derive(Serialize)]
struct SkippedEntry<'a> {
    entry: &'a str,
    reason: &'static str,
    detail: String,
}

impl<'a> JsonDocument<'a> {
    fn new(result: &'a ParseResult, config: &OutputConfig) -> Self {
        Self {
            metadata: config.include_metadata.then_some(&result.metadata),
            conversations: result
                .conversations
                .iter()
                .map(|c| ConversationView::new(c, config))
                .collect(),
            attachments: config
                .include_attachments
                .then(|| result.attachments.iter().map(AttachmentView::from).collect()),
            skipped: config.include_metadata.then(|| {
                result
                    .warnings
                    .iter()
                    .map(|w| SkippedEntry {
                        entry: &w.entry,
                        reason: w.reason.label(),
                        detail: w.reason.to_string(),
                    })
                    .collect()
            }),
        }
    }
}

/// Writes the parse result to a pretty-printed JSON file.
///
/// # Format
/// ```json
/// {
///   "metadata": {"total_entries": 3, "conversation_count": 1, "attachment_count": 1},
///   "conversations": [
///     {"id": "c1", "title": "Greetings", "messages": [{"role": "user", "content": "Hello"}]}
///   ],
///   "attachments": [
///     {
///       "name": "pic.png",
///       "relative_path": "files/pic.png",
///       "content_type": "image/png",
///       "size": 4
///     }
///   ]
/// }
/// ```
/// `metadata` and `attachments` only appear when enabled in `OutputConfig`.
pub fn write_json(
    result: &ParseResult,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &JsonDocument::new(result, config))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Renders the parse result as a pretty-printed JSON string.
///
/// Same format as `write_json`.
pub fn to_json(result: &ParseResult, config: &OutputConfig) -> Result<String> {
    let document = JsonDocument::new(result, config);
    Ok(serde_json::to_string_pretty(&document)?)
}
