//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::OutputConfig;
use crate::error::{ConvopackError, Result};
use crate::parser::ParseResult;

/// Writes one row per message with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns:
///   - Basic: `ConversationId`, `Title`, `Role`, `Content`
///   - With timestamps: `ConversationId`, `Title`, `Timestamp`, `Role`, `Content`
/// - Encoding: UTF-8
///
/// Fields containing the delimiter, quotes or newlines are quoted.
pub fn write_csv(
    result: &ParseResult,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, result, config)
}

/// Renders one row per message as a CSV string.
pub fn to_csv(result: &ParseResult, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, result, config)?;
    String::from_utf8(buffer).map_err(|e| {
        ConvopackError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn write_records<W: Write>(output: W, result: &ParseResult, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(output);

    writer.write_record(build_header(config))?;

    for conversation in &result.conversations {
        for msg in &conversation.messages {
            let mut record = vec![conversation.id.as_str(), conversation.title.as_str()];
            if config.include_timestamps {
                record.push(msg.timestamp.as_deref().unwrap_or_default());
            }
            record.push(msg.role.as_str());
            record.push(&msg.content);
            writer.write_record(&record)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["ConversationId", "Title"];
    if config.include_timestamps {
        header.push("Timestamp");
    }
    header.push("Role");
    header.push("Content");
    header
}
