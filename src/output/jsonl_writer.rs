//! JSON Lines (JSONL) output writer.
//!
//! One conversation per line, which suits:
//! - Fine-tuning and evaluation datasets
//! - Document ingestion for retrieval pipelines
//! - Streaming consumers that read a record at a time

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{ConversationView, OutputConfig};
use crate::error::Result;
use crate::parser::ParseResult;

/// Writes every conversation as one JSON object per line.
///
/// ```jsonl
/// {"id":"c1","title":"Greetings","messages":[{"role":"user","content":"Hello"}]}
/// {"id":"c2","title":"Untitled Conversation","messages":[{"role":"user","content":"Hi"}]}
/// ```
///
/// Attachments are not part of this format.
pub fn write_jsonl(
    result: &ParseResult,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, result, config)?;
    writer.flush()?;
    Ok(())
}

/// Renders every conversation as one JSON object per line.
pub fn to_jsonl(result: &ParseResult, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(&mut buffer, result, config)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_lines<W: Write>(
    writer: &mut W,
    result: &ParseResult,
    config: &OutputConfig,
) -> Result<()> {
    for conversation in &result.conversations {
        serde_json::to_writer(&mut *writer, &ConversationView::new(conversation, config))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_result;
    use serde_json::Value;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_jsonl_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&sample_result(), temp_file.path(), &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(temp_file.path()).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["id"], "c1");
        assert_eq!(first["messages"][0]["content"], "Hello");

        let second: Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["messages"][0]["role"], "system");
        assert_eq!(second["messages"][0]["content"], "Line one\nline two");
    }

    #[test]
    fn test_jsonl_with_metadata() {
        let jsonl = to_jsonl(&sample_result(), &OutputConfig::new().with_metadata()).unwrap();
        let first: Value = serde_json::from_str(jsonl.lines().next().unwrap()).unwrap();
        assert_eq!(first["metadata"]["source_entry"], "c1.json");
        assert_eq!(first["metadata"]["message_count"], 2);
    }

    #[test]
    fn test_jsonl_not_an_array() {
        let jsonl = to_jsonl(&sample_result(), &OutputConfig::new()).unwrap();
        assert!(!jsonl.starts_with('['));
        assert!(jsonl.ends_with('\n'));
        assert_eq!(jsonl.lines().count(), 2);
    }

    #[test]
    fn test_jsonl_empty_result() {
        assert_eq!(to_jsonl(&ParseResult::default(), &OutputConfig::new()).unwrap(), "");
    }
}
