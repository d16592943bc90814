//! Example: Using convopack as a library
//!
//! Builds a small export archive in memory, parses it and writes the
//! conversations as JSONL.
//!
//! Run with: cargo run --example library_usage

use std::io::{Cursor, Write};

use convopack::prelude::*;
use zip::ZipWriter;
use zip::write::FileOptions;

const EXPORT: &str = r#"{
  "id": "trip",
  "title": "Trip planning",
  "mapping": {
    "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["Where should I go?"]}}},
    "b": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["Lisbon."]}}}
  }
}"#;

fn build_export() -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    writer.start_file("trip.json", options)?;
    writer.write_all(EXPORT.as_bytes())?;
    writer.start_file("files/map.png", options)?;
    writer.write_all(&[0x89, b'P', b'N', b'G'])?;
    writer.start_file("broken.json", options)?;
    writer.write_all(b"{ not json")?;

    Ok(writer.finish()?.into_inner())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== convopack Library Usage Examples ===\n");

    // Example 1: Parse an in-memory archive
    println!("1. Parsing an export archive:");
    let bytes = build_export()?;
    let result = parse_archive(Some(&bytes))?;

    for conversation in &result.conversations {
        println!("   [{}] {}", conversation.id, conversation.title);
        for message in &conversation.messages {
            println!("     {}: {}", message.role, message.content);
        }
    }

    // Example 2: Attachments and skipped entries
    println!("\n2. Attachments and skipped entries:");
    for attachment in &result.attachments {
        println!(
            "   {} ({}, {} bytes)",
            attachment.relative_path, attachment.content_type, attachment.size
        );
    }
    for warning in &result.warnings {
        println!("   skipped {warning}");
    }

    // Example 3: Sequential parsing with extra attachment types
    println!("\n3. Custom configuration:");
    let parser = ArchiveParser::with_config(
        ParseConfig::sequential().with_attachment_extension("heic"),
    );
    let result = parser.parse_bytes(&bytes)?;
    println!("   {} messages", result.message_count());

    // Example 4: Write JSONL
    println!("\n4. Writing JSONL:");
    let config = OutputConfig::new().with_timestamps();
    println!("{}", to_jsonl(&result, &config)?.trim_end());

    let path = std::env::temp_dir().join("convopack_library_usage.jsonl");
    write_jsonl(&result, &path, &config)?;
    println!("   written to {}", path.display());

    Ok(())
}
