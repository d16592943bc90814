//! Toxic test archive generator for stress testing convopack.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [conversations] [output] [layout]
//! Example: cargo run --features gen-test --bin gen_test -- 5000 heavy_export.zip mixed
//!
//! Layouts:
//! - `flat`    one document per conversation with a `messages` array
//! - `mapping` one document per conversation with a `mapping` graph
//! - `bulk`    a single `conversations.json` holding every conversation
//! - `mixed`   all of the above plus noise, attachments and broken entries

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const ZALGO_CHARS: &[char] = &[
    '\u{0300}', '\u{0301}', '\u{0302}', '\u{0303}', '\u{0304}', '\u{0305}', '\u{0306}', '\u{0307}',
    '\u{0308}', '\u{0309}', '\u{030A}', '\u{030B}', '\u{030C}', '\u{030D}', '\u{030E}', '\u{030F}',
];

const EMOJIS: &[&str] = &[
    "😀", "🤔", "🤯", "🤖", "🦄", "🔥", "👍", "❤️", "🏳️‍🌈", "👨‍👩‍👧‍👦", "🧑‍🚀", "🤷‍♀️",
];

const PHRASES: &[&str] = &[
    "Can you explain how lifetimes work?",
    "Sure! A lifetime is a region of code where a reference is valid.",
    "Привет, как дела?",
    "村上春樹の小説について教えて",
    "مرحبا بالعالم",
    "Text;With;Semicolons",
    "Text \"with\" quotes",
    "Line one\nLine two\nLine three",
    "```rust\nfn main() { println!(\"hi\"); }\n```",
    "\t  leading and trailing whitespace  \n",
];

// Roles as exports actually spell them, including ones that get coerced.
const ROLES: &[&str] = &["user", "assistant", "system", "tool", "User", "function"];

const ATTACHMENT_NAMES: &[&str] = &[
    "diagram.png",
    "photo.JPG",
    "report.pdf",
    "notes.txt",
    "recording.m4a",
    "clip.mov",
    "scan.heic",
    "data.xlsx",
];

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000);
    let output = args.get(2).map_or("heavy_export.zip", String::as_str);
    let layout = args.get(3).map_or("mixed", String::as_str);

    println!("🧪 Toxic Archive Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Conversations: {count}");
    println!("   Output:        {output}");
    println!("   Layout:        {layout}");
    println!();

    let start = std::time::Instant::now();
    let file = File::create(output)?;
    let mut zip = ZipWriter::new(BufWriter::with_capacity(1024 * 1024, file));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut rng = rand::thread_rng();

    match layout {
        "flat" => write_documents(&mut zip, options, &mut rng, count, false)?,
        "mapping" => write_documents(&mut zip, options, &mut rng, count, true)?,
        "bulk" => write_bulk(&mut zip, options, &mut rng, count)?,
        "mixed" => {
            let third = count / 3;
            write_documents(&mut zip, options, &mut rng, third, false)?;
            write_documents(&mut zip, options, &mut rng, third, true)?;
            write_bulk(&mut zip, options, &mut rng, count - 2 * third)?;
            write_attachments(&mut zip, options, &mut rng, count / 10 + 1)?;
            write_noise(&mut zip, options)?;
        }
        _ => {
            eprintln!("Unknown layout: {layout}. Use 'flat', 'mapping', 'bulk' or 'mixed'");
            std::process::exit(1);
        }
    }

    let mut inner = zip.finish()?;
    inner.flush()?;

    let size = std::fs::metadata(output)?.len();
    println!(
        "✅ Wrote {:.2} MB in {:.2}s",
        size as f64 / 1_000_000.0,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn write_documents<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
    rng: &mut impl Rng,
    count: usize,
    mapping: bool,
) -> Result<(), Box<dyn Error>> {
    let prefix = if mapping { "graph" } else { "chat" };
    for i in 0..count {
        let document = if mapping {
            mapping_conversation(rng, i)
        } else {
            flat_conversation(rng, i)
        };
        zip.start_file(format!("{prefix}-{i:06}.json"), options)?;
        serde_json::to_writer(&mut *zip, &document)?;
        progress("documents", i + 1, count);
    }
    Ok(())
}

fn write_bulk<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
    rng: &mut impl Rng,
    count: usize,
) -> Result<(), Box<dyn Error>> {
    let conversations: Vec<Value> = (0..count)
        .map(|i| {
            if rng.gen_bool(0.5) {
                mapping_conversation(rng, i)
            } else {
                flat_conversation(rng, i)
            }
        })
        .collect();
    zip.start_file("conversations.json", options)?;
    serde_json::to_writer(&mut *zip, &conversations)?;
    Ok(())
}

fn write_attachments<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
    rng: &mut impl Rng,
    count: usize,
) -> Result<(), Box<dyn Error>> {
    zip.add_directory("files/", options)?;
    for i in 0..count {
        let name = ATTACHMENT_NAMES[i % ATTACHMENT_NAMES.len()];
        let size = rng.gen_range(16..4096);
        let payload: Vec<u8> = (0..size).map(|_| rng.gen_range(0..=u8::MAX)).collect();
        zip.start_file(format!("files/{i:04}-{name}"), options)?;
        zip.write_all(&payload)?;
    }
    Ok(())
}

/// Entries that must never reach the output, plus ones that must be skipped.
fn write_noise<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
) -> Result<(), Box<dyn Error>> {
    let entries: &[(&str, &[u8])] = &[
        (".DS_Store", b"\x00\x00\x00\x01Bud1"),
        ("__MACOSX/._conversations.json", b"\x00\x05\x16\x07"),
        ("files/._diagram.png", b"\x00\x05\x16\x07"),
        ("nested/export.json", br#"{"messages":[{"content":"not at root"}]}"#),
        ("setup.exe", b"MZ"),
        ("README", b"no extension"),
        ("broken.json", b"{\"messages\": [ {\"content\": "),
        ("binary.json", b"\xff\xfe\xfd"),
        ("scalar.json", b"\"just a string\""),
        ("empty-chat.json", br#"{"title":"Nothing here","messages":[{"content":"   "}]}"#),
    ];
    for (name, bytes) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(bytes)?;
    }
    Ok(())
}

fn flat_conversation(rng: &mut impl Rng, index: usize) -> Value {
    let len = rng.gen_range(1..40);
    let messages: Vec<Value> = (0..len).map(|i| raw_message(rng, i)).collect();
    let mut doc = json!({
        "id": format!("conv-{index}"),
        "title": toxic_text(rng),
        "created_at": format!("2024-01-{:02}T10:00:00Z", index % 28 + 1),
        "messages": messages,
    });
    if rng.gen_bool(0.2) {
        doc = json!({ "conversation": doc });
    }
    doc
}

fn mapping_conversation(rng: &mut impl Rng, index: usize) -> Value {
    let len = rng.gen_range(1..40);
    let mut mapping = serde_json::Map::new();
    mapping.insert(
        format!("root-{index}"),
        json!({ "id": format!("root-{index}"), "message": null, "parent": null }),
    );
    for i in 0..len {
        let node_id = format!("node-{index}-{i}");
        let message = json!({
            "author": { "role": ROLES.choose(rng).copied().unwrap_or("user") },
            "content": { "content_type": "text", "parts": [toxic_text(rng), toxic_text(rng)] },
            "create_time": 1_705_314_600.0 + i as f64,
        });
        mapping.insert(node_id.clone(), json!({ "id": node_id, "message": message }));
    }
    json!({
        "conversation_id": index,
        "name": format!("Graph {index}"),
        "create_time": 1_705_314_600.5,
        "update_time": 1_705_400_000.25,
        "mapping": mapping,
    })
}

fn raw_message(rng: &mut impl Rng, i: usize) -> Value {
    let role = ROLES.choose(rng).copied().unwrap_or("user");
    let content = match rng.gen_range(0..10) {
        0 => json!({ "parts": [toxic_text(rng), 42, toxic_text(rng)] }),
        1 => json!({ "text": toxic_text(rng) }),
        2 => json!("   "),
        3 => Value::Null,
        _ => json!(toxic_text(rng)),
    };
    let mut message = json!({
        "role": role,
        "content": content,
        "timestamp": format!("2024-01-15T10:{:02}:00Z", i % 60),
    });
    if rng.gen_bool(0.1) {
        message["attachments"] = json!([ATTACHMENT_NAMES.choose(rng).copied().unwrap_or("a.png")]);
    }
    message
}

fn toxic_text(rng: &mut impl Rng) -> String {
    let mut text = PHRASES.choose(rng).copied().unwrap_or_default().to_string();
    if rng.gen_bool(0.3) {
        text.push(' ');
        text.push_str(EMOJIS.choose(rng).copied().unwrap_or_default());
    }
    if rng.gen_bool(0.05) {
        for _ in 0..rng.gen_range(1..8) {
            if let Some(c) = ZALGO_CHARS.choose(rng) {
                text.push(*c);
            }
        }
    }
    text
}

fn progress(label: &str, done: usize, total: usize) {
    if done % 1000 == 0 || done == total {
        eprint!("\r   Generated {done}/{total} {label}");
        if done == total {
            eprintln!();
        }
    }
}
