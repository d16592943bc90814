//! # convopack CLI
//!
//! Command-line interface for the convopack library.

use std::io::IsTerminal;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use convopack::ConvopackError;
use convopack::cli::Args;
use convopack::format::write_to_format;
use convopack::parser::{ArchiveParser, ParseResult};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<(), ConvopackError> {
    let total_start = Instant::now();
    let format = args.resolved_format();

    if !args.quiet {
        println!("📦 convopack v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:   {}", args.input().display());
        if let Some(output) = &args.output {
            println!("💾 Output:  {}", output.display());
            println!("📄 Format:  {format}");
        }
        if args.sequential {
            println!("🐢 Mode:    Sequential");
        }
        println!();
        println!("⏳ Parsing archive...");
    }

    let parser = ArchiveParser::with_config(args.parse_config());
    let parse_start = Instant::now();
    let result = parser.parse_file(args.input())?;
    let parse_time = parse_start.elapsed();

    if let Some(output) = &args.output {
        write_to_format(&result, output, format, &args.output_config())?;
    }

    if !args.quiet {
        print_summary(&result, parse_time.as_secs_f64());
        if let Some(output) = &args.output {
            println!();
            println!("✅ Done! Output saved to {}", output.display());
        }
        println!();
        println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    }

    Ok(())
}

fn print_summary(result: &ParseResult, parse_secs: f64) {
    let meta = &result.metadata;
    println!("   Parsed in {parse_secs:.2}s");
    println!();
    println!("📊 Summary:");
    println!("   Entries:        {}", meta.total_entries);
    println!("   Conversations:  {}", meta.conversation_count);
    println!("   Messages:       {}", result.message_count());
    println!("   Attachments:    {}", meta.attachment_count);
    println!("   Skipped:        {}", result.warnings.len());

    if result.has_warnings() {
        println!();
        println!("⚠️  Skipped entries:");
        for warning in &result.warnings {
            println!("   {} [{}] {}", warning.entry, warning.reason.label(), warning.reason);
        }
    }
}
