//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! `Args` also knows how to turn itself into the library's
//! [`ParseConfig`] and [`OutputConfig`], so the binary stays a thin shell.
//!
//! ```rust
//! use clap::Parser;
//! use convopack::cli::Args;
//!
//! let args = Args::parse_from([
//!     "convopack",
//!     "export.zip",
//!     "--sequential",
//!     "--attach-ext",
//!     ".HEIC",
//! ]);
//! let config = args.parse_config();
//! assert!(!config.parallel);
//! assert_eq!(config.extra_attachment_extensions, vec!["heic"]);
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ParseConfig;
use crate::output::OutputConfig;

/// Inspect and convert conversation export archives (ZIP) into
/// normalized JSON, JSONL or CSV.
#[derive(Parser, Debug, Clone)]
#[command(name = "convopack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    convopack export.zip
    convopack export.zip -o conversations.json --attachments
    convopack export.zip -o chats.csv --timestamps
    convopack export.zip -o chats.out -f jsonl --sequential
    RUST_LOG=convopack=debug convopack export.zip")]
pub struct Args {
    /// Path to the export archive
    pub input: PathBuf,

    /// Write normalized output to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the output file extension, then JSON)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include the attachment listing in JSON output
    #[arg(short = 'a', long)]
    pub attachments: bool,

    /// Include parse metadata and skipped entries in JSON output
    #[arg(short = 'm', long)]
    pub metadata: bool,

    /// Process entries on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Skip root-level documents whose top level is an array
    #[arg(long)]
    pub no_expand_arrays: bool,

    /// Treat files with this extension as attachments (repeatable)
    #[arg(long = "attach-ext", value_name = "EXT")]
    pub attach_ext: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the parser configuration from the flags.
    pub fn parse_config(&self) -> ParseConfig {
        self.attach_ext.iter().fold(
            ParseConfig::new()
                .with_parallel(!self.sequential)
                .with_expand_document_arrays(!self.no_expand_arrays),
            |config, ext| config.with_attachment_extension(ext),
        )
    }

    /// Builds the writer configuration from the flags.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_timestamps: self.timestamps,
            include_attachments: self.attachments,
            include_metadata: self.metadata,
        }
    }

    /// Resolves the output format: explicit flag, then output extension, then JSON.
    pub fn resolved_format(&self) -> crate::format::OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|path| crate::format::OutputFormat::from_path(path).ok())
            .unwrap_or_default()
    }

    /// Default log filter directive when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "convopack=debug,warn",
            _ => "convopack=trace,debug",
        }
    }

    /// Input path.
    pub fn input(&self) -> &Path {
        &self.input
    }
}

/// Output format options.
///
/// # Example
///
/// ```rust
/// use convopack::cli::OutputFormat;
///
/// let format = OutputFormat::Jsonl;
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single JSON document (default)
    #[default]
    Json,

    /// JSON Lines - one conversation per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter, one row per message
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat as LibFormat;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("convopack").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let a = args(&["export.zip"]);
        assert_eq!(a.input, PathBuf::from("export.zip"));
        assert!(a.output.is_none());
        assert_eq!(a.resolved_format(), LibFormat::Json);
        assert_eq!(a.output_config(), OutputConfig::new());
        assert_eq!(a.log_directive(), "warn");

        let config = a.parse_config();
        assert!(config.parallel);
        assert!(config.expand_document_arrays);
        assert!(config.extra_attachment_extensions.is_empty());
    }

    #[test]
    fn test_format_from_output_extension() {
        assert_eq!(args(&["x.zip", "-o", "out.csv"]).resolved_format(), LibFormat::Csv);
        assert_eq!(args(&["x.zip", "-o", "out.jsonl"]).resolved_format(), LibFormat::Jsonl);
        assert_eq!(args(&["x.zip", "-o", "out.dat"]).resolved_format(), LibFormat::Json);
    }

    #[test]
    fn test_explicit_format_wins() {
        let a = args(&["x.zip", "-o", "out.csv", "-f", "ndjson"]);
        assert_eq!(a.resolved_format(), LibFormat::Jsonl);
    }

    #[test]
    fn test_flags_map_to_configs() {
        let a = args(&[
            "x.zip",
            "-t",
            "--attachments",
            "-m",
            "--no-expand-arrays",
            "--attach-ext",
            "heic",
            "--attach-ext",
            ".Pages",
        ]);
        assert_eq!(a.output_config(), OutputConfig::all());
        let config = a.parse_config();
        assert!(!config.expand_document_arrays);
        assert_eq!(config.extra_attachment_extensions, vec!["heic", "pages"]);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(args(&["x.zip", "-q"]).log_directive(), "error");
        assert_eq!(args(&["x.zip", "-v"]).log_directive(), "convopack=debug,warn");
        assert_eq!(args(&["x.zip", "-vv"]).log_directive(), "convopack=trace,debug");
        assert!(Args::try_parse_from(["convopack", "x.zip", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    }
}
