//! Output format selection.
//!
//! Library-first format types that don't depend on CLI frameworks.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> convopack::Result<()> {
//! use convopack::format::{OutputFormat, write_to_format};
//! use convopack::output::OutputConfig;
//!
//! let bytes = std::fs::read("export.zip")?;
//! let result = convopack::parse_archive(Some(&bytes))?;
//!
//! // Pick the format from the output path
//! let format = OutputFormat::from_path("conversations.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! write_to_format(&result, "conversations.jsonl", format, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvopackError, Result};
use crate::output::OutputConfig;
use crate::parser::ParseResult;

/// Output format for parsed archives.
///
/// - [`Json`](OutputFormat::Json) - one document with everything, good for APIs
/// - [`Jsonl`](OutputFormat::Jsonl) - one conversation per line, for pipelines
/// - [`Csv`](OutputFormat::Csv) - one message per row, for spreadsheets and LLM context
///
/// # Example
///
/// ```rust
/// use convopack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("ndjson").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Single pretty-printed JSON document
    #[default]
    Json,

    /// JSON Lines - one conversation object per line
    ///
    /// Also known as NDJSON.
    Jsonl,

    /// CSV with semicolon delimiter, one row per message
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
            OutputFormat::Csv => "text/csv",
        }
    }

    /// Returns the Cargo feature that compiles this format in.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
            OutputFormat::Csv => "csv-output",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use convopack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/data.CSV").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("notes.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        ext.parse().map_err(|_| {
            ConvopackError::invalid_format(format!(
                "Unknown file extension: '.{ext}'. Expected one of: json, jsonl, csv"
            ))
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the parse result to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    result: &ParseResult,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::write_json(result, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::write_jsonl(result, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::write_csv(result, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders the parse result as a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(
    result: &ParseResult,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::to_json(result, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::to_jsonl(result, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::to_csv(result, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

fn feature_disabled(format: OutputFormat) -> ConvopackError {
    ConvopackError::invalid_format(format!(
        "Output format {format} requires the '{}' feature to be enabled",
        format.required_feature()
    ))
}
