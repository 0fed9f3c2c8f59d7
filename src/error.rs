use std::fmt;
use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use thiserror::Error;

/// Why a wait-for relation was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorKind {
    /// The statement does not split into a waiter and a holder
    MalformedLine,
    /// One side of the relation is blank after trimming
    EmptyIdentifier,
    /// An identifier contains embedded whitespace, usually a statement with
    /// more than two tokens
    WhitespaceInIdentifier,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MalformedLine => write!(f, "malformed relation"),
            ParseErrorKind::EmptyIdentifier => write!(f, "empty process name"),
            ParseErrorKind::WhitespaceInIdentifier => {
                write!(f, "process name contains whitespace")
            }
        }
    }
}

/// A rejected wait-for relation, with the 1-based line (or record) number and
/// the raw text that was rejected
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("{kind} on line {line_number}: '{raw_text}'")]
#[diagnostic(
    code(deadlock_lens::parse_error),
    help("Write each relation as 'WAITER -> HOLDER' or 'WAITER HOLDER'; process names may not contain spaces")
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line_number: usize,
    pub raw_text: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line_number: usize, raw_text: impl Into<String>) -> Self {
        Self {
            kind,
            line_number,
            raw_text: raw_text.into(),
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid wait-for relation in '{name}'")]
#[diagnostic(
    code(deadlock_lens::snapshot_parse_error),
    help("Fix the highlighted relation; parsing stops at the first invalid line")
)]
pub struct InputParseError {
    pub name: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("rejected here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: ParseError,
}

impl InputParseError {
    /// Attach the snapshot text to a parse error so the offending line is
    /// highlighted. Record-based input has no line to point at.
    pub fn new(name: &str, text: &str, source: ParseError, highlight_line: bool) -> Self {
        let span = if highlight_line {
            line_span(text, source.line_number)
        } else {
            None
        };

        Self {
            name: name.to_string(),
            source_code: NamedSource::new(name, text.to_string()),
            span,
            source,
        }
    }
}

/// Byte span of a 1-based line, excluding its line terminator
fn line_span(text: &str, line_number: usize) -> Option<SourceSpan> {
    let mut offset = 0;
    for (index, line) in text.split_inclusive('\n').enumerate() {
        if index + 1 == line_number {
            let content = line.trim_end_matches(['\n', '\r']);
            return Some((offset, content.len()).into());
        }
        offset += line.len();
    }
    None
}

#[derive(Error, Debug, Diagnostic)]
pub enum DeadlockLensError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(deadlock_lens::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read wait-for snapshot from stdin")]
    #[diagnostic(
        code(deadlock_lens::stdin_error),
        help("Pipe relations into the command or pass a file path instead")
    )]
    StdinReadError {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan directory '{path}'")]
    #[diagnostic(
        code(deadlock_lens::discovery_error),
        help("Check that the directory is readable")
    )]
    DiscoveryError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid relation records in '{name}'")]
    #[diagnostic(
        code(deadlock_lens::records_error),
        help("Structured snapshots must be a JSON array of {{\"waiter\": ..., \"holder\": ...}} objects")
    )]
    InvalidRecords {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(Box<InputParseError>),

    #[error("JSON serialization error")]
    #[diagnostic(
        code(deadlock_lens::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(deadlock_lens::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(deadlock_lens::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(deadlock_lens::config_error),
        help("Check your command arguments and environment variables")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(deadlock_lens::graph_error),
        help("This may be an internal error with graph processing")
    )]
    GraphError { message: String },
}

impl From<InputParseError> for DeadlockLensError {
    fn from(error: InputParseError) -> Self {
        DeadlockLensError::Parse(Box::new(error))
    }
}
