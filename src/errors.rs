/*!
 * Error types for the textgrids library.
 *
 * Every parse, construction and serialization failure surfaces as one
 * `TextGridError` variant. Nothing in the codec repairs malformed input or
 * retries: parsing is deterministic, so the same bytes always fail the same way.
 */

use thiserror::Error;

/// Errors produced by the data model, the transcoder and the three codecs
#[derive(Error, Debug)]
pub enum TextGridError {
    /// Malformed text input (long or short text variant)
    #[error("Format error{}: {message}", line_suffix(.line))]
    Format {
        /// 1-based line in the decoded text, when known
        line: Option<usize>,
        /// What was wrong with the line
        message: String,
    },

    /// Malformed, truncated or unrecognized binary input
    #[error("Binary format error: {0}")]
    BinaryFormat(String),

    /// A data model rule was broken (interval bounds, tier kind, extents)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A value could not be interpreted (row arity, non-numeric field)
    #[error("Value error: {0}")]
    Value(String),

    /// Lookup of a tier name that the grid does not hold
    #[error("No tier named \"{0}\"")]
    TierNotFound(String),

    /// Error while building serializer output
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Error from a file operation
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" on line {}", l)).unwrap_or_default()
}

impl TextGridError {
    /// Text format error pinned to a line
    pub fn format_at(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Text format error with no usable line position
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            line: None,
            message: message.into(),
        }
    }

    /// Line number carried by a text format error
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } => *line,
            _ => None,
        }
    }
}

impl From<binrw::Error> for TextGridError {
    fn from(error: binrw::Error) -> Self {
        match error {
            binrw::Error::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::BinaryFormat("unexpected end of data".to_string())
            }
            binrw::Error::AssertFail { pos, message } => {
                Self::BinaryFormat(format!("{} at byte {}", message, pos))
            }
            other => Self::BinaryFormat(other.to_string()),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TextGridError>;
