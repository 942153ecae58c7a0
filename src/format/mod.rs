/*!
 * The three on-disk TextGrid variants and their detection.
 *
 * Each codec module exposes a `parse` and a `write` function; `detect` decides
 * which one a byte buffer needs.
 */

pub mod binary;
pub mod detect;
pub mod long_text;
pub mod short_text;
pub(crate) mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TextGridError;

pub use detect::detect;

/// Signature at the start of every binary TextGrid
pub const BINARY_SIGNATURE: &[u8] = b"ooBinaryFile\x08TextGrid";

/// First three lines of both text variants
pub const TEXT_HEADER: [&str; 3] = ["File type = \"ooTextFile\"", "Object class = \"TextGrid\"", ""];

/// On-disk TextGrid variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Verbose `key = value` lines
    #[default]
    LongText,
    /// One bare value per line
    ShortText,
    /// Big-endian binary
    Binary,
}

impl Format {
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Binary)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LongText => "long_text",
            Self::ShortText => "short_text",
            Self::Binary => "binary",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = TextGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "long_text" | "long" | "text" => Ok(Self::LongText),
            "short_text" | "short" => Ok(Self::ShortText),
            "binary" => Ok(Self::Binary),
            _ => Err(TextGridError::Value(format!("Invalid TextGrid format: {}", s))),
        }
    }
}

/// Character encoding of text variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// UTF-16 big-endian, written with a byte-order mark
    Utf16Be,
}
