use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::format::{Format, TextEncoding};

/// Codec configuration
/// Controls the default output variant and the text encodings used when
/// reading input without a byte-order mark and when writing text output.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Variant used by `codec::write_default`
    #[serde(default)]
    pub output_format: Format,

    /// Decoding for text input that carries no byte-order mark
    #[serde(default)]
    pub fallback_encoding: TextEncoding,

    /// Encoding of text output; UTF-16 is written big-endian with a BOM
    #[serde(default)]
    pub output_encoding: TextEncoding,
}

impl Config {
    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.output_format == Format::Binary && self.output_encoding != TextEncoding::Utf8 {
            return Err(anyhow!(
                "Output encoding {:?} only applies to text formats, not binary",
                self.output_encoding
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_format: Format::LongText,
            fallback_encoding: TextEncoding::Utf8,
            output_encoding: TextEncoding::Utf8,
        }
    }
}
