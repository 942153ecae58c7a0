/*!
 * Reading and writing whole TextGrid files.
 *
 * `read` detects the variant and hands the input to the matching codec;
 * `write` serializes in the variant the caller picks. The `_with_config`
 * forms take the text encodings from a `Config`.
 */

use std::fs;
use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::errors::Result;
use crate::format::detect::{self, Classified};
use crate::format::{Format, binary, long_text, short_text, text};
use crate::model::TextGrid;

/// Parse a TextGrid in any variant
pub fn read(bytes: &[u8]) -> Result<TextGrid> {
    read_with_config(bytes, &Config::default())
}

/// Parse a TextGrid, decoding BOM-less text with the configured fallback encoding
pub fn read_with_config(bytes: &[u8], config: &Config) -> Result<TextGrid> {
    match detect::classify(bytes, config.fallback_encoding)? {
        Classified::Binary(payload) => binary::parse_payload(payload),
        Classified::Text {
            format: Format::ShortText,
            text,
        } => short_text::parse(&text),
        Classified::Text { text, .. } => long_text::parse(&text),
    }
}

/// Serialize a TextGrid as UTF-8 text or binary
pub fn write(grid: &TextGrid, format: Format) -> Result<Vec<u8>> {
    write_with_config(grid, format, &Config::default())
}

/// Serialize in the configured default variant
pub fn write_default(grid: &TextGrid, config: &Config) -> Result<Vec<u8>> {
    write_with_config(grid, config.output_format, config)
}

/// Serialize a TextGrid; text variants use the configured output encoding
pub fn write_with_config(grid: &TextGrid, format: Format, config: &Config) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::LongText => text::encode(long_text::write(grid)?, config.output_encoding),
        Format::ShortText => text::encode(short_text::write(grid)?, config.output_encoding),
        Format::Binary => binary::write(grid)?,
    };
    debug!("Serialized {} tiers as {} ({} bytes)", grid.len(), format, bytes.len());
    Ok(bytes)
}

/// Read and parse a TextGrid file
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<TextGrid> {
    let bytes = fs::read(path.as_ref())?;
    debug!("Read {} bytes from {:?}", bytes.len(), path.as_ref());
    read(&bytes)
}

/// Serialize and write a TextGrid file, replacing any existing file
pub fn write_file<P: AsRef<Path>>(path: P, grid: &TextGrid, format: Format) -> Result<()> {
    let bytes = write(grid, format)?;
    fs::write(path.as_ref(), bytes)?;
    Ok(())
}
