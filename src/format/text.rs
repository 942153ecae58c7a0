/*!
 * Pieces shared by the long and short text codecs: header handling, line
 * numbering, Praat string quoting, number parsing, output encoding, and the
 * accumulator both line parsers fill in.
 */

use std::borrow::Cow;
use std::fmt::Write;

use log::{trace, warn};

use crate::errors::{Result, TextGridError};
use crate::format::{TEXT_HEADER, TextEncoding};
use crate::model::{Interval, Point, TextGrid, Tier, TierKind};

/// A non-blank, trimmed logical line with the 1-based position where it starts
///
/// A quoted value that spans line breaks is joined into one logical line with
/// `\n` separators; only such joined lines are owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: Cow<'a, str>,
}

/// Check the three header lines and return the non-blank lines after them
pub(crate) fn body_lines(text: &str) -> Result<Vec<Line<'_>>> {
    let mut lines = text.lines().enumerate();
    for expected in TEXT_HEADER {
        match lines.next().map(|(index, line)| (index, line.trim())) {
            Some((_, line)) if line == expected => {}
            Some((index, line)) => {
                return Err(TextGridError::format_at(
                    index + 1,
                    format!("expected header line `{}`, found `{}`", expected, line),
                ));
            }
            None => return Err(TextGridError::format("missing TextGrid header")),
        }
    }

    let mut body = Vec::new();
    while let Some((index, raw)) = lines.next() {
        let first = raw.trim_start();
        if !has_open_quote(first) {
            let text = first.trim_end();
            if !text.is_empty() {
                body.push(Line {
                    number: index + 1,
                    text: Cow::Borrowed(text),
                });
            }
            continue;
        }

        // Quoted value continues on the following lines, kept verbatim
        let mut joined = first.to_string();
        let mut closed = false;
        for (_, next) in lines.by_ref() {
            joined.push('\n');
            joined.push_str(next);
            if !has_open_quote(&joined) {
                closed = true;
                break;
            }
        }
        if !closed {
            return Err(TextGridError::format_at(index + 1, "unterminated quoted string"));
        }
        let end = joined.trim_end().len();
        joined.truncate(end);
        body.push(Line {
            number: index + 1,
            text: Cow::Owned(joined),
        });
    }
    Ok(body)
}

/// Whether a line ends inside a quoted string; doubled quotes count twice
fn has_open_quote(text: &str) -> bool {
    text.matches('"').count() % 2 == 1
}

/// Wrap text in quotes, doubling any quote inside it
pub(crate) fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Strip the quotes of a string value and undo quote doubling
pub(crate) fn unquote(value: &str, line: usize) -> Result<String> {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(|inner| inner.replace("\"\"", "\""))
        .ok_or_else(|| {
            TextGridError::format_at(line, format!("expected a quoted string, found `{}`", value))
        })
}

pub(crate) fn parse_number(value: &str, line: usize) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| TextGridError::format_at(line, format!("expected a number, found `{}`", value)))
}

pub(crate) fn parse_count(value: &str, line: usize) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|_| TextGridError::format_at(line, format!("expected a count, found `{}`", value)))
}

/// Tier kind from a quoted class name such as `"IntervalTier"`
pub(crate) fn parse_kind(value: &str, line: usize) -> Result<TierKind> {
    let class = unquote(value, line)?;
    if class == "TextTier" {
        warn!("Line {}: reading legacy TextTier as a point tier", line);
    }
    TierKind::from_class_name(&class)
        .ok_or_else(|| TextGridError::format_at(line, format!("unknown tier class \"{}\"", class)))
}

/// Existence marker of both text formats (`<exists>` / `<absent>`)
pub(crate) fn parse_exists(value: &str, line: usize) -> Result<bool> {
    match value {
        "<exists>" => Ok(true),
        "<absent>" => Ok(false),
        other => Err(TextGridError::format_at(
            line,
            format!("expected <exists> or <absent>, found `{}`", other),
        )),
    }
}

/// Praat's three-line text header
pub(crate) fn write_header(out: &mut String) -> std::fmt::Result {
    for line in TEXT_HEADER {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Encode serialized text; UTF-16 output starts with a big-endian BOM
pub(crate) fn encode(text: String, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.into_bytes(),
        TextEncoding::Utf16Be => {
            let mut bytes = Vec::with_capacity(2 + text.len() * 2);
            bytes.extend_from_slice(&[0xFE, 0xFF]);
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
            bytes
        }
    }
}

/// Fields of the tier being parsed
#[derive(Debug)]
pub(crate) struct TierBuilder {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
    pub size: usize,
    /// `xmin` of the pending interval, or `xpos` of the pending point
    pub element_start: f64,
    pub element_end: f64,
    tier: Tier,
}

impl TierBuilder {
    fn new(kind: TierKind) -> Self {
        Self {
            name: String::new(),
            xmin: 0.0,
            xmax: 0.0,
            size: 0,
            element_start: 0.0,
            element_end: 0.0,
            tier: Tier::new(kind),
        }
    }

    pub fn kind(&self) -> TierKind {
        self.tier.kind()
    }

    pub fn has_more_elements(&self) -> bool {
        self.tier.len() < self.size
    }

    pub fn next_element_number(&self) -> usize {
        self.tier.len() + 1
    }

    /// Set the tier's end time, which may not precede its start time
    pub fn set_xmax(&mut self, xmax: f64, line: usize) -> Result<()> {
        if xmax < self.xmin {
            return Err(TextGridError::format_at(
                line,
                format!("tier xmax {} is before xmin {}", xmax, self.xmin),
            ));
        }
        self.xmax = xmax;
        Ok(())
    }

    /// Set the pending interval's end time, which may not precede its start time
    pub fn set_element_end(&mut self, xmax: f64, line: usize) -> Result<()> {
        if xmax < self.element_start {
            return Err(TextGridError::format_at(
                line,
                format!("interval xmax {} is before xmin {}", xmax, self.element_start),
            ));
        }
        self.element_end = xmax;
        Ok(())
    }

    /// Complete the pending element with its text
    pub fn push_element(&mut self, text: String, line: usize) -> Result<()> {
        let pushed = match self.tier.kind() {
            TierKind::Interval => Interval::new(text, self.element_start, self.element_end)
                .and_then(|interval| self.tier.push(interval)),
            TierKind::Point => self.tier.push(Point::new(text, self.element_start)),
        };
        pushed.map_err(|error| TextGridError::format_at(line, error.to_string()))
    }
}

/// Grid under construction plus the tier currently being filled
#[derive(Debug)]
pub(crate) struct GridBuilder {
    pub grid: TextGrid,
    pub tier: TierBuilder,
    tiers_expected: usize,
    tiers_done: usize,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self {
            grid: TextGrid::new(),
            tier: TierBuilder::new(TierKind::Interval),
            tiers_expected: 0,
            tiers_done: 0,
        }
    }

    pub fn expect_tiers(&mut self, count: usize) {
        self.tiers_expected = count;
    }

    pub fn has_more_tiers(&self) -> bool {
        self.tiers_done < self.tiers_expected
    }

    pub fn next_tier_number(&self) -> usize {
        self.tiers_done + 1
    }

    pub fn begin_tier(&mut self, kind: TierKind) {
        self.tier = TierBuilder::new(kind);
    }

    /// Move the filled tier into the grid with the extent read from the file
    pub fn finish_tier(&mut self) -> Result<()> {
        let pending = std::mem::replace(&mut self.tier, TierBuilder::new(TierKind::Interval));
        let tier = pending.tier.with_stored_extent(pending.xmin, pending.xmax)?;
        trace!(
            "Parsed {} \"{}\" with {} elements",
            tier.tier_type(),
            pending.name,
            tier.len()
        );
        if self.grid.insert_tier(pending.name.clone(), tier).is_some() {
            warn!("Duplicate tier name \"{}\"; keeping the later tier", pending.name);
        }
        self.tiers_done += 1;
        Ok(())
    }

    pub fn into_grid(self) -> TextGrid {
        self.grid
    }
}
