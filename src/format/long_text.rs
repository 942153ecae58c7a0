/*!
 * Long text codec: Praat's verbose `key = value` layout.
 *
 * ```text
 * xmin = 0
 * xmax = 1.2
 * tiers? <exists>
 * size = 1
 * item []:
 *     item [1]:
 *         class = "IntervalTier"
 *         name = "phones"
 *         xmin = 0
 *         xmax = 1.2
 *         intervals: size = 2
 *         intervals [1]:
 *             xmin = 0
 *             xmax = 0.5
 *             text = "a"
 * ```
 *
 * Parsing is a finite-state machine over the non-blank lines after the header.
 * Every line is checked against the key the current state expects, and the
 * bracketed indices must count up from 1.
 */

use std::fmt::Write;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, TextGridError};
use crate::format::text::{self, GridBuilder, Line};
use crate::model::{TextGrid, TierElements, TierKind};

static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([A-Za-z]+)\s*=\s*(.*)$").expect("valid key/value regex"));

static EXISTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tiers\?\s*(\S+)$").expect("valid exists regex"));

static ELEMENT_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(intervals|points)\s*:\s*size\s*=\s*(\S+)$").expect("valid size regex")
});

static ITEM_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(item|intervals|points)\s*\[(\d*)\]\s*:$").expect("valid item header regex")
});

/// What the parser expects on the next line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    GridXmin,
    GridXmax,
    Exists,
    TierCount,
    ItemList,
    TierHeader,
    TierClass,
    TierName,
    TierXmin,
    TierXmax,
    TierSize,
    ElementHeader,
    ElementXmin,
    ElementXmax,
    ElementXpos,
    ElementText,
    Done,
}

impl State {
    fn expecting(&self) -> &'static str {
        match self {
            Self::GridXmin | Self::TierXmin | Self::ElementXmin => "xmin = <number>",
            Self::GridXmax | Self::TierXmax | Self::ElementXmax => "xmax = <number>",
            Self::Exists => "tiers? <exists>",
            Self::TierCount => "size = <count>",
            Self::ItemList => "item []:",
            Self::TierHeader => "item [<n>]:",
            Self::TierClass => "class = \"<tier class>\"",
            Self::TierName => "name = \"<name>\"",
            Self::TierSize => "intervals: size = <count>",
            Self::ElementHeader => "intervals [<n>]:",
            Self::ElementXpos => "xpos = <number>",
            Self::ElementText => "text = \"<label>\"",
            Self::Done => "end of input",
        }
    }
}

/// Parse decoded long text, header included
pub fn parse(text: &str) -> Result<TextGrid> {
    let lines = text::body_lines(text)?;
    let mut builder = GridBuilder::new();
    let mut state = State::GridXmin;
    for line in &lines {
        state = step(&mut builder, state, line)?;
    }

    if state != State::Done {
        let next = lines.last().map_or(4, |line| line.number + 1);
        return Err(TextGridError::format_at(
            next,
            format!("unexpected end of input, expected `{}`", state.expecting()),
        ));
    }

    let grid = builder.into_grid();
    debug!("Parsed long text TextGrid with {} tiers", grid.len());
    Ok(grid)
}

fn step(builder: &mut GridBuilder, state: State, line: &Line<'_>) -> Result<State> {
    let next = match state {
        State::GridXmin => {
            builder.grid.xmin = number(line, &["xmin"])?;
            State::GridXmax
        }
        State::GridXmax => {
            builder.grid.xmax = number(line, &["xmax"])?;
            State::Exists
        }
        State::Exists => {
            let marker = EXISTS
                .captures(&line.text)
                .and_then(|caps| caps.get(1))
                .ok_or_else(|| unexpected(line, state))?;
            if text::parse_exists(marker.as_str(), line.number)? {
                State::TierCount
            } else {
                State::Done
            }
        }
        State::TierCount => {
            let count = value(line, &["size"])?;
            builder.expect_tiers(text::parse_count(count, line.number)?);
            State::ItemList
        }
        State::ItemList => {
            header(line, "item", None)?;
            after_tier(builder)
        }
        State::TierHeader => {
            header(line, "item", Some(builder.next_tier_number()))?;
            State::TierClass
        }
        State::TierClass => {
            let kind = text::parse_kind(value(line, &["class"])?, line.number)?;
            builder.begin_tier(kind);
            State::TierName
        }
        State::TierName => {
            builder.tier.name = text::unquote(value(line, &["name"])?, line.number)?;
            State::TierXmin
        }
        State::TierXmin => {
            builder.tier.xmin = number(line, &["xmin"])?;
            State::TierXmax
        }
        State::TierXmax => {
            builder.tier.set_xmax(number(line, &["xmax"])?, line.number)?;
            State::TierSize
        }
        State::TierSize => {
            let caps = ELEMENT_SIZE
                .captures(&line.text)
                .ok_or_else(|| unexpected(line, state))?;
            let keyword = builder.tier.kind().element_name();
            if &caps[1] != keyword {
                return Err(TextGridError::format_at(
                    line.number,
                    format!("{} cannot hold {}", builder.tier.kind(), &caps[1]),
                ));
            }
            builder.tier.size = text::parse_count(&caps[2], line.number)?;
            after_element(builder)?
        }
        State::ElementHeader => {
            let keyword = builder.tier.kind().element_name();
            header(line, keyword, Some(builder.tier.next_element_number()))?;
            match builder.tier.kind() {
                TierKind::Interval => State::ElementXmin,
                TierKind::Point => State::ElementXpos,
            }
        }
        State::ElementXmin => {
            builder.tier.element_start = number(line, &["xmin"])?;
            State::ElementXmax
        }
        State::ElementXmax => {
            builder.tier.set_element_end(number(line, &["xmax"])?, line.number)?;
            State::ElementText
        }
        State::ElementXpos => {
            builder.tier.element_start = number(line, &["xpos", "number"])?;
            State::ElementText
        }
        State::ElementText => {
            let label = text::unquote(value(line, &["text", "mark"])?, line.number)?;
            builder.tier.push_element(label, line.number)?;
            after_element(builder)?
        }
        State::Done => {
            return Err(TextGridError::format_at(
                line.number,
                format!("unexpected content after the last tier: `{}`", line.text),
            ));
        }
    };
    Ok(next)
}

/// State after an element, or after a tier header when the tier is empty
fn after_element(builder: &mut GridBuilder) -> Result<State> {
    if builder.tier.has_more_elements() {
        return Ok(State::ElementHeader);
    }
    builder.finish_tier()?;
    Ok(after_tier(builder))
}

fn after_tier(builder: &GridBuilder) -> State {
    if builder.has_more_tiers() {
        State::TierHeader
    } else {
        State::Done
    }
}

fn unexpected(line: &Line<'_>, state: State) -> TextGridError {
    TextGridError::format_at(
        line.number,
        format!("expected `{}`, found `{}`", state.expecting(), line.text),
    )
}

/// Value of a `key = value` line whose key is one of `keys`
fn value<'l>(line: &'l Line<'_>, keys: &[&str]) -> Result<&'l str> {
    let caps = KEY_VALUE.captures(&line.text).ok_or_else(|| {
        TextGridError::format_at(line.number, format!("expected `key = value`, found `{}`", line.text))
    })?;
    let (Some(key), Some(raw)) = (caps.get(1), caps.get(2)) else {
        return Err(TextGridError::format_at(line.number, "malformed key/value line"));
    };
    if !keys.contains(&key.as_str()) {
        return Err(TextGridError::format_at(
            line.number,
            format!("expected key `{}`, found `{}`", keys[0], key.as_str()),
        ));
    }
    Ok(raw.as_str().trim())
}

fn number(line: &Line<'_>, keys: &[&str]) -> Result<f64> {
    text::parse_number(value(line, keys)?, line.number)
}

/// Check a `name [n]:` line; `None` expects the empty `item []:`
fn header(line: &Line<'_>, keyword: &str, index: Option<usize>) -> Result<()> {
    let caps = ITEM_HEADER.captures(&line.text).ok_or_else(|| {
        TextGridError::format_at(line.number, format!("expected `{} [...]:`, found `{}`", keyword, line.text))
    })?;
    if &caps[1] != keyword {
        return Err(TextGridError::format_at(
            line.number,
            format!("expected `{}`, found `{}`", keyword, &caps[1]),
        ));
    }
    let found = &caps[2];
    let matches = match index {
        None => found.is_empty(),
        Some(index) => found.parse::<usize>().is_ok_and(|n| n == index),
    };
    if !matches {
        let expected = index.map(|i| i.to_string()).unwrap_or_default();
        return Err(TextGridError::format_at(
            line.number,
            format!("expected index [{}], found [{}]", expected, found),
        ));
    }
    Ok(())
}

/// Serialize to long text
pub fn write(grid: &TextGrid) -> Result<String> {
    let mut out = String::new();
    text::write_header(&mut out)?;
    writeln!(out, "xmin = {}", grid.xmin)?;
    writeln!(out, "xmax = {}", grid.xmax)?;
    writeln!(out, "tiers? <exists>")?;
    writeln!(out, "size = {}", grid.len())?;
    writeln!(out, "item []:")?;

    for (tier_number, (name, tier)) in grid.iter().enumerate() {
        let keyword = tier.kind().element_name();
        writeln!(out, "    item [{}]:", tier_number + 1)?;
        writeln!(out, "        class = {}", text::quote(tier.tier_type()))?;
        writeln!(out, "        name = {}", text::quote(name))?;
        writeln!(out, "        xmin = {}", tier.xmin())?;
        writeln!(out, "        xmax = {}", tier.xmax())?;
        writeln!(out, "        {}: size = {}", keyword, tier.len())?;

        match tier.elements() {
            TierElements::Intervals(intervals) => {
                for (i, interval) in intervals.iter().enumerate() {
                    writeln!(out, "        {} [{}]:", keyword, i + 1)?;
                    writeln!(out, "            xmin = {}", interval.xmin())?;
                    writeln!(out, "            xmax = {}", interval.xmax())?;
                    writeln!(out, "            text = {}", text::quote(&interval.text))?;
                }
            }
            TierElements::Points(points) => {
                for (i, point) in points.iter().enumerate() {
                    writeln!(out, "        {} [{}]:", keyword, i + 1)?;
                    writeln!(out, "            xpos = {}", point.xpos)?;
                    writeln!(out, "            text = {}", text::quote(&point.text))?;
                }
            }
        }
    }
    Ok(out)
}
