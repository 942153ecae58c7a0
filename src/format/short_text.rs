/*!
 * Short text codec: the same content as long text with keys, indices and
 * indentation left out. Every value sits on its own line in a fixed order,
 * so the parser is a finite-state machine that knows which value comes next
 * and fails on the first line that does not fit.
 */

use std::fmt::Write;

use log::debug;

use crate::errors::{Result, TextGridError};
use crate::format::text::{self, GridBuilder, Line};
use crate::model::{TextGrid, TierElements, TierKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    GridXmin,
    GridXmax,
    Exists,
    TierCount,
    TierClass,
    TierName,
    TierXmin,
    TierXmax,
    TierSize,
    ElementXmin,
    ElementXmax,
    ElementXpos,
    ElementText,
    Done,
}

impl State {
    fn expecting(&self) -> &'static str {
        match self {
            Self::GridXmin => "grid xmin",
            Self::GridXmax => "grid xmax",
            Self::Exists => "<exists>",
            Self::TierCount => "tier count",
            Self::TierClass => "tier class",
            Self::TierName => "tier name",
            Self::TierXmin => "tier xmin",
            Self::TierXmax => "tier xmax",
            Self::TierSize => "element count",
            Self::ElementXmin => "interval xmin",
            Self::ElementXmax => "interval xmax",
            Self::ElementXpos => "point xpos",
            Self::ElementText => "element text",
            Self::Done => "end of input",
        }
    }
}

/// Parse decoded short text, header included
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
            format!("unexpected end of input, expected {}", state.expecting()),
        ));
    }

    let grid = builder.into_grid();
    debug!("Parsed short text TextGrid with {} tiers", grid.len());
    Ok(grid)
}

fn step(builder: &mut GridBuilder, state: State, line: &Line<'_>) -> Result<State> {
    let (value, number) = (&*line.text, line.number);
    let next = match state {
        State::GridXmin => {
            builder.grid.xmin = text::parse_number(value, number)?;
            State::GridXmax
        }
        State::GridXmax => {
            builder.grid.xmax = text::parse_number(value, number)?;
            State::Exists
        }
        State::Exists => {
            if text::parse_exists(value, number)? {
                State::TierCount
            } else {
                State::Done
            }
        }
        State::TierCount => {
            builder.expect_tiers(text::parse_count(value, number)?);
            after_tier(builder)
        }
        State::TierClass => {
            builder.begin_tier(text::parse_kind(value, number)?);
            State::TierName
        }
        State::TierName => {
            builder.tier.name = text::unquote(value, number)?;
            State::TierXmin
        }
        State::TierXmin => {
            builder.tier.xmin = text::parse_number(value, number)?;
            State::TierXmax
        }
        State::TierXmax => {
            builder.tier.set_xmax(text::parse_number(value, number)?, number)?;
            State::TierSize
        }
        State::TierSize => {
            builder.tier.size = text::parse_count(value, number)?;
            after_element(builder)?
        }
        State::ElementXmin => {
            builder.tier.element_start = text::parse_number(value, number)?;
            State::ElementXmax
        }
        State::ElementXmax => {
            builder.tier.set_element_end(text::parse_number(value, number)?, number)?;
            State::ElementText
        }
        State::ElementXpos => {
            builder.tier.element_start = text::parse_number(value, number)?;
            State::ElementText
        }
        State::ElementText => {
            builder.tier.push_element(text::unquote(value, number)?, number)?;
            after_element(builder)?
        }
        State::Done => {
            return Err(TextGridError::format_at(
                number,
                format!("unexpected content after the last tier: `{}`", value),
            ));
        }
    };
    Ok(next)
}

fn after_element(builder: &mut GridBuilder) -> Result<State> {
    if builder.tier.has_more_elements() {
        return Ok(match builder.tier.kind() {
            TierKind::Interval => State::ElementXmin,
            TierKind::Point => State::ElementXpos,
        });
    }
    builder.finish_tier()?;
    Ok(after_tier(builder))
}

fn after_tier(builder: &GridBuilder) -> State {
    if builder.has_more_tiers() {
        State::TierClass
    } else {
        State::Done
    }
}

/// Serialize to short text
pub fn write(grid: &TextGrid) -> Result<String> {
    let mut out = String::new();
    text::write_header(&mut out)?;
    writeln!(out, "{}", grid.xmin)?;
    writeln!(out, "{}", grid.xmax)?;
    writeln!(out, "<exists>")?;
    writeln!(out, "{}", grid.len())?;

    for (name, tier) in grid.iter() {
        writeln!(out, "{}", text::quote(tier.tier_type()))?;
        writeln!(out, "{}", text::quote(name))?;
        writeln!(out, "{}", tier.xmin())?;
        writeln!(out, "{}", tier.xmax())?;
        writeln!(out, "{}", tier.len())?;
        match tier.elements() {
            TierElements::Intervals(intervals) => {
                for interval in intervals {
                    writeln!(out, "{}", interval.xmin())?;
                    writeln!(out, "{}", interval.xmax())?;
                    writeln!(out, "{}", text::quote(&interval.text))?;
                }
            }
            TierElements::Points(points) => {
                for point in points {
                    writeln!(out, "{}", point.xpos)?;
                    writeln!(out, "{}", text::quote(&point.text))?;
                }
            }
        }
    }
    Ok(out)
}
