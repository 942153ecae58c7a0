/*!
 * Tier import and export through plain rows and label records.
 *
 * A row is `[text, xpos]` for a point or `[text, xmin, xmax]` for an interval.
 * The first row decides the tier kind. Records are the serde form
 * `{label, begin, end}` of an interval, suitable for JSON.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TextGridError};
use crate::model::{Element, Interval, Point, Tier, TierElements, TierKind};
use crate::transcript::{Direction, Transcript};

/// One interval as a `{label, begin, end}` record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub label: String,
    pub begin: f64,
    pub end: f64,
}

/// Build a tier from delimited rows
///
/// Zero rows give an empty interval tier. A row with other than two or three
/// fields, or a time field that is not a number, fails with a value error;
/// mixing point and interval rows fails when the odd row is appended.
pub fn import_tier_from_rows<R, S>(rows: &[R]) -> Result<Tier>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut tier: Option<Tier> = None;
    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let fields = row.as_ref();
        let element: Element = match fields {
            [text, xpos] => Point::new(text.as_ref(), time(xpos, row_number)?).into(),
            [text, xmin, xmax] => Interval::new(
                text.as_ref(),
                time(xmin, row_number)?,
                time(xmax, row_number)?,
            )?
            .into(),
            _ => {
                return Err(TextGridError::Value(format!(
                    "row {}: expected 2 or 3 fields, found {}",
                    row_number,
                    fields.len()
                )));
            }
        };
        let kind = element.kind();
        tier.get_or_insert_with(|| Tier::new(kind)).push(element)?;
    }

    let tier = tier.unwrap_or_else(|| Tier::new(TierKind::Interval));
    debug!("Imported {} with {} elements", tier.tier_type(), tier.len());
    Ok(tier)
}

fn time<S: AsRef<str>>(field: &S, row_number: usize) -> Result<f64> {
    let field = field.as_ref().trim();
    field.parse::<f64>().map_err(|_| {
        TextGridError::Value(format!("row {}: `{}` is not a number", row_number, field))
    })
}

/// Rows of a tier, times written with `f64` Display
///
/// With `to_unicode`, labels are transcoded from escape notation to Unicode
/// with index diacritics dropped.
pub fn export_tier_to_rows(tier: &Tier, to_unicode: bool) -> Vec<Vec<String>> {
    let label = |text: &Transcript| {
        if to_unicode {
            text.transcode(Direction::ToUnicode, false).into_string()
        } else {
            text.to_string()
        }
    };

    match tier.elements() {
        TierElements::Intervals(intervals) => intervals
            .iter()
            .map(|i| vec![label(&i.text), i.xmin().to_string(), i.xmax().to_string()])
            .collect(),
        TierElements::Points(points) => points
            .iter()
            .map(|p| vec![label(&p.text), p.xpos.to_string()])
            .collect(),
    }
}

/// Interval tier from `{label, begin, end}` records
pub fn tier_from_records(records: &[IntervalRecord]) -> Result<Tier> {
    let intervals = records
        .iter()
        .map(|record| Interval::new(record.label.as_str(), record.begin, record.end))
        .collect::<Result<Vec<_>>>()?;
    Ok(Tier::from_intervals(intervals))
}

/// `{label, begin, end}` records of an interval tier
pub fn tier_to_records(tier: &Tier) -> Result<Vec<IntervalRecord>> {
    let intervals = tier.intervals().ok_or_else(|| {
        TextGridError::InvariantViolation("a point tier has no interval records".to_string())
    })?;
    Ok(intervals
        .iter()
        .map(|interval| IntervalRecord {
            label: interval.text.to_string(),
            begin: interval.xmin(),
            end: interval.xmax(),
        })
        .collect())
}
