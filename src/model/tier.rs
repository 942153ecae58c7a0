use std::fmt;

use log::debug;

use crate::errors::{Result, TextGridError};
use crate::model::interval::{Interval, Point};

/// Which kind of element a tier holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Interval,
    Point,
}

impl TierKind {
    /// Class name written to files
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Interval => "IntervalTier",
            Self::Point => "PointTier",
        }
    }

    /// Element list keyword of the long text format
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Interval => "intervals",
            Self::Point => "points",
        }
    }

    /// Parse a tier class name; `TextTier` is Praat's own name for point tiers
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "IntervalTier" => Some(Self::Interval),
            "PointTier" | "TextTier" => Some(Self::Point),
            _ => None,
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Either kind of tier element
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Interval(Interval),
    Point(Point),
}

impl Element {
    pub fn kind(&self) -> TierKind {
        match self {
            Self::Interval(_) => TierKind::Interval,
            Self::Point(_) => TierKind::Point,
        }
    }
}

impl From<Interval> for Element {
    fn from(interval: Interval) -> Self {
        Self::Interval(interval)
    }
}

impl From<Point> for Element {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

/// Homogeneous element storage of a tier
#[derive(Debug, Clone, PartialEq)]
pub enum TierElements {
    Intervals(Vec<Interval>),
    Points(Vec<Point>),
}

/// An ordered sequence of intervals or points, never both
///
/// The extent is either set explicitly (parsers always do) or inferred from
/// the first and last element.
#[derive(Debug, Clone)]
pub struct Tier {
    elements: TierElements,
    extent: Option<(f64, f64)>,
}

impl Tier {
    /// Create an empty tier of the given kind
    pub fn new(kind: TierKind) -> Self {
        let elements = match kind {
            TierKind::Interval => TierElements::Intervals(Vec::new()),
            TierKind::Point => TierElements::Points(Vec::new()),
        };
        Self {
            elements,
            extent: None,
        }
    }

    /// Interval tier whose extent follows its elements
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self {
            elements: TierElements::Intervals(intervals),
            extent: None,
        }
    }

    /// Point tier whose extent follows its elements
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            elements: TierElements::Points(points),
            extent: None,
        }
    }

    /// Builder form of `set_extent`
    pub fn with_extent(mut self, xmin: f64, xmax: f64) -> Result<Self> {
        self.set_extent(xmin, xmax)?;
        Ok(self)
    }

    /// Set an explicit extent; negative or reversed extents are rejected
    pub fn set_extent(&mut self, xmin: f64, xmax: f64) -> Result<()> {
        check_extent(xmin, xmax)?;
        self.extent = Some((xmin, xmax));
        Ok(())
    }

    /// Extent as stored in a file, where Praat allows negative times
    ///
    /// Only the order of the bounds is checked.
    pub(crate) fn with_stored_extent(mut self, xmin: f64, xmax: f64) -> Result<Self> {
        if xmin.is_nan() || xmax.is_nan() || xmin > xmax {
            return Err(TextGridError::InvariantViolation(format!(
                "tier xmin {} > xmax {}",
                xmin, xmax
            )));
        }
        self.extent = Some((xmin, xmax));
        Ok(self)
    }

    /// Whether the extent was set rather than inferred
    pub fn has_explicit_extent(&self) -> bool {
        self.extent.is_some()
    }

    pub fn kind(&self) -> TierKind {
        match self.elements {
            TierElements::Intervals(_) => TierKind::Interval,
            TierElements::Points(_) => TierKind::Point,
        }
    }

    pub fn is_point_tier(&self) -> bool {
        self.kind() == TierKind::Point
    }

    /// `"IntervalTier"` or `"PointTier"`
    pub fn tier_type(&self) -> &'static str {
        self.kind().class_name()
    }

    pub fn xmin(&self) -> f64 {
        self.extent.map_or_else(|| self.inferred_extent().0, |(xmin, _)| xmin)
    }

    pub fn xmax(&self) -> f64 {
        self.extent.map_or_else(|| self.inferred_extent().1, |(_, xmax)| xmax)
    }

    fn inferred_extent(&self) -> (f64, f64) {
        match &self.elements {
            TierElements::Intervals(intervals) => match (intervals.first(), intervals.last()) {
                (Some(first), Some(last)) => (first.xmin(), last.xmax()),
                _ => (0.0, 0.0),
            },
            TierElements::Points(points) => match (points.first(), points.last()) {
                (Some(first), Some(last)) => (first.xpos, last.xpos),
                _ => (0.0, 0.0),
            },
        }
    }

    pub fn len(&self) -> usize {
        match &self.elements {
            TierElements::Intervals(intervals) => intervals.len(),
            TierElements::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn elements(&self) -> &TierElements {
        &self.elements
    }

    pub fn intervals(&self) -> Option<&[Interval]> {
        match &self.elements {
            TierElements::Intervals(intervals) => Some(intervals),
            TierElements::Points(_) => None,
        }
    }

    pub fn intervals_mut(&mut self) -> Option<&mut [Interval]> {
        match &mut self.elements {
            TierElements::Intervals(intervals) => Some(intervals),
            TierElements::Points(_) => None,
        }
    }

    pub fn points(&self) -> Option<&[Point]> {
        match &self.elements {
            TierElements::Points(points) => Some(points),
            TierElements::Intervals(_) => None,
        }
    }

    pub fn points_mut(&mut self) -> Option<&mut [Point]> {
        match &mut self.elements {
            TierElements::Points(points) => Some(points),
            TierElements::Intervals(_) => None,
        }
    }

    /// Append an element; its kind must match the tier's
    pub fn push(&mut self, element: impl Into<Element>) -> Result<()> {
        match (&mut self.elements, element.into()) {
            (TierElements::Intervals(intervals), Element::Interval(interval)) => {
                intervals.push(interval);
                Ok(())
            }
            (TierElements::Points(points), Element::Point(point)) => {
                points.push(point);
                Ok(())
            }
            (_, element) => Err(TextGridError::InvariantViolation(format!(
                "cannot append {} element to {}",
                element.kind().element_name(),
                self.tier_type()
            ))),
        }
    }

    /// Concatenate with a tier of the same kind that starts where this one ends, or later
    pub fn concat(&self, other: &Tier) -> Result<Tier> {
        if self.kind() != other.kind() {
            return Err(TextGridError::InvariantViolation(format!(
                "cannot concatenate {} with {}",
                self.tier_type(),
                other.tier_type()
            )));
        }
        if self.xmax() > other.xmin() {
            return Err(TextGridError::InvariantViolation(format!(
                "cannot extend a tier ending at {} with one beginning at {}",
                self.xmax(),
                other.xmin()
            )));
        }

        let elements = match (&self.elements, &other.elements) {
            (TierElements::Intervals(a), TierElements::Intervals(b)) => {
                TierElements::Intervals(a.iter().chain(b).cloned().collect())
            }
            (TierElements::Points(a), TierElements::Points(b)) => {
                TierElements::Points(a.iter().chain(b).cloned().collect())
            }
            _ => unreachable!("tier kinds checked above"),
        };
        let mut joined = Tier {
            elements,
            extent: None,
        };
        joined.set_extent(self.xmin(), other.xmax())?;
        Ok(joined)
    }

    /// Merge intervals `first..=last` into one whose text is their concatenation
    pub fn merge(&mut self, first: usize, last: usize) -> Result<()> {
        let TierElements::Intervals(intervals) = &mut self.elements else {
            return Err(TextGridError::InvariantViolation(
                "cannot merge elements of a point tier".to_string(),
            ));
        };
        if first > last || last >= intervals.len() {
            return Err(TextGridError::InvariantViolation(format!(
                "merge range {}..={} is empty for a tier of {} intervals",
                first,
                last,
                intervals.len()
            )));
        }

        let text: String = intervals[first..=last]
            .iter()
            .map(|interval| interval.text.as_str())
            .collect();
        let merged = Interval::new(text, intervals[first].xmin(), intervals[last].xmax())?;
        intervals.splice(first..=last, std::iter::once(merged));
        debug!("Merged intervals {}..={} into one", first, last);
        Ok(())
    }

    /// Move the extent and every element by `offset`
    ///
    /// Fails without changing anything when the extent would become negative.
    pub fn offset_time(&mut self, offset: f64) -> Result<()> {
        if self.extent.is_some() || !self.is_empty() {
            check_extent(self.xmin() + offset, self.xmax() + offset)?;
        }
        if let Some((xmin, xmax)) = self.extent {
            self.extent = Some((xmin + offset, xmax + offset));
        }
        match &mut self.elements {
            TierElements::Intervals(intervals) => {
                intervals.iter_mut().for_each(|i| i.offset_time(offset));
            }
            TierElements::Points(points) => {
                points.iter_mut().for_each(|p| p.offset_time(offset));
            }
        }
        Ok(())
    }
}

fn check_extent(xmin: f64, xmax: f64) -> Result<()> {
    if xmin.is_nan() || xmax.is_nan() || xmin < 0.0 || xmax < 0.0 {
        return Err(TextGridError::InvariantViolation(format!(
            "negative tier extent {}..{}",
            xmin, xmax
        )));
    }
    if xmin > xmax {
        return Err(TextGridError::InvariantViolation(format!(
            "tier xmin {} > xmax {}",
            xmin, xmax
        )));
    }
    Ok(())
}

impl PartialEq for Tier {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements && self.xmin() == other.xmin() && self.xmax() == other.xmax()
    }
}
