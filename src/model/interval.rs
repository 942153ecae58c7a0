use std::fmt;

use crate::errors::{Result, TextGridError};
use crate::transcript::Transcript;

/// A labelled time span `xmin..xmax`
///
/// `xmin <= xmax` holds for every constructed value; the bounds are only
/// reachable through accessors so the invariant cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub text: Transcript,
    xmin: f64,
    xmax: f64,
}

impl Interval {
    /// Create an interval, failing when `xmin > xmax` or either bound is NaN
    pub fn new(text: impl Into<Transcript>, xmin: f64, xmax: f64) -> Result<Self> {
        if xmin.is_nan() || xmax.is_nan() || xmin > xmax {
            return Err(TextGridError::InvariantViolation(format!(
                "interval xmin {} > xmax {}",
                xmin, xmax
            )));
        }
        Ok(Self {
            text: text.into(),
            xmin,
            xmax,
        })
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn duration(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Temporal midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        self.xmin + self.duration() / 2.0
    }

    /// Evenly spaced time grid: `steps + 1` timepoints from `xmin` to `xmax`
    pub fn time_grid(&self, steps: usize) -> Result<Vec<f64>> {
        if steps == 0 {
            return Err(TextGridError::Value(
                "time grid needs at least one step".to_string(),
            ));
        }
        let step = self.duration() / steps as f64;
        let mut grid: Vec<f64> = (0..steps).map(|i| self.xmin + step * i as f64).collect();
        grid.push(self.xmax);
        Ok(grid)
    }

    pub fn contains_vowel(&self) -> bool {
        self.text.contains_vowel()
    }

    pub fn starts_with_vowel(&self) -> bool {
        self.text.starts_with_vowel()
    }

    pub fn ends_with_vowel(&self) -> bool {
        self.text.ends_with_vowel()
    }

    /// Move both bounds by `offset`
    pub fn offset_time(&mut self, offset: f64) {
        self.xmin += offset;
        self.xmax += offset;
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Interval text=\"{}\" xmin={} xmax={}>", self.text, self.xmin, self.xmax)
    }
}

/// A labelled instant
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub text: Transcript,
    pub xpos: f64,
}

impl Point {
    pub fn new(text: impl Into<Transcript>, xpos: f64) -> Self {
        Self {
            text: text.into(),
            xpos,
        }
    }

    pub fn offset_time(&mut self, offset: f64) {
        self.xpos += offset;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Point text=\"{}\" xpos={}>", self.text, self.xpos)
    }
}
