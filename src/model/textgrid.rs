use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::codec;
use crate::delimited::{self, IntervalRecord};
use crate::errors::{Result, TextGridError};
use crate::format::Format;
use crate::model::tier::Tier;

/// A named, ordered collection of tiers over a shared time axis
///
/// Tier order is insertion order and is the order tiers are written in.
/// Replacing a tier keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGrid {
    pub xmin: f64,
    pub xmax: f64,
    tiers: Vec<(String, Tier)>,
    index: HashMap<String, usize>,
}

impl TextGrid {
    /// Empty grid spanning `0..0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty grid with the given global extent
    pub fn with_extent(xmin: f64, xmax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ..Self::default()
        }
    }

    /// Parse any of the three file variants
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        codec::read(bytes)
    }

    /// Serialize in the given variant
    pub fn to_bytes(&self, format: Format) -> Result<Vec<u8>> {
        codec::write(self, format)
    }

    /// Add a tier, or replace the one with the same name in place
    ///
    /// Returns the replaced tier, if any.
    pub fn insert_tier(&mut self, name: impl Into<String>, tier: Tier) -> Option<Tier> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => Some(std::mem::replace(&mut self.tiers[position].1, tier)),
            None => {
                self.index.insert(name.clone(), self.tiers.len());
                self.tiers.push((name, tier));
                None
            }
        }
    }

    pub fn tier(&self, name: &str) -> Result<&Tier> {
        self.index
            .get(name)
            .map(|&position| &self.tiers[position].1)
            .ok_or_else(|| TextGridError::TierNotFound(name.to_string()))
    }

    pub fn tier_mut(&mut self, name: &str) -> Result<&mut Tier> {
        match self.index.get(name) {
            Some(&position) => Ok(&mut self.tiers[position].1),
            None => Err(TextGridError::TierNotFound(name.to_string())),
        }
    }

    pub fn contains_tier(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Remove a tier; later tiers move up one position
    pub fn remove_tier(&mut self, name: &str) -> Result<Tier> {
        let position = self
            .index
            .remove(name)
            .ok_or_else(|| TextGridError::TierNotFound(name.to_string()))?;
        let (_, tier) = self.tiers.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(tier)
    }

    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|(name, _)| name.as_str())
    }

    /// Tiers in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tier)> {
        self.tiers.iter().map(|(name, tier)| (name.as_str(), tier))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Move the global extent and every tier by `offset`
    ///
    /// Either every tier moves or, on error, nothing does.
    pub fn offset_time(&mut self, offset: f64) -> Result<()> {
        let (xmin, xmax) = (self.xmin + offset, self.xmax + offset);
        if xmin < 0.0 || xmax < 0.0 {
            return Err(TextGridError::InvariantViolation(format!(
                "offset {} moves the grid extent below zero",
                offset
            )));
        }

        let mut shifted = self.tiers.clone();
        for (_, tier) in shifted.iter_mut() {
            tier.offset_time(offset)?;
        }
        self.tiers = shifted;
        self.xmin = xmin;
        self.xmax = xmax;
        debug!("Shifted {} tiers by {}", self.tiers.len(), offset);
        Ok(())
    }

    /// Build an interval tier from `{label, begin, end}` records
    ///
    /// The grid's `xmax` grows to cover the new tier.
    pub fn interval_tier_from_records(
        &mut self,
        name: impl Into<String>,
        records: &[IntervalRecord],
    ) -> Result<()> {
        let tier = delimited::tier_from_records(records)?;
        if tier.xmax() > self.xmax {
            self.xmax = tier.xmax();
        }
        self.insert_tier(name, tier);
        Ok(())
    }

    /// `{label, begin, end}` records of a named interval tier
    pub fn interval_tier_to_records(&self, name: &str) -> Result<Vec<IntervalRecord>> {
        delimited::tier_to_records(self.tier(name)?)
    }
}

impl fmt::Display for TextGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<TextGrid xmin={} xmax={} tiers=[", self.xmin, self.xmax)?;
        for (i, (name, tier)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\": {} of {}", name, tier.tier_type(), tier.len())?;
        }
        f.write_str("]>")
    }
}
