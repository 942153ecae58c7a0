/*!
 * In-memory TextGrid data model.
 *
 * A `TextGrid` owns its tiers; a `Tier` owns a homogeneous list of intervals
 * or points. Nothing here performs I/O.
 */

pub mod interval;
pub mod textgrid;
pub mod tier;

pub use interval::{Interval, Point};
pub use textgrid::TextGrid;
pub use tier::{Element, Tier, TierElements, TierKind};
