/*!
 * Binary codec: Praat's big-endian `ooBinaryFile` layout.
 *
 * After the signature come the grid extent, an existence byte and the tier
 * count. Each tier carries a length-prefixed class tag, its name, its own
 * extent and its element records. Strings are either ASCII with an `i16`
 * byte length, or `-1` followed by a `u16` code-unit count and UTF-16BE.
 *
 * Record layouts are declared with binrw; the string encoding is a custom
 * `BinRead`/`BinWrite` pair.
 */

use std::io::Cursor;

use binrw::io::{Read, Seek, Write};
use binrw::{BinRead, BinResult, BinWrite, Endian, binrw};
use log::{debug, trace, warn};

use crate::errors::{Result, TextGridError};
use crate::format::BINARY_SIGNATURE;
use crate::model::{Interval, Point, TextGrid, Tier, TierElements, TierKind};

/// Length value announcing a UTF-16 string
const UTF16_MARKER: i16 = -1;

/// A Praat binary string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct PraatString(String);

impl BinRead for PraatString {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        let length = i16::read_options(reader, endian, ())?;

        if length == UTF16_MARKER {
            let count = u16::read_options(reader, endian, ())?;
            let mut units = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                units.push(u16::read_options(reader, Endian::Big, ())?);
            }
            return String::from_utf16(&units)
                .map(Self)
                .map_err(|_| binrw::Error::AssertFail {
                    pos,
                    message: "invalid UTF-16 string".to_string(),
                });
        }

        let length = usize::try_from(length).map_err(|_| binrw::Error::AssertFail {
            pos,
            message: format!("negative string length {}", length),
        })?;
        let mut bytes = vec![0u8; length];
        reader.read_exact(&mut bytes)?;
        if !bytes.is_ascii() {
            return Err(binrw::Error::AssertFail {
                pos,
                message: "non-ASCII byte in ASCII string".to_string(),
            });
        }
        Ok(Self(bytes.into_iter().map(char::from).collect()))
    }
}

impl BinWrite for PraatString {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        let pos = writer.stream_position()?;
        let too_long = || binrw::Error::AssertFail {
            pos,
            message: format!("string of {} bytes is too long", self.0.len()),
        };

        if self.0.is_ascii() {
            let length = i16::try_from(self.0.len()).map_err(|_| too_long())?;
            length.write_options(writer, endian, ())?;
            writer.write_all(self.0.as_bytes())?;
        } else {
            let units: Vec<u16> = self.0.encode_utf16().collect();
            let count = u16::try_from(units.len()).map_err(|_| too_long())?;
            UTF16_MARKER.write_options(writer, endian, ())?;
            count.write_options(writer, endian, ())?;
            for unit in units {
                unit.write_options(writer, Endian::Big, ())?;
            }
        }
        Ok(())
    }
}

#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq)]
struct GridPrelude {
    xmin: f64,
    xmax: f64,
    #[br(map = |flag: u8| flag != 0)]
    #[bw(map = |exists: &bool| u8::from(*exists))]
    exists: bool,
}

#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq)]
struct TierPrelude {
    #[bw(try_calc = u8::try_from(class.len()))]
    class_len: u8,
    #[br(count = class_len)]
    class: Vec<u8>,
    name: PraatString,
    xmin: f64,
    xmax: f64,
    size: i32,
}

#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq)]
struct IntervalRecord {
    xmin: f64,
    xmax: f64,
    text: PraatString,
}

#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq)]
struct PointRecord {
    xpos: f64,
    text: PraatString,
}

fn tier_kind(class: &[u8]) -> Result<TierKind> {
    match class {
        b"IntervalTier" => Ok(TierKind::Interval),
        b"PointTier" => Ok(TierKind::Point),
        b"TextTier" => {
            warn!("Reading legacy TextTier as a point tier");
            Ok(TierKind::Point)
        }
        other => Err(TextGridError::BinaryFormat(format!(
            "unknown tier type \"{}\"",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn count(value: i32, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| TextGridError::BinaryFormat(format!("negative {} count {}", what, value)))
}

/// Parse a complete binary file, signature included
///
/// Each tier keeps the extent stored with it. The grid extent ends up equal to
/// the extent of the last tier, which is how Praat-compatible readers have
/// always treated these files.
pub fn parse(bytes: &[u8]) -> Result<TextGrid> {
    let payload = bytes
        .strip_prefix(BINARY_SIGNATURE)
        .ok_or_else(|| TextGridError::BinaryFormat("missing ooBinaryFile signature".to_string()))?;
    parse_payload(payload)
}

/// Parse the bytes that follow the signature
pub(crate) fn parse_payload(payload: &[u8]) -> Result<TextGrid> {
    let mut reader = Cursor::new(payload);

    let prelude = GridPrelude::read_be(&mut reader)?;
    let mut grid = TextGrid::with_extent(prelude.xmin, prelude.xmax);
    if prelude.exists {
        let tiers = count(i32::read_be(&mut reader)?, "tier")?;
        for _ in 0..tiers {
            let header = TierPrelude::read_be(&mut reader)?;
            let kind = tier_kind(&header.class)?;
            let size = count(header.size, "element")?;

            let mut tier = Tier::new(kind);
            for _ in 0..size {
                match kind {
                    TierKind::Interval => {
                        let pos = reader.position();
                        let record = IntervalRecord::read_be(&mut reader)?;
                        let interval = Interval::new(record.text.0, record.xmin, record.xmax)
                            .map_err(|error| {
                                TextGridError::BinaryFormat(format!("{} at byte {}", error, pos))
                            })?;
                        tier.push(interval)?;
                    }
                    TierKind::Point => {
                        let record = PointRecord::read_be(&mut reader)?;
                        tier.push(Point::new(record.text.0, record.xpos))?;
                    }
                }
            }
            let tier = tier
                .with_stored_extent(header.xmin, header.xmax)
                .map_err(|error| TextGridError::BinaryFormat(error.to_string()))?;
            trace!("Parsed {} \"{}\" with {} elements", kind, header.name.0, size);

            grid.xmin = header.xmin;
            grid.xmax = header.xmax;
            grid.insert_tier(header.name.0, tier);
        }
    }

    let trailing = payload.len() as u64 - reader.position();
    if trailing > 0 {
        return Err(TextGridError::BinaryFormat(format!(
            "{} unexpected bytes after the last tier",
            trailing
        )));
    }
    if (grid.xmin, grid.xmax) != (prelude.xmin, prelude.xmax) {
        warn!(
            "Grid extent {}..{} replaced by the last tier's extent {}..{}",
            prelude.xmin, prelude.xmax, grid.xmin, grid.xmax
        );
    }
    debug!("Parsed binary TextGrid with {} tiers", grid.len());
    Ok(grid)
}

/// Serialize to the binary layout
pub fn write(grid: &TextGrid) -> Result<Vec<u8>> {
    let mut writer = Cursor::new(Vec::new());
    writer.write_all(BINARY_SIGNATURE)?;

    GridPrelude {
        xmin: grid.xmin,
        xmax: grid.xmax,
        exists: true,
    }
    .write_be(&mut writer)?;
    encode_count(grid.len())?.write_be(&mut writer)?;

    for (name, tier) in grid.iter() {
        TierPrelude {
            class: tier.tier_type().as_bytes().to_vec(),
            name: PraatString(name.to_string()),
            xmin: tier.xmin(),
            xmax: tier.xmax(),
            size: encode_count(tier.len())?,
        }
        .write_be(&mut writer)?;

        match tier.elements() {
            TierElements::Intervals(intervals) => {
                for interval in intervals {
                    IntervalRecord {
                        xmin: interval.xmin(),
                        xmax: interval.xmax(),
                        text: PraatString(interval.text.to_string()),
                    }
                    .write_be(&mut writer)?;
                }
            }
            TierElements::Points(points) => {
                for point in points {
                    PointRecord {
                        xpos: point.xpos,
                        text: PraatString(point.text.to_string()),
                    }
                    .write_be(&mut writer)?;
                }
            }
        }
    }
    Ok(writer.into_inner())
}

fn encode_count(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| TextGridError::BinaryFormat(format!("{} elements do not fit a count", len)))
}
