/*!
 * Tests for the binary codec
 */

use textgrids::format::{BINARY_SIGNATURE, binary};
use textgrids::{Interval, TextGrid, TextGridError, Tier};
use crate::common;

/// Builds the documented single point tier file
fn tones_file() -> Vec<u8> {
    let mut bytes = BINARY_SIGNATURE.to_vec();
    bytes.extend_from_slice(&0.0f64.to_be_bytes());
    bytes.extend_from_slice(&1.0f64.to_be_bytes());
    bytes.push(1);
    bytes.extend_from_slice(&1i32.to_be_bytes());
    bytes.push(9);
    bytes.extend_from_slice(b"PointTier");
    bytes.extend_from_slice(&5i16.to_be_bytes());
    bytes.extend_from_slice(b"tones");
    bytes.extend_from_slice(&0.0f64.to_be_bytes());
    bytes.extend_from_slice(&1.0f64.to_be_bytes());
    bytes.extend_from_slice(&1i32.to_be_bytes());
    bytes.extend_from_slice(&0.3f64.to_be_bytes());
    bytes.extend_from_slice(&1i16.to_be_bytes());
    bytes.extend_from_slice(b"H");
    bytes
}

/// Test the documented point tier example
#[test]
fn test_parse_withSinglePointTier_shouldReadText() {
    let grid = binary::parse(&tones_file()).unwrap();
    let tier = grid.tier("tones").unwrap();
    assert!(tier.is_point_tier());
    assert_eq!(tier.len(), 1);
    assert_eq!(tier.points().unwrap()[0].text, "H");
}

/// Test round trip of the shared sample grid, including UTF-16 labels
#[test]
fn test_parse_withWrittenSample_shouldRoundTrip() {
    common::init_logger();
    let grid = common::sample_grid();
    let bytes = binary::write(&grid).unwrap();
    assert!(bytes.starts_with(BINARY_SIGNATURE));
    assert_eq!(binary::parse(&bytes).unwrap(), grid);
}

/// Test that the grid extent follows the last tier
#[test]
fn test_parse_withDifferingTierExtent_shouldTakeLastTierExtent() {
    let mut grid = TextGrid::with_extent(0.0, 5.0);
    let tier = Tier::from_intervals(vec![Interval::new("a", 1.0, 2.0).unwrap()])
        .with_extent(1.0, 2.0)
        .unwrap();
    grid.insert_tier("words", tier.clone());

    let parsed = binary::parse(&binary::write(&grid).unwrap()).unwrap();
    assert_eq!((parsed.xmin, parsed.xmax), (1.0, 2.0));
    assert_eq!(parsed.tier("words").unwrap(), &tier);
}

/// Test a cleared existence byte
#[test]
fn test_parse_withAbsentTiers_shouldReturnEmptyGrid() {
    let mut bytes = BINARY_SIGNATURE.to_vec();
    bytes.extend_from_slice(&0.0f64.to_be_bytes());
    bytes.extend_from_slice(&4.0f64.to_be_bytes());
    bytes.push(0);
    let grid = binary::parse(&bytes).unwrap();
    assert!(grid.is_empty());
    assert_eq!(grid.xmax, 4.0);
}

/// Test every truncation point of a valid file
#[test]
fn test_parse_withAnyTruncation_shouldFailWithBinaryFormat() {
    let bytes = tones_file();
    for cut in BINARY_SIGNATURE.len()..bytes.len() {
        let result = binary::parse(&bytes[..cut]);
        assert!(
            matches!(result, Err(TextGridError::BinaryFormat(_))),
            "truncation at {} gave {:?}",
            cut,
            result
        );
    }
}

/// Test a negative tier count
#[test]
fn test_parse_withNegativeTierCount_shouldFail() {
    let mut bytes = BINARY_SIGNATURE.to_vec();
    bytes.extend_from_slice(&0.0f64.to_be_bytes());
    bytes.extend_from_slice(&1.0f64.to_be_bytes());
    bytes.push(1);
    bytes.extend_from_slice(&(-3i32).to_be_bytes());
    assert!(matches!(binary::parse(&bytes), Err(TextGridError::BinaryFormat(_))));
}

/// Test a non-ASCII byte in an ASCII string
#[test]
fn test_parse_withNonAsciiLabel_shouldFail() {
    let mut bytes = tones_file();
    let last = bytes.len() - 1;
    bytes[last] = 0xC3;
    assert!(matches!(binary::parse(&bytes), Err(TextGridError::BinaryFormat(_))));
}

/// Test a missing signature
#[test]
fn test_parse_withoutSignature_shouldFail() {
    let bytes = tones_file();
    assert!(binary::parse(&bytes[1..]).is_err());
}
