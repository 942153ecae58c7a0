/*!
 * Tests for the long text codec
 */

use textgrids::format::long_text;
use textgrids::{TextGrid, TextGridError, Tier, TierKind};
use crate::common;

const PHONES: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 1.2
tiers? <exists>
size = 1
item []:
    item [1]:
        class = "IntervalTier"
        name = "phones"
        xmin = 0
        xmax = 1.2
        intervals: size = 2
        intervals [1]:
            xmin = 0
            xmax = 0.5
            text = "a"
        intervals [2]:
            xmin = 0.5
            xmax = 1.2
            text = "b"
"#;

/// Test the documented phones example
#[test]
fn test_parse_withPhonesTier_shouldExposeDurationAndMidpoint() {
    let grid = long_text::parse(PHONES).unwrap();
    let tier = grid.tier("phones").unwrap();
    assert_eq!(tier.len(), 2);
    let intervals = tier.intervals().unwrap();
    assert_eq!(intervals[0].duration(), 0.5);
    assert_eq!(intervals[1].midpoint(), 0.85);
}

/// Test writer layout for a point tier
#[test]
fn test_write_withPointTier_shouldUsePointKeys() {
    let out = long_text::write(&common::sample_grid()).unwrap();
    assert!(out.ends_with("            text = \"say \"\"L%\"\"\"\n"));
    assert!(out.contains("        class = \"PointTier\"\n        name = \"tones\"\n"));
    assert!(out.contains("        points: size = 2\n        points [1]:\n            xpos = 0.6\n"));
}

/// Test round trip of the shared sample grid
#[test]
fn test_parse_withWrittenSample_shouldRoundTrip() {
    let grid = common::sample_grid();
    let out = long_text::write(&grid).unwrap();
    assert_eq!(long_text::parse(&out).unwrap(), grid);
}

/// Test a grid without tiers
#[test]
fn test_write_withEmptyGrid_shouldRoundTrip() {
    let grid = TextGrid::with_extent(0.0, 3.0);
    let out = long_text::write(&grid).unwrap();
    assert!(out.contains("size = 0\nitem []:\n"));
    assert_eq!(long_text::parse(&out).unwrap(), grid);
}

/// Test a tier with no elements
#[test]
fn test_write_withEmptyTier_shouldRoundTrip() {
    let mut grid = TextGrid::with_extent(0.0, 2.0);
    grid.insert_tier("empty", Tier::new(TierKind::Point).with_extent(0.0, 2.0).unwrap());
    grid.insert_tier("after", Tier::new(TierKind::Interval).with_extent(0.0, 2.0).unwrap());
    let parsed = long_text::parse(&long_text::write(&grid).unwrap()).unwrap();
    assert_eq!(parsed, grid);
}

/// Test that the wrong key on a checked line fails with its line number
#[test]
fn test_parse_withUnexpectedKey_shouldReportLine() {
    let text = PHONES.replace("        name = \"phones\"", "        label = \"phones\"");
    let error = long_text::parse(&text).unwrap_err();
    assert!(matches!(error, TextGridError::Format { line: Some(11), .. }));
    assert!(error.to_string().contains("name"));
}

/// Test unknown tier classes
#[test]
fn test_parse_withUnknownClass_shouldFail() {
    let text = PHONES.replace("\"IntervalTier\"", "\"PitchTier\"");
    assert!(matches!(long_text::parse(&text), Err(TextGridError::Format { line: Some(10), .. })));
}

/// Test an element list keyword that does not match the tier class
#[test]
fn test_parse_withPointsInIntervalTier_shouldFail() {
    let text = PHONES.replace("intervals: size = 2", "points: size = 2");
    assert!(long_text::parse(&text).is_err());
}

/// Test that reversed interval bounds in a file are reported on their line
#[test]
fn test_parse_withReversedInterval_shouldReportLine() {
    let text = PHONES.replace("xmax = 0.5", "xmax = -0.5");
    let error = long_text::parse(&text).unwrap_err();
    assert!(matches!(error, TextGridError::Format { line: Some(17), .. }));
}

/// Test that a reversed tier extent is reported on its line
#[test]
fn test_parse_withReversedTierExtent_shouldReportLine() {
    let text = PHONES.replacen("xmax = 1.2", "xmax = -1", 2);
    let error = long_text::parse(&text).unwrap_err();
    assert!(matches!(error, TextGridError::Format { line: Some(13), .. }));
}

/// Test a Praat file with negative times
#[test]
fn test_parse_withNegativeTimes_shouldKeepStoredExtent() {
    let text = PHONES.replace("xmin = 0\n", "xmin = -0.5\n");
    let grid = long_text::parse(&text).unwrap();
    assert_eq!(grid.xmin, -0.5);
    let tier = grid.tier("phones").unwrap();
    assert_eq!((tier.xmin(), tier.xmax()), (-0.5, 1.2));
    assert_eq!(tier.intervals().unwrap()[0].xmin(), -0.5);
    assert_eq!(long_text::write(&grid).unwrap(), text);
}

/// Test a label that spans several lines
#[test]
fn test_parse_withMultilineLabel_shouldKeepLineBreaks() {
    let text = PHONES.replace("text = \"b\"", "text = \"first\n\n  second \"\"quoted\"\"\"");
    let grid = long_text::parse(&text).unwrap();
    let intervals = grid.tier("phones").unwrap().intervals().unwrap();
    assert_eq!(intervals[1].text, "first\n\n  second \"quoted\"");
    assert_eq!(long_text::write(&grid).unwrap(), text);
}

/// Test a multi-line label that never closes
#[test]
fn test_parse_withUnterminatedLabel_shouldReportStartLine() {
    let text = PHONES.replace("text = \"a\"", "text = \"a");
    let error = long_text::parse(&text).unwrap_err();
    assert_eq!(error.line(), Some(18));
}

/// Test an unknown existence marker
#[test]
fn test_parse_withUnknownExistsMarker_shouldFail() {
    let text = PHONES.replace("tiers? <exists>", "tiers? <maybe>");
    assert!(matches!(long_text::parse(&text), Err(TextGridError::Format { line: Some(6), .. })));
}
