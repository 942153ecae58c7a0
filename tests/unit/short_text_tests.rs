/*!
 * Tests for the short text codec
 */

use textgrids::format::{detect, long_text, short_text};
use textgrids::{Format, TextGridError, read};
use crate::common;

/// Test round trip of the shared sample grid
#[test]
fn test_parse_withWrittenSample_shouldRoundTrip() {
    let grid = common::sample_grid();
    let out = short_text::write(&grid).unwrap();
    assert_eq!(short_text::parse(&out).unwrap(), grid);
}

/// Test the positional layout of a written grid
#[test]
fn test_write_shouldEmitBareValues() {
    let out = short_text::write(&common::sample_grid()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[3..7], &["0", "1.5", "<exists>", "2"]);
    assert_eq!(&lines[7..12], &["\"IntervalTier\"", "\"phones\"", "0", "1.5", "4"]);
    assert_eq!(lines.last(), Some(&"\"say \"\"L%\"\"\""));
}

/// Test the same content through long and short text
#[test]
fn test_parse_withSameGrid_shouldMatchLongText() {
    let grid = common::sample_grid();
    let from_short = short_text::parse(&short_text::write(&grid).unwrap()).unwrap();
    let from_long = long_text::parse(&long_text::write(&grid).unwrap()).unwrap();
    assert_eq!(from_short, from_long);
}

/// Test that every single dropped line is detected
#[test]
fn test_parse_withAnyLineMissing_shouldFail() {
    let out = short_text::write(&common::sample_grid()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    for skip in 3..lines.len() {
        let text: String = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, line)| format!("{}\n", line))
            .collect();
        let result = short_text::parse(&text);
        assert!(
            matches!(result, Err(TextGridError::Format { .. }) | Err(TextGridError::InvariantViolation(_))),
            "dropping line {} was not detected",
            skip + 1
        );
    }
}

/// Test a number where a label belongs
#[test]
fn test_parse_withNumberForLabel_shouldFailOnThatLine() {
    let out = short_text::write(&common::sample_grid()).unwrap();
    let text = out.replacen("\"H*\"", "0.6", 1);
    let line = text.lines().position(|l| l == "0.6").map(|i| i + 1);
    // The first 0.6 is the xpos, the label line follows it
    let error = short_text::parse(&text).unwrap_err();
    assert_eq!(error.line(), line.map(|l| l + 1));
}

/// Praat short text file whose times start before zero
const NEGATIVE: &str = "File type = \"ooTextFile\"
Object class = \"TextGrid\"

-0.5
1
<exists>
1
\"IntervalTier\"
\"w\"
-0.5
1
1
-0.5
1
\"a\"
";

/// Test a file with negative times through detection and parsing
#[test]
fn test_read_withNegativeTimes_shouldKeepStoredExtent() {
    assert_eq!(detect(NEGATIVE.as_bytes()).unwrap(), Format::ShortText);
    let grid = read(NEGATIVE.as_bytes()).unwrap();
    assert_eq!((grid.xmin, grid.xmax), (-0.5, 1.0));
    let tier = grid.tier("w").unwrap();
    assert_eq!((tier.xmin(), tier.xmax()), (-0.5, 1.0));
    assert_eq!(tier.intervals().unwrap()[0].duration(), 1.5);
    assert_eq!(short_text::write(&grid).unwrap(), NEGATIVE);
}

/// Test reversed interval bounds are reported on the xmax line
#[test]
fn test_parse_withReversedInterval_shouldReportLine() {
    let text = NEGATIVE.replace("-0.5\n1\n\"a\"", "-0.5\n-1\n\"a\"");
    let error = short_text::parse(&text).unwrap_err();
    assert!(matches!(error, TextGridError::Format { line: Some(14), .. }));
}

/// Test a label holding line breaks and quotes
#[test]
fn test_parse_withMultilineLabel_shouldRoundTrip() {
    let text = NEGATIVE.replace("\"a\"", "\"a\nb \"\"c\"\"\n\"");
    let grid = short_text::parse(&text).unwrap();
    let label = &grid.tier("w").unwrap().intervals().unwrap()[0].text;
    assert_eq!(*label, "a\nb \"c\"\n");
    assert_eq!(short_text::write(&grid).unwrap(), text);
}
