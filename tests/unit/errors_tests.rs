/*!
 * Tests for error types
 */

use textgrids::{TextGrid, TextGridError};

/// Test error display text
#[test]
fn test_display_withEachVariant_shouldDescribeProblem() {
    assert_eq!(
        TextGridError::format_at(12, "expected a number").to_string(),
        "Format error on line 12: expected a number"
    );
    assert_eq!(
        TextGridError::BinaryFormat("unexpected end of data".to_string()).to_string(),
        "Binary format error: unexpected end of data"
    );
    assert_eq!(
        TextGridError::InvariantViolation("interval xmin 2 > xmax 1".to_string()).to_string(),
        "Invariant violation: interval xmin 2 > xmax 1"
    );
    assert_eq!(
        TextGridError::Value("row 3: expected 2 or 3 fields, found 1".to_string()).to_string(),
        "Value error: row 3: expected 2 or 3 fields, found 1"
    );
}

/// Test conversion from I/O errors
#[test]
fn test_from_ioError_shouldWrap() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.TextGrid");
    let error: TextGridError = io.into();
    assert!(matches!(error, TextGridError::Io(_)));
    assert!(error.to_string().starts_with("File error"));
}

/// Test that truncated binary input reports a binary error
#[test]
fn test_parse_withTruncatedBinary_shouldReportBinaryFormat() {
    let error = TextGrid::parse(b"ooBinaryFile\x08TextGrid\x00\x00").unwrap_err();
    assert!(matches!(error, TextGridError::BinaryFormat(_)));
    assert_eq!(error.line(), None);
}
