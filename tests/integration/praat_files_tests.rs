/*!
 * Tests reading TextGrid files as Praat writes them
 */

use textgrids::{Direction, Format, TextGrid, read, read_file};
use textgrids::format::detect;
use crate::common;

const RESOURCES: [(&str, Format); 4] = [
    ("praat_long.TextGrid", Format::LongText),
    ("praat_short.TextGrid", Format::ShortText),
    ("utf16_long.TextGrid", Format::LongText),
    ("praat_binary.TextGrid", Format::Binary),
];

/// Checks the layout every resource shares
fn assert_words_and_tones(grid: &TextGrid) {
    assert_eq!((grid.xmin, grid.xmax), (0.0, 2.5));
    assert_eq!(grid.tier_names().collect::<Vec<_>>(), vec!["words", "tones"]);

    let words = grid.tier("words").unwrap();
    let intervals = words.intervals().unwrap();
    let bounds: Vec<(f64, f64)> = intervals.iter().map(|i| (i.xmin(), i.xmax())).collect();
    assert_eq!(bounds, vec![(0.0, 0.8), (0.8, 1.9), (1.9, 2.5)]);
    assert_eq!(intervals[0].text, "");
    assert_eq!(
        intervals[1].text.transcode(Direction::ToUnicode, true),
        "t\u{0259}\u{0325}"
    );

    let tones = grid.tier("tones").unwrap();
    assert!(tones.is_point_tier());
    assert_eq!((tones.xmin(), tones.xmax()), (0.0, 2.5));
    let points = tones.points().unwrap();
    assert_eq!(points[0].xpos, 1.1);
    assert_eq!(points[0].text, "H*");
    assert_eq!(points[1].xpos, 1.7);
    assert_eq!(points[1].text, "L-L%");
}

/// Test detection of every resource
#[test]
fn test_detect_withPraatFiles_shouldNameVariant() {
    for (name, format) in RESOURCES {
        assert_eq!(detect(&common::read_resource(name)).unwrap(), format, "{}", name);
    }
}

/// Test that all variants of the same annotation parse to the same content
#[test]
fn test_read_withPraatFiles_shouldAgreeOnContent() {
    common::init_logger();
    for (name, _) in RESOURCES {
        let grid = read_file(common::test_resource_path(name)).unwrap();
        assert_words_and_tones(&grid);
    }
}

/// Test that CRLF long text and LF short text give equal grids
#[test]
fn test_read_withLongAndShortText_shouldBeEqual() {
    let long = read(&common::read_resource("praat_long.TextGrid")).unwrap();
    let short = read(&common::read_resource("praat_short.TextGrid")).unwrap();
    assert_eq!(long, short);
}

/// Test that UTF-16 text and binary files with Unicode labels give equal grids
#[test]
fn test_read_withUtf16AndBinary_shouldBeEqual() {
    let utf16 = read(&common::read_resource("utf16_long.TextGrid")).unwrap();
    let binary = read(&common::read_resource("praat_binary.TextGrid")).unwrap();
    assert_eq!(utf16, binary);
    assert_eq!(
        binary.tier("words").unwrap().intervals().unwrap()[1].text,
        "t\u{0259}\u{0325}"
    );
}

/// Test the legacy point tier class name is written back as a point tier
#[test]
fn test_write_withTextTierInput_shouldEmitPointTier() {
    let grid = read(&common::read_resource("praat_short.TextGrid")).unwrap();
    let text = String::from_utf8(grid.to_bytes(Format::LongText).unwrap()).unwrap();
    assert!(text.contains("class = \"PointTier\""));
    assert!(!text.contains("TextTier"));
    assert!(text.contains("points: size = 2"));
    assert_eq!(read(text.as_bytes()).unwrap(), grid);
}
