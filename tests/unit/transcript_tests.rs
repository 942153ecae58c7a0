/*!
 * Tests for escape notation transcoding
 */

use textgrids::transcript::symbols;
use textgrids::{Direction, Transcript, transcode};

/// Test round trip of inline symbols only
#[test]
fn test_transcode_withInlineSymbols_shouldRoundTrip() {
    let escaped = r"\'1\sh\ae\ng\:f";
    let unicode = transcode(escaped, Direction::ToUnicode, false);
    assert_eq!(unicode, "\u{02c8}\u{0283}\u{00e6}\u{014b}\u{02d0}");
    assert_eq!(transcode(&unicode, Direction::ToEscape, false), escaped);
}

/// Test that every table entry survives a round trip in both directions
#[test]
fn test_transcode_withEveryInlineSymbol_shouldRoundTrip() {
    let tables = [symbols::VOWELS, symbols::CONSONANTS, symbols::INLINE_DIACRITICS];
    for (escape, unicode) in tables.iter().flat_map(|table| table.iter()) {
        let forward = transcode(escape, Direction::ToUnicode, true);
        assert_eq!(forward, unicode.to_string(), "{}", escape);
        assert_eq!(transcode(&forward, Direction::ToEscape, true), *escape);
    }
}

/// Test index diacritics stay attached to their host
#[test]
fn test_transcode_withRetainedIndexDiacritics_shouldKeepAttachment() {
    let escaped = r"\ng\0va\~^";
    let unicode = transcode(escaped, Direction::ToUnicode, true);
    assert_eq!(unicode, "\u{014b}\u{0325}a\u{0303}");
    assert_eq!(transcode(&unicode, Direction::ToEscape, true), escaped);
}

/// Test dropping of index diacritics in both directions
#[test]
fn test_transcode_withoutRetaining_shouldStripIndexDiacritics() {
    assert_eq!(transcode(r"\ng\0va\~^", Direction::ToUnicode, false), "\u{014b}a");
    assert_eq!(transcode("\u{014b}\u{0325}a\u{0303}", Direction::ToEscape, false), r"\nga");
}

/// Test plain text is untouched
#[test]
fn test_transcode_withPlainText_shouldBeIdentity() {
    for direction in [Direction::ToUnicode, Direction::ToEscape] {
        assert_eq!(transcode("hello world", direction, true), "hello world");
        assert_eq!(transcode("", direction, false), "");
    }
}

/// Test transcript value behaviour
#[test]
fn test_transcript_shouldBehaveAsString() {
    let label = Transcript::from(r"t\sw");
    assert_eq!(label, r"t\sw");
    assert_eq!(label.len(), 4);
    assert!(label.starts_with('t'));
    assert_eq!(label.to_plain_unicode(), "t\u{0259}");
    assert_eq!(String::from(label.clone()), r"t\sw");
    assert_eq!(serde_json::to_string(&label).unwrap(), r#""t\\sw""#);
}

/// Test vowel predicates over both notations
#[test]
fn test_transcript_vowelPredicates_shouldAgreeAcrossNotations() {
    for escaped in [r"\sw", r"t\ae", r"\o/k", "ka", r"\sh\0v", r"\ri\i-\0v"] {
        let escaped = Transcript::from(escaped);
        let unicode = escaped.transcode(Direction::ToUnicode, true);
        assert_eq!(escaped.contains_vowel(), unicode.contains_vowel(), "{}", escaped);
        assert_eq!(escaped.starts_with_vowel(), unicode.starts_with_vowel(), "{}", escaped);
        assert_eq!(escaped.ends_with_vowel(), unicode.ends_with_vowel(), "{}", escaped);
    }
}

/// Test vowel predicate results on known labels
#[test]
fn test_transcript_endsWithVowel_withTrailingDiacritic_shouldIgnoreDiacritic() {
    assert!(Transcript::from(r"k\i-\0v").ends_with_vowel());
    assert!(!Transcript::from(r"\sh\0v").contains_vowel());
    assert!(Transcript::from("\u{00f8}").starts_with_vowel());
}
