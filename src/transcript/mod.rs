/*!
 * Transcript labels and Praat escape notation transcoding.
 *
 * Praat writes IPA with backslash escapes (`\sw` for ə, `\0v` for the
 * voiceless ring). A `Transcript` is a plain string value; `transcode`
 * converts between the escape notation and Unicode in either direction.
 *
 * Index diacritics belong to the symbol before them. Transcoding first splits
 * the text into clusters (a host symbol plus the index diacritics attached to
 * it), converts the host, then re-emits the diacritics after the converted
 * host, or drops them when they are not retained.
 */

pub mod symbols;

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use self::symbols::{Symbol, SymbolClass, ESCAPE_LEN};

/// Transcoding direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Praat escape sequences to Unicode IPA
    ToUnicode,
    /// Unicode IPA to Praat escape sequences
    ToEscape,
}

/// Text label of an interval or point
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(String);

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Convert between escape notation and Unicode
    pub fn transcode(&self, direction: Direction, retain_diacritics: bool) -> Transcript {
        Transcript(transcode(&self.0, direction, retain_diacritics))
    }

    /// Unicode form with index diacritics removed
    pub fn to_plain_unicode(&self) -> String {
        plain_unicode(&self.0)
    }

    pub fn contains_vowel(&self) -> bool {
        plain_unicode(&self.0).chars().any(symbols::is_unicode_vowel)
    }

    pub fn starts_with_vowel(&self) -> bool {
        plain_unicode(&self.0)
            .chars()
            .next()
            .is_some_and(symbols::is_unicode_vowel)
    }

    pub fn ends_with_vowel(&self) -> bool {
        plain_unicode(&self.0)
            .chars()
            .next_back()
            .is_some_and(symbols::is_unicode_vowel)
    }
}

impl Deref for Transcript {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Transcript {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Transcript {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Transcript {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<Transcript> for String {
    fn from(text: Transcript) -> Self {
        text.0
    }
}

impl PartialEq<str> for Transcript {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Transcript {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One unit of input: a known symbol or a character passed through untouched
#[derive(Debug, Clone, Copy)]
enum Piece {
    Known(Symbol),
    Other(char),
}

/// A host piece and the index diacritics written after it
#[derive(Debug, Default)]
struct Cluster {
    host: Option<Piece>,
    marks: Vec<Symbol>,
}

/// Convert `text` between escape notation and Unicode
pub fn transcode(text: &str, direction: Direction, retain_diacritics: bool) -> String {
    let pieces = match direction {
        Direction::ToUnicode => split_escaped(text),
        Direction::ToEscape => split_unicode(text),
    };

    let mut out = String::with_capacity(text.len());
    for cluster in clusters(pieces) {
        if let Some(host) = cluster.host {
            emit(&mut out, host, direction);
        }
        if retain_diacritics {
            for mark in cluster.marks {
                emit(&mut out, Piece::Known(mark), direction);
            }
        }
    }
    out
}

/// Unicode form with every index diacritic removed, in either input notation
fn plain_unicode(text: &str) -> String {
    transcode(text, Direction::ToUnicode, false)
        .chars()
        .filter(|&c| !symbols::is_index_mark(c))
        .collect()
}

fn split_escaped(text: &str) -> Vec<Piece> {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + ESCAPE_LEN <= chars.len() {
            let candidate: String = chars[i..i + ESCAPE_LEN].iter().collect();
            if let Some(symbol) = symbols::by_escape(&candidate) {
                pieces.push(Piece::Known(symbol));
                i += ESCAPE_LEN;
                continue;
            }
        }
        pieces.push(Piece::Other(chars[i]));
        i += 1;
    }
    pieces
}

fn split_unicode(text: &str) -> Vec<Piece> {
    text.chars()
        .map(|c| match symbols::by_unicode(c) {
            Some(symbol) => Piece::Known(symbol),
            None => Piece::Other(c),
        })
        .collect()
}

fn clusters(pieces: Vec<Piece>) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Known(symbol) if symbol.class == SymbolClass::IndexDiacritic => {
                match clusters.last_mut() {
                    Some(cluster) => cluster.marks.push(symbol),
                    // Diacritic with nothing before it
                    None => clusters.push(Cluster {
                        host: None,
                        marks: vec![symbol],
                    }),
                }
            }
            host => clusters.push(Cluster {
                host: Some(host),
                marks: Vec::new(),
            }),
        }
    }
    clusters
}

fn emit(out: &mut String, piece: Piece, direction: Direction) {
    match (piece, direction) {
        (Piece::Known(symbol), Direction::ToUnicode) => out.push(symbol.unicode),
        (Piece::Known(symbol), Direction::ToEscape) => out.push_str(symbol.escape),
        (Piece::Other(c), _) => out.push(c),
    }
}
