/*!
 * Praat escape notation tables.
 *
 * Every escape sequence is a backslash followed by two characters. The tables
 * are immutable; lookup maps are built once on first use.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Length in chars of every escape sequence
pub const ESCAPE_LEN: usize = 3;

/// Which table a symbol comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Vowel,
    Consonant,
    /// Written in line with the text (length, stress, ...)
    InlineDiacritic,
    /// Over- or understrike mark, rendered as a combining codepoint after its host
    IndexDiacritic,
}

/// A single escape sequence and the Unicode character it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub escape: &'static str,
    pub unicode: char,
    pub class: SymbolClass,
}

pub const VOWELS: &[(&str, char)] = &[
    (r"\i-", '\u{0268}'), // unrounded close central
    (r"\u-", '\u{0289}'), // rounded close central
    (r"\mt", '\u{026f}'), // unrounded close back
    (r"\ic", '\u{026a}'), // unrounded close lax front
    (r"\yc", '\u{028f}'), // rounded close lax front
    (r"\hs", '\u{028a}'), // rounded close lax back
    (r"\o/", '\u{00f8}'), // rounded close-mid front
    (r"\e-", '\u{0258}'), // unrounded close-mid central
    (r"\o-", '\u{0275}'), // rounded close-mid central
    (r"\rh", '\u{0264}'), // unrounded close-mid back
    (r"\sw", '\u{0259}'), // schwa
    (r"\ef", '\u{025b}'), // unrounded open-mid front
    (r"\oe", '\u{0153}'), // rounded open-mid front
    (r"\er", '\u{025c}'), // unrounded open-mid central
    (r"\kb", '\u{025e}'), // rounded open-mid central
    (r"\vt", '\u{028c}'), // unrounded open-mid back
    (r"\ct", '\u{0254}'), // rounded open-mid back
    (r"\ae", '\u{00e6}'), // unrounded near-open front
    (r"\at", '\u{0250}'), // unrounded open central
    (r"\Oe", '\u{0276}'), // rounded open front
    (r"\as", '\u{0251}'), // unrounded open back
    (r"\ab", '\u{0252}'), // rounded open back
];

/// Vowel letters that need no escape
pub const PLAIN_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y', '\u{00e6}', '\u{00f8}'];

pub const CONSONANTS: &[(&str, char)] = &[
    (r"\t.", '\u{0288}'), // voiceless retroflex plosive
    (r"\?-", '\u{02a1}'), // voiceless epiglottal plosive
    (r"\?g", '\u{0294}'), // glottal plosive
    (r"\d.", '\u{0256}'), // voiced retroflex plosive
    (r"\j-", '\u{025f}'), // voiced palatal plosive
    (r"\gs", '\u{0261}'), // voiced velar plosive
    (r"\gc", '\u{0262}'), // voiced uvular plosive
    (r"\mj", '\u{0271}'), // labiodental nasal
    (r"\n.", '\u{0273}'), // retroflex nasal
    (r"\ng", '\u{014b}'), // velar nasal
    (r"\nc", '\u{0274}'), // uvular nasal
    (r"\ff", '\u{0278}'), // voiceless bilabial fricative
    (r"\tf", '\u{019f}'), // voiceless dental fricative
    (r"\l-", '\u{026c}'), // voiceless lateral fricative
    (r"\sh", '\u{0283}'), // voiceless postalveolar fricative
    (r"\s.", '\u{0282}'), // voiceless retroflex fricative
    (r"\cc", '\u{0255}'), // voiceless alveolopalatal fricative
    (r"\c,", '\u{00e7}'), // voiceless palatal fricative
    (r"\wt", '\u{028d}'), // voiceless labiovelar fricative
    (r"\cf", '\u{03c7}'), // voiceless uvular fricative
    (r"\h-", '\u{0127}'), // voiceless pharyngeal fricative
    (r"\hc", '\u{029c}'), // voiceless epiglottal fricative
    (r"\bf", '\u{03b2}'), // voiced bilabial fricative
    (r"\dh", '\u{00f0}'), // voiced dental fricative
    (r"\lz", '\u{026e}'), // voiced lateral fricative
    (r"\zh", '\u{0292}'), // voiced postalveolar fricative
    (r"\z.", '\u{0290}'), // voiced retroflex fricative
    (r"\zc", '\u{0291}'), // voiced alveolopalatal fricative
    (r"\jc", '\u{029d}'), // voiced palatal fricative
    (r"\gf", '\u{0263}'), // voiced velar fricative
    (r"\ri", '\u{0281}'), // voiced uvular fricative
    (r"\9e", '\u{0295}'), // voiced pharyngeal fricative
    (r"\9-", '\u{02a2}'), // voiced epiglottal fricative
    (r"\h^", '\u{0266}'), // voiced glottal fricative
    (r"\vs", '\u{028b}'), // labiodental approximant
    (r"\rt", '\u{0279}'), // alveolar approximant
    (r"\r.", '\u{027b}'), // retroflex approximant
    (r"\ht", '\u{0265}'), // labial-palatal approximant
    (r"\ml", '\u{0270}'), // velar approximant
    (r"\bc", '\u{0299}'), // bilabial trill
    (r"\rc", '\u{0280}'), // uvular trill
    (r"\fh", '\u{027e}'), // alveolar tap
    (r"\rl", '\u{027a}'), // lateral flap
    (r"\f.", '\u{027d}'), // retroflex flap
    (r"\l.", '\u{026d}'), // retroflex lateral
    (r"\yt", '\u{028e}'), // palatal lateral approximant
    (r"\lc", '\u{029f}'), // velar lateral approximant
    (r"\b^", '\u{0253}'), // bilabial implosive
    (r"\d^", '\u{0257}'), // alveolar implosive
    (r"\j^", '\u{0284}'), // palatal implosive
    (r"\g^", '\u{0260}'), // velar implosive
    (r"\G^", '\u{029b}'), // uvular implosive
    (r"\O.", '\u{0298}'), // bilabial click
    (r"\|1", '\u{01c0}'), // dental click
    (r"\|2", '\u{01c1}'), // lateral click
    (r"\|-", '\u{01c2}'), // palatoalveolar click
    (r"\l~", '\u{026b}'), // velarized alveolar lateral
    (r"\hj", '\u{0267}'), // rounded postalveolar-velar fricative
];

pub const INLINE_DIACRITICS: &[(&str, char)] = &[
    (r"\:f", '\u{02d0}'), // length mark
    (r"\.f", '\u{02d1}'), // half-length mark
    (r"\'1", '\u{02c8}'), // primary stress
    (r"\'2", '\u{02cc}'), // secondary stress
    (r"\|f", '|'),        // phonetic stroke
    (r"\cn", '\u{031a}'), // unreleased
    (r"\hr", '\u{02de}'), // rhotic hook
];

pub const INDEX_DIACRITICS: &[(&str, char)] = &[
    (r"\|v", '\u{0329}'), // syllabic
    (r"\0v", '\u{0325}'), // voiceless (under)
    (r"\Tv", '\u{031e}'), // lowered
    (r"\T^", '\u{031d}'), // raised
    (r"\T(", '\u{0318}'), // advanced tongue root
    (r"\T)", '\u{0319}'), // retracted tongue root
    (r"\-v", '\u{0320}'), // backed
    (r"\+v", '\u{031f}'), // fronted
    (r"\:v", '\u{0324}'), // breathy voiced
    (r"\~v", '\u{0330}'), // creaky voiced
    (r"\Nv", '\u{032a}'), // dental
    (r"\Uv", '\u{033a}'), // apical
    (r"\Dv", '\u{033b}'), // laminal
    (r"\nv", '\u{032f}'), // nonsyllabic
    (r"\3v", '\u{0339}'), // more rounded
    (r"\cv", '\u{031c}'), // less rounded
    (r"\0^", '\u{030a}'), // voiceless (over)
    (r"\'^", '\u{0301}'), // high tone
    (r"\`^", '\u{0300}'), // low tone
    (r"\-^", '\u{0304}'), // mid tone
    (r"\~^", '\u{0303}'), // nasalized
    (r"\v^", '\u{030c}'), // rising tone
    (r"\^^", '\u{0302}'), // falling tone
    (r"\:^", '\u{0308}'), // centralized
    (r"\N^", '\u{0306}'), // extra short
    (r"\li", '\u{0361}'), // tie bar
];

fn all_symbols() -> impl Iterator<Item = Symbol> {
    let tables: [(&'static [(&'static str, char)], SymbolClass); 4] = [
        (VOWELS, SymbolClass::Vowel),
        (CONSONANTS, SymbolClass::Consonant),
        (INLINE_DIACRITICS, SymbolClass::InlineDiacritic),
        (INDEX_DIACRITICS, SymbolClass::IndexDiacritic),
    ];
    tables.into_iter().flat_map(|(table, class)| {
        table.iter().map(move |&(escape, unicode)| Symbol {
            escape,
            unicode,
            class,
        })
    })
}

static BY_ESCAPE: Lazy<HashMap<&'static str, Symbol>> =
    Lazy::new(|| all_symbols().map(|symbol| (symbol.escape, symbol)).collect());

static BY_UNICODE: Lazy<HashMap<char, Symbol>> =
    Lazy::new(|| all_symbols().map(|symbol| (symbol.unicode, symbol)).collect());

/// Look up an escape sequence such as `\sw`
pub fn by_escape(escape: &str) -> Option<Symbol> {
    BY_ESCAPE.get(escape).copied()
}

/// Look up a Unicode character such as `ə`
pub fn by_unicode(unicode: char) -> Option<Symbol> {
    BY_UNICODE.get(&unicode).copied()
}

/// Whether `c` is a vowel in Unicode notation
pub fn is_unicode_vowel(c: char) -> bool {
    PLAIN_VOWELS.contains(&c) || VOWELS.iter().any(|&(_, unicode)| unicode == c)
}

/// Whether `symbol` names a vowel in either notation: a plain vowel letter,
/// an escape sequence or its Unicode character
pub fn is_vowel(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return is_unicode_vowel(c);
    }
    matches!(by_escape(symbol), Some(s) if s.class == SymbolClass::Vowel)
}

/// Whether `c` is the combining codepoint of an index diacritic
pub fn is_index_mark(c: char) -> bool {
    matches!(by_unicode(c), Some(s) if s.class == SymbolClass::IndexDiacritic)
}
