/*!
 * Character normalization for ATF transliteration lines.
 *
 * ASCII digraphs used by CDLI exports are rewritten into their
 * Assyriological diacritics, and underscore-delimited logogram spans
 * (`_e2_`) are rendered in upper case without the underscores.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Digraph substitution table, in alternation order
pub const DIGRAPH_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("sz", "š"),
    ("s,", "ṣ"),
    ("t,", "ṭ"),
    ("h", "ḫ"),
];

// All digraphs in one alternation so replaced text is never scanned again
static DIGRAPH_REGEX: Lazy<Regex> = Lazy::new(|| {
    let alternation = DIGRAPH_SUBSTITUTIONS
        .iter()
        .map(|(ascii, _)| regex::escape(ascii))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).unwrap()
});

static LOGOGRAM_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_(.*?)_").unwrap()
});

/// Normalize a single, already stripped, transliteration line.
///
/// Any input is valid. An unmatched underscore is left as it is.
pub fn normalize_line(line: &str) -> String {
    let substituted = DIGRAPH_REGEX.replace_all(line, |caps: &Captures| {
        let matched = &caps[0];
        DIGRAPH_SUBSTITUTIONS
            .iter()
            .find(|(ascii, _)| *ascii == matched)
            .map(|(_, diacritic)| *diacritic)
            .unwrap_or(matched)
            .to_string()
    });

    LOGOGRAM_SPAN_REGEX
        .replace_all(&substituted, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}
