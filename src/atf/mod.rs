/*!
 * ATF (Akkadian Text Format) processing.
 *
 * Pure functions that turn the raw `atf` field of a CDLI inscription into
 * a cleaned transliteration and an aligned translation:
 * - `normalizer`: digraph to diacritic rewriting and logogram upper-casing
 * - `line`: line splitting and classification
 * - `extractor`: the two derived text streams
 */

pub mod extractor;
pub mod line;
pub mod normalizer;

pub use extractor::{
    extract_atf, extract_cleaned_transliteration, extract_existing_translation, AtfExtraction,
};
pub use line::{classify_line, line_prefix, AtfLine, LineKind};
pub use normalizer::normalize_line;
