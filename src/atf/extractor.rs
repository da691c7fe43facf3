/*!
 * Extraction of the cleaned transliteration and the aligned translation
 * from a raw ATF blob.
 *
 * Both outputs are computed in one forward pass. Translation lines are
 * prefixed with the first token of the nearest preceding line that does
 * not start with `#`; the tracked token is updated as the scan goes, so no
 * backward rescans are needed.
 */

use super::line::{line_prefix, split_lines, AtfLine, LineKind};
use super::normalizer::normalize_line;

/// Both derived text streams of a raw ATF blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtfExtraction {
    /// Normalized content lines, or `None` if there were none
    pub cleaned_transliteration: Option<String>,
    /// `"{prefix} {payload}"` lines, or `None` if there were none
    pub existing_translation: Option<String>,
}

/// Single-pass accumulator behind the public extraction functions
#[derive(Debug, Default)]
struct AtfExtractor<'a> {
    content_lines: Vec<String>,
    translation_lines: Vec<String>,
    // First token of the nearest non-`#` line; `None` when that line is blank
    nearest_prefix: Option<&'a str>,
}

impl<'a> AtfExtractor<'a> {
    fn push_line(&mut self, raw_line: &'a str) {
        let line = AtfLine::classify(raw_line.trim());

        match line.kind {
            LineKind::Content => self.content_lines.push(normalize_line(line.text)),
            LineKind::TranslationAnnotation => {
                if let (Some(prefix), Some(payload)) = (self.nearest_prefix, line.payload()) {
                    self.translation_lines.push(format!("{} {}", prefix, payload));
                }
            }
            LineKind::Comment => {}
        }

        if line.is_prefix_source() {
            self.nearest_prefix = line_prefix(line.text);
        }
    }

    fn finish(self) -> AtfExtraction {
        AtfExtraction {
            cleaned_transliteration: join_lines(self.content_lines),
            existing_translation: join_lines(self.translation_lines),
        }
    }
}

fn join_lines(lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Compute both derived streams of a raw ATF blob.
///
/// Absent or empty input yields `None` for both outputs.
pub fn extract_atf(raw_atf: Option<&str>) -> AtfExtraction {
    let Some(raw_atf) = raw_atf.filter(|raw| !raw.is_empty()) else {
        return AtfExtraction::default();
    };

    let mut extractor = AtfExtractor::default();
    for line in split_lines(raw_atf) {
        extractor.push_line(line);
    }
    extractor.finish()
}

/// Content lines of a raw ATF blob, normalized and joined with newlines
pub fn extract_cleaned_transliteration(raw_atf: Option<&str>) -> Option<String> {
    extract_atf(raw_atf).cleaned_transliteration
}

/// Translation annotations of a raw ATF blob, each prefixed with the line
/// number of the content line it belongs to
pub fn extract_existing_translation(raw_atf: Option<&str>) -> Option<String> {
    extract_atf(raw_atf).existing_translation
}
