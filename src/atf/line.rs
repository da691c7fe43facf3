/*!
 * Line splitting and classification for raw ATF text.
 */

/// Prefix shared by every `#`-comment line
pub const COMMENT_MARKER: char = '#';

/// Prefix of translation annotation lines (`#tr.en: ...`)
pub const TRANSLATION_MARKER: &str = "#tr.";

/// Segment-type annotation, which looks like a translation but is a comment
pub const SEGMENT_TYPE_MARKER: &str = "#tr.ts:";

/// Artifact header marker (`&P123456 = ...`)
pub const ARTIFACT_HEADER_MARKER: &str = "&P";

/// Kind of a single ATF line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `#` comment, `#tr.ts:` annotation or `&P` header
    Comment,
    /// `#tr.<lang>:` translation annotation
    TranslationAnnotation,
    /// Transliterated content, blank lines included
    Content,
}

/// A stripped ATF line together with its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtfLine<'a> {
    pub kind: LineKind,
    pub text: &'a str,
}

impl<'a> AtfLine<'a> {
    /// Classify an already stripped line
    pub fn classify(text: &'a str) -> Self {
        Self {
            kind: classify_line(text),
            text,
        }
    }

    /// Translation payload: everything after the first `:`, trimmed
    pub fn payload(&self) -> Option<&'a str> {
        if self.kind != LineKind::TranslationAnnotation {
            return None;
        }
        self.text.split_once(':').map(|(_, payload)| payload.trim())
    }

    /// Whether this line is visible to the nearest-prefix search.
    ///
    /// Only lines starting with `#` are transparent, so `&P` headers and
    /// blank lines still count as the nearest preceding line.
    pub fn is_prefix_source(&self) -> bool {
        !self.text.starts_with(COMMENT_MARKER)
    }
}

/// Classify an already stripped line
pub fn classify_line(text: &str) -> LineKind {
    if text.starts_with(TRANSLATION_MARKER) && !text.starts_with(SEGMENT_TYPE_MARKER) {
        LineKind::TranslationAnnotation
    } else if text.starts_with(COMMENT_MARKER) || text.starts_with(ARTIFACT_HEADER_MARKER) {
        LineKind::Comment
    } else {
        LineKind::Content
    }
}

/// First whitespace-delimited token of a stripped line, usually its line number
pub fn line_prefix(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

fn is_line_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split text on universal line boundaries.
///
/// `\r\n` counts as a single boundary and a trailing terminator does not
/// produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_boundary(ch) {
            continue;
        }

        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();

        if ch == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                start = next_idx + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}
