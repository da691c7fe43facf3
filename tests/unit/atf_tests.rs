/*!
 * Tests for ATF normalization and extraction
 */

use cdlidb::atf::{classify_line, extract_atf, line_prefix, LineKind};
use cdlidb::{extract_cleaned_transliteration, extract_existing_translation, normalize_line};
use crate::common;

/// Test the digraph and logogram rules on a real transliteration line
#[test]
fn test_normalize_line_withDigraphsAndLogograms_shouldApplyBothRules() {
    assert_eq!(normalize_line("2. _e2_ {d}en-lil2"), "2. E2 {d}en-lil2");
    assert_eq!(normalize_line("1. mu-sza-ra"), "1. mu-ša-ra");
    assert_eq!(normalize_line("3. _szu_-s,i2"), "3. ŠU-ṣi2");
}

/// Test the sample tablet end to end
#[test]
fn test_extract_cleaned_transliteration_withSampleTablet_shouldDropCommentsAndHeader() {
    let cleaned = extract_cleaned_transliteration(Some(common::SAMPLE_ATF)).unwrap();
    assert_eq!(
        cleaned,
        "@obverse\n1. mu-ša-ra\n2. E2 {d}en-lil2\n$ rest broken"
    );
}

/// Test that translations are numbered after the lines they follow
#[test]
fn test_extract_existing_translation_withSampleTablet_shouldPrefixLineNumbers() {
    let translation = extract_existing_translation(Some(common::SAMPLE_ATF)).unwrap();
    assert_eq!(translation, "1. in his name\n2. the house of Enlil");
}

/// Test absent and empty input
#[test]
fn test_extract_atf_withNoText_shouldReturnNothing() {
    for raw in [None, Some("")] {
        let extraction = extract_atf(raw);
        assert_eq!(extraction.cleaned_transliteration, None);
        assert_eq!(extraction.existing_translation, None);
    }
}

/// Test a text made of comments only
#[test]
fn test_extract_atf_withOnlyComments_shouldReturnNoTransliteration() {
    let extraction = extract_atf(Some("#atf: lang akk\n#note: nothing here"));
    assert_eq!(extraction.cleaned_transliteration, None);
    assert_eq!(extraction.existing_translation, None);
}

/// Test that translations do not alter the transliteration
#[test]
fn test_extract_atf_withTranslations_shouldKeepTransliterationIndependent() {
    let with = extract_cleaned_transliteration(Some("1. a\n#tr.en: one\n2. b"));
    let without = extract_cleaned_transliteration(Some("1. a\n2. b"));
    assert_eq!(with, without);
}

/// Test that translation text is kept verbatim
#[test]
fn test_extract_existing_translation_withDigraphsInText_shouldNotNormalize() {
    let translation = extract_existing_translation(Some("1. x\n#tr.en: sza _big_ house"));
    assert_eq!(translation.as_deref(), Some("1. sza _big_ house"));
}

/// Test line classification helpers
#[test]
fn test_classify_line_withEachLineKind_shouldClassify() {
    assert_eq!(classify_line("#tr.de: Haus"), LineKind::TranslationAnnotation);
    assert_eq!(classify_line("#atf: lang sux"), LineKind::Comment);
    assert_eq!(classify_line("1. e2"), LineKind::Content);
    assert_eq!(line_prefix("  12'. lugal"), Some("12'."));
    assert_eq!(line_prefix("   "), None);
}
