//! Accent stripping via compatibility decomposition.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Decomposes `text` (NFKD) and drops combining marks.
///
/// Characters without a decomposition are kept as-is, so non-Latin scripts
/// survive.
#[must_use]
pub fn strip_accents_unicode(text: &str) -> String {
    if text.is_ascii() {
        return text.to_owned();
    }
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Decomposes `text` (NFKD) and keeps only ASCII characters.
#[must_use]
pub fn strip_accents_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}
