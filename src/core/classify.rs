//! Translation heuristic.

use crate::core::data::Counter;

/// Whether a value looks translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    Translated,
    Untranslated,
}

/// Classifies a resource value by alphabet.
///
/// A value made only of ASCII code points (U+0000 to U+007F) is taken to be
/// untranslated source text; anything containing another code point is taken
/// to be translated. Empty and digit-only values are ASCII and therefore
/// untranslated. Translations between two ASCII-only languages are
/// misclassified as untranslated.
///
/// # Examples
///
/// ```
/// use l10n_coverage::core::classify::{Translation, classify};
///
/// assert_eq!(classify("Hello"), Translation::Untranslated);
/// assert_eq!(classify("Grüß Gott"), Translation::Translated);
/// assert_eq!(classify("你好"), Translation::Translated);
/// assert_eq!(classify(""), Translation::Untranslated);
/// ```
pub fn classify(value: &str) -> Translation {
    if value.is_ascii() {
        Translation::Untranslated
    } else {
        Translation::Translated
    }
}

impl From<Translation> for Counter {
    fn from(translation: Translation) -> Counter {
        match translation {
            Translation::Translated => Counter::COVERED,
            Translation::Untranslated => Counter::MISSED,
        }
    }
}
