use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Canonical form used for every word comparison: lowercased, then decomposed
/// with the combining marks dropped, so "Rápido" and "rapido" compare equal.
///
/// Lowercasing happens first because some lowercase mappings introduce
/// combining marks of their own ('İ' -> "i\u{307}"); stripping afterwards
/// keeps the function idempotent.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Whether `input` (trimmed) is still a prefix of `word` after normalization.
/// An empty input is always on track.
pub fn is_on_track(input: &str, word: &str) -> bool {
    let typed = input.trim();
    typed.is_empty() || normalize(word).starts_with(&normalize(typed))
}

/// Word equality under normalization. A blank input never matches.
///
/// Text made only of combining marks normalizes to nothing, so when either
/// side collapses to empty the raw strings must be equal instead.
pub fn matches(input: &str, word: &str) -> bool {
    let typed = input.trim();
    if typed.is_empty() {
        return false;
    }
    let (typed_norm, word_norm) = (normalize(typed), normalize(word));
    if typed_norm.is_empty() || word_norm.is_empty() {
        return typed == word;
    }
    typed_norm == word_norm
}
