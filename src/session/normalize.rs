use icu_normalizer::ComposingNormalizerBorrowed;

/// Canonical form used for completion checks: NFC composed, lowercased,
/// whitespace runs collapsed to a single space, ends trimmed.
pub fn normalize(text: &str) -> String {
    let composed = ComposingNormalizerBorrowed::new_nfc().normalize(text);
    composed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn matches_target(typed: &str, target: &str) -> bool {
    normalize(typed) == normalize(target)
}

/// Whitespace-separated token count of the trimmed text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
