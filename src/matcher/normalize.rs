//! Text normalization with index mapping back to the original text.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching and return a mapping back to the original.
///
/// Normalization collapses every run of whitespace into a single space,
/// trims leading and trailing whitespace, and folds diacritics by NFD
/// decomposition with combining marks dropped. `mapping[i]` gives the
/// original char index for the i-th character of the normalized string, so
/// match positions computed on the normalized text can always be reported
/// against the text the caller supplied.
pub fn normalize_with_char_mapping(s: &str) -> (String, Vec<usize>) {
    let mut normalized = String::new();
    let mut mapping = Vec::new();
    // Index of the whitespace char that a pending collapsed space maps to.
    let mut pending_space: Option<usize> = None;

    for (orig_idx, orig_char) in s.chars().enumerate() {
        if orig_char.is_whitespace() {
            if !normalized.is_empty() {
                pending_space.get_or_insert(orig_idx);
            }
            continue;
        }
        if let Some(ws_idx) = pending_space.take() {
            normalized.push(' ');
            mapping.push(ws_idx);
        }
        for decomposed in orig_char.nfd() {
            if !unicode_normalization::char::is_combining_mark(decomposed) {
                normalized.push(decomposed);
                mapping.push(orig_idx);
            }
        }
    }

    (normalized, mapping)
}

/// Normalize a query the same way the candidate text is normalized.
///
/// Queries need no mapping; their positions are never reported.
pub fn normalize_query(s: &str) -> String {
    normalize_with_char_mapping(s).0
}

/// Map char indices from normalized text back to the original text.
pub fn map_char_indices_to_original(normalized_indices: &[usize], mapping: &[usize]) -> Vec<usize> {
    normalized_indices
        .iter()
        .filter_map(|&idx| mapping.get(idx).copied())
        .collect()
}
