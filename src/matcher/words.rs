//! Word tokenization and word-boundary (initials) matching.

/// A word inside a larger text, as char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    /// Char index of the first character.
    pub start: usize,
    /// Char index one past the last character.
    pub end: usize,
}

impl Word {
    /// Number of characters in the word.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the word spans no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn is_separator(c: char, punctuation: bool) -> bool {
    c.is_whitespace() || (punctuation && matches!(c, '-' | '_' | '.' | '/' | ':'))
}

/// Splits `text` into words on whitespace boundaries, optionally also on
/// common punctuation (`-`, `_`, `.`, `/`, `:`). Offsets are char indices
/// into `text`.
pub fn split_words(text: &[char], punctuation: bool) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start = None;
    for (idx, &c) in text.iter().enumerate() {
        if is_separator(c, punctuation) {
            if let Some(s) = start.take() {
                words.push(Word { start: s, end: idx });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        words.push(Word { start: s, end: text.len() });
    }
    words
}

/// Matches query characters against the first letters of successive words.
///
/// Each query character must equal (under `eq`) the initial of some word,
/// and the words used must appear in order. Returns the char positions of
/// the matched initials, plus the indices of the first and last word used
/// and the total word count, which the caller folds into a score.
pub fn word_boundary_positions(
    text: &[char],
    query: &[char],
    words: &[Word],
    eq: impl Fn(char, char) -> bool,
) -> Option<(Vec<usize>, usize, usize)> {
    if query.is_empty() || words.is_empty() {
        return None;
    }
    let mut positions = Vec::with_capacity(query.len());
    let mut first_word = 0;
    let mut last_word = 0;
    let mut word_idx = 0;
    for (qi, &qc) in query.iter().enumerate() {
        let found = (word_idx..words.len()).find(|&w| eq(text[words[w].start], qc))?;
        if qi == 0 {
            first_word = found;
        }
        last_word = found;
        positions.push(words[found].start);
        word_idx = found + 1;
    }
    Some((positions, first_word, last_word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn splits_on_whitespace() {
        let text = chars("view log files");
        let words = split_words(&text, false);
        assert_eq!(
            words,
            vec![
                Word { start: 0, end: 4 },
                Word { start: 5, end: 8 },
                Word { start: 9, end: 14 },
            ]
        );
    }

    #[test]
    fn splits_on_punctuation_when_asked() {
        let text = chars("open-browser.sh");
        assert_eq!(split_words(&text, false).len(), 1);
        let words = split_words(&text, true);
        assert_eq!(words.len(), 3);
        assert_eq!(words[1], Word { start: 5, end: 12 });
    }

    #[test]
    fn ignores_leading_and_trailing_separators() {
        let text = chars("  edit file  ");
        let words = split_words(&text, false);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], Word { start: 2, end: 6 });
    }

    #[test]
    fn initials_match_in_order() {
        let text = chars("view log files");
        let words = split_words(&text, false);
        let (positions, first, last) =
            word_boundary_positions(&text, &chars("vlf"), &words, |a, b| a == b).unwrap();
        assert_eq!(positions, vec![0, 5, 9]);
        assert_eq!((first, last), (0, 2));
    }

    #[test]
    fn initials_may_skip_words() {
        let text = chars("view log files");
        let words = split_words(&text, false);
        let (positions, first, last) =
            word_boundary_positions(&text, &chars("vf"), &words, |a, b| a == b).unwrap();
        assert_eq!(positions, vec![0, 9]);
        assert_eq!((first, last), (0, 2));
    }

    #[test]
    fn initials_out_of_order_fail() {
        let text = chars("view log files");
        let words = split_words(&text, false);
        assert!(word_boundary_positions(&text, &chars("fv"), &words, |a, b| a == b).is_none());
    }

    #[test]
    fn non_initial_chars_fail() {
        let text = chars("view log files");
        let words = split_words(&text, false);
        assert!(word_boundary_positions(&text, &chars("io"), &words, |a, b| a == b).is_none());
    }
}
