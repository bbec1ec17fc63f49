//! The fuzzy matching engine.
//!
//! Matching is a pure function from (query, candidate text) to an optional
//! [`Match`]. Scores live in `[0, 1]`: `1.0` is an exact (case-folded)
//! match, anything else lands strictly between 0 and 1. A query matches
//! when it occurs as a possibly non-contiguous subsequence of the text;
//! the score rewards contiguous runs, early starts and dense matches.
//!
//! [`Matcher::smart_match`] layers two cheaper strategies on top before
//! falling back to the general subsequence match: direct substring
//! containment (scored `>= 0.8`) and word-boundary alignment, where query
//! characters line up with the initials of successive words.
//!
//! # Example
//! ```
//! use sifter::matcher::Matcher;
//!
//! let matcher = Matcher::default().ignore_case();
//!
//! assert!(matcher.match_text("abx", "abc").is_none());
//! let m = matcher.match_text("abc", "axbycz").unwrap();
//! assert_eq!(m.positions, vec![0, 2, 4]);
//! ```

use std::cell::RefCell;
use std::ops::Range;

use regex::Regex;
use thread_local::ThreadLocal;

use crate::highlight::highlight_ranges;

pub mod normalize;
pub mod words;

use normalize::{map_char_indices_to_original, normalize_query, normalize_with_char_mapping};
use words::{split_words, word_boundary_positions};

// ---------------------------------------------------------------------------
// Score constants
// ---------------------------------------------------------------------------
// All scores are f64 in [0, 1]. Exact matches score 1.0; each strategy
// occupies its own band so that the strategy order of smart_match is also
// roughly a quality order.

/// Base score of a contiguous substring match.
const SUBSTRING_FLOOR: f64 = 0.8;
/// Base score of a word-boundary (initials) match.
const WORD_FLOOR: f64 = 0.70;
/// General subsequence scores scale into (0, SUBSEQ_CEILING].
const SUBSEQ_CEILING: f64 = 0.75;

const WEIGHT_CONTIGUITY: f64 = 0.55;
const WEIGHT_DENSITY: f64 = 0.25;
const WEIGHT_EARLINESS: f64 = 0.15;
const WEIGHT_COVERAGE: f64 = 0.05;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Case sensitivity mode for matching
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
pub enum CaseMatching {
    /// Case-sensitive matching
    Respect,
    /// Case-insensitive matching
    Ignore,
    /// Smart case: case-insensitive unless query contains uppercase
    #[default]
    Smart,
}

/// Which matching operation a bulk search runs per candidate.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
pub enum MatchStrategy {
    /// Substring, then word-boundary, then subsequence.
    #[default]
    Smart,
    /// General subsequence matching only.
    Subsequence,
}

/// Result of matching one query against one candidate's searchable text.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Score in `[0, 1]`; `1.0` means exact.
    pub score: f64,
    /// Strictly increasing char indices into the original text.
    /// Empty iff the query was empty.
    pub positions: Vec<usize>,
    /// Contiguous runs over `positions`, for display. Populated only when
    /// highlight generation is enabled.
    pub highlights: Vec<Range<usize>>,
}

impl Match {
    fn empty_query() -> Self {
        Self {
            score: 1.0,
            positions: Vec::new(),
            highlights: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// The configured matching engine.
///
/// Construct one explicitly and pass it where it is needed; there is no
/// shared global instance.
pub struct Matcher {
    case: CaseMatching,
    strategy: MatchStrategy,
    min_score: f64,
    with_highlights: bool,
    normalize: bool,
    q_cache: ThreadLocal<RefCell<Vec<char>>>,
    t_cache: ThreadLocal<RefCell<Vec<char>>>,
    regex_cache: ThreadLocal<RefCell<Option<(String, Regex)>>>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            case: CaseMatching::default(),
            strategy: MatchStrategy::default(),
            min_score: 0.0,
            with_highlights: true,
            normalize: false,
            q_cache: ThreadLocal::new(),
            t_cache: ThreadLocal::new(),
            regex_cache: ThreadLocal::new(),
        }
    }
}

impl Matcher {
    /// Sets the matcher to ignore case when matching.
    pub fn ignore_case(mut self) -> Self {
        self.case = CaseMatching::Ignore;
        self
    }

    /// Sets the matcher to use smart case (case-insensitive unless the
    /// query contains an uppercase letter).
    pub fn smart_case(mut self) -> Self {
        self.case = CaseMatching::Smart;
        self
    }

    /// Sets the matcher to respect case exactly.
    pub fn respect_case(mut self) -> Self {
        self.case = CaseMatching::Respect;
        self
    }

    /// Matches scoring below `min` are treated as no-match.
    pub fn min_score(mut self, min: f64) -> Self {
        self.min_score = min;
        self
    }

    /// Enables or disables highlight-range generation.
    pub fn highlights(mut self, on: bool) -> Self {
        self.with_highlights = on;
        self
    }

    /// Enables whitespace collapsing and diacritic folding before matching.
    pub fn normalize(mut self, on: bool) -> Self {
        self.normalize = on;
        self
    }

    /// Sets the strategy used by [`Matcher::match_item`].
    pub fn strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured minimum score.
    pub fn minimum_score(&self) -> f64 {
        self.min_score
    }

    fn is_case_sensitive(&self, query: &str) -> bool {
        match self.case {
            CaseMatching::Respect => true,
            CaseMatching::Ignore => false,
            CaseMatching::Smart => query.chars().any(|c| c.is_uppercase()),
        }
    }

    /// General subsequence match with the full scoring model.
    ///
    /// An empty query matches anything (including empty text) with score
    /// `1.0` and no positions; a non-empty query never matches empty text.
    pub fn match_text(&self, query: &str, text: &str) -> Option<Match> {
        self.run(query, text, false)
    }

    /// Tries substring containment, then word-boundary alignment, then
    /// falls back to the general subsequence match. The first strategy
    /// that succeeds wins.
    pub fn smart_match(&self, query: &str, text: &str) -> Option<Match> {
        self.run(query, text, true)
    }

    /// Matches according to the configured [`MatchStrategy`]; this is what
    /// bulk search uses.
    pub fn match_item(&self, query: &str, text: &str) -> Option<Match> {
        match self.strategy {
            MatchStrategy::Smart => self.smart_match(query, text),
            MatchStrategy::Subsequence => self.match_text(query, text),
        }
    }

    fn run(&self, query: &str, text: &str, smart: bool) -> Option<Match> {
        // Normalization applies to both sides; positions are mapped back to
        // the original text at the end.
        let (effective_query, effective_text, mapping) = if self.normalize {
            let (t, map) = normalize_with_char_mapping(text);
            (normalize_query(query), t, Some(map))
        } else {
            (query.to_string(), text.to_string(), None)
        };

        if effective_query.is_empty() {
            return Some(Match::empty_query());
        }
        if effective_text.is_empty() {
            return None;
        }

        let case_sensitive = self.is_case_sensitive(&effective_query);

        let mut qbuf = self.q_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        qbuf.clear();
        qbuf.extend(effective_query.chars());
        let mut tbuf = self.t_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        tbuf.clear();
        tbuf.extend(effective_text.chars());

        // Exact equality after case folding is a perfect match.
        if qbuf.len() == tbuf.len()
            && qbuf
                .iter()
                .zip(tbuf.iter())
                .all(|(&q, &t)| chars_eq(t, q, case_sensitive))
        {
            let positions: Vec<usize> = (0..tbuf.len()).collect();
            return self.finish(1.0, positions, mapping.as_deref());
        }

        if smart {
            if let Some((score, positions)) =
                self.substring_match(&effective_query, &effective_text, &tbuf, case_sensitive)
            {
                return self.finish(score, positions, mapping.as_deref());
            }
            if let Some((score, positions)) = word_boundary_match(&tbuf, &qbuf, case_sensitive) {
                return self.finish(score, positions, mapping.as_deref());
            }
        }

        let positions = subsequence_positions(&tbuf, &qbuf, case_sensitive)?;
        let score = score_subsequence(&positions, tbuf.len());
        self.finish(score, positions, mapping.as_deref())
    }

    fn finish(&self, score: f64, positions: Vec<usize>, mapping: Option<&[usize]>) -> Option<Match> {
        if score < self.min_score {
            return None;
        }
        let positions = match mapping {
            Some(map) => map_char_indices_to_original(&positions, map),
            None => positions,
        };
        let highlights = if self.with_highlights {
            highlight_ranges(&positions)
        } else {
            Vec::new()
        };
        Some(Match {
            score,
            positions,
            highlights,
        })
    }

    /// Substring stage: an escaped, optionally `(?i)` regex finds the
    /// leftmost containment. The compiled regex is cached per thread since
    /// one query is matched against a whole corpus in a row.
    fn substring_match(
        &self,
        query: &str,
        text: &str,
        text_chars: &[char],
        case_sensitive: bool,
    ) -> Option<(f64, Vec<usize>)> {
        let mut pattern = String::new();
        if !case_sensitive {
            pattern.push_str("(?i)");
        }
        pattern.push_str(&regex::escape(query));

        let cache = self.regex_cache.get_or(|| RefCell::new(None));
        let mut cached = cache.borrow_mut();
        let rebuild = match cached.as_ref() {
            Some((key, _)) => key != &pattern,
            None => true,
        };
        if rebuild {
            *cached = Some((pattern.clone(), Regex::new(&pattern).ok()?));
        }
        let (_, regex) = cached.as_ref()?;

        let mat = regex.find(text)?;
        let start_char = text[..mat.start()].chars().count();
        let end_char = start_char + text[mat.start()..mat.end()].chars().count();
        let positions: Vec<usize> = (start_char..end_char).collect();
        let score = score_substring(start_char, positions.len(), text_chars.len());
        Some((score, positions))
    }
}

// ---------------------------------------------------------------------------
// Alignment and scoring
// ---------------------------------------------------------------------------

#[inline]
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[inline]
fn chars_eq(text_char: char, query_char: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        text_char == query_char
    } else {
        fold_char(text_char) == fold_char(query_char)
    }
}

/// Finds subsequence positions for `query` inside `text`.
///
/// A forward pass locates the leftmost possible match end; a backward pass
/// then packs the positions tight against that end, so the alignment the
/// scorer sees is the densest window with the earliest end.
fn subsequence_positions(text: &[char], query: &[char], case_sensitive: bool) -> Option<Vec<usize>> {
    let mut qi = 0;
    let mut end = 0;
    for (ti, &tc) in text.iter().enumerate() {
        if chars_eq(tc, query[qi], case_sensitive) {
            qi += 1;
            if qi == query.len() {
                end = ti;
                break;
            }
        }
    }
    if qi < query.len() {
        return None;
    }

    let mut positions = vec![0; query.len()];
    let mut qi = query.len();
    let mut ti = end + 1;
    while qi > 0 {
        ti -= 1;
        if chars_eq(text[ti], query[qi - 1], case_sensitive) {
            qi -= 1;
            positions[qi] = ti;
        }
    }
    Some(positions)
}

/// Scores a subsequence alignment into (0, SUBSEQ_CEILING].
///
/// Contiguity is the fraction of adjacent query characters matched
/// side-by-side; density relates the query length to the matched span;
/// earliness prefers matches that start sooner; coverage prefers shorter
/// texts for a given match. Growing any gap can only lower the result.
fn score_subsequence(positions: &[usize], text_len: usize) -> f64 {
    debug_assert!(!positions.is_empty());
    let q = positions.len() as f64;
    let first = positions[0];
    let last = positions[positions.len() - 1];

    let contiguity = if positions.len() > 1 {
        positions.windows(2).filter(|w| w[1] == w[0] + 1).count() as f64 / (q - 1.0)
    } else {
        1.0
    };
    let density = q / (last - first + 1) as f64;
    let earliness = 1.0 - first as f64 / text_len as f64;
    let coverage = q / text_len as f64;

    SUBSEQ_CEILING
        * (WEIGHT_CONTIGUITY * contiguity
            + WEIGHT_DENSITY * density
            + WEIGHT_EARLINESS * earliness
            + WEIGHT_COVERAGE * coverage)
}

/// Scores a contiguous substring containment into [SUBSTRING_FLOOR, 1).
fn score_substring(start: usize, match_len: usize, text_len: usize) -> f64 {
    let earliness = 1.0 - start as f64 / text_len as f64;
    let coverage = match_len as f64 / text_len as f64;
    SUBSTRING_FLOOR + 0.1 * earliness + 0.1 * coverage
}

/// Word-boundary stage: query characters align with the initials of
/// successive words. Tokenizes on whitespace and punctuation.
fn word_boundary_match(text: &[char], query: &[char], case_sensitive: bool) -> Option<(f64, Vec<usize>)> {
    let word_list = split_words(text, true);
    let (positions, first_word, last_word) =
        word_boundary_positions(text, query, &word_list, |t, q| chars_eq(t, q, case_sensitive))?;

    let span_words = (last_word - first_word + 1) as f64;
    let density = query.len() as f64 / span_words;
    let earliness = 1.0 - first_word as f64 / word_list.len() as f64;
    let score = WORD_FLOOR + 0.15 * density + 0.05 * earliness;
    Some((score, positions))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
