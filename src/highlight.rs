//! Highlight ranges and display formatting.
//!
//! Matched char positions are collapsed into contiguous runs; the runs are
//! pure display data. [`highlight_string`] wraps runs with caller-supplied
//! markers; [`DisplayContext`] turns a candidate's text into a styled
//! [`Line`] for the rendering collaborator. None of this feeds back into
//! matching.

use std::ops::Range;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Collapses strictly increasing char positions into contiguous runs.
pub fn highlight_ranges(positions: &[usize]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for &pos in positions {
        match ranges.last_mut() {
            Some(last) if last.end == pos => last.end = pos + 1,
            _ => ranges.push(pos..pos + 1),
        }
    }
    ranges
}

/// Wraps each highlighted run of `text` with `open` and `close` markers.
///
/// Ranges are char ranges, as produced by [`highlight_ranges`].
pub fn highlight_string(text: &str, ranges: &[Range<usize>], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut next = ranges.iter();
    let mut current = next.next();
    for (idx, ch) in text.chars().enumerate() {
        if let Some(range) = current {
            if idx == range.start {
                out.push_str(open);
            }
        }
        out.push(ch);
        if let Some(range) = current {
            if idx + 1 == range.end {
                out.push_str(close);
                current = next.next();
            }
        }
    }
    out
}

/// Context handed to the render collaborator for one list row.
#[derive(Default)]
pub struct DisplayContext {
    /// The match score for this row.
    pub score: f64,
    /// Highlight runs over the row's text, as char ranges.
    pub highlights: Vec<Range<usize>>,
    /// The base style to apply to non-matched portions.
    pub base_style: Style,
    /// The style to apply to matched portions.
    pub matched_style: Style,
}

impl DisplayContext {
    /// Converts the context and text into a styled `Line` with highlighted
    /// runs. Match style is patched over the base style so backgrounds
    /// carry through.
    pub fn to_line(&self, text: &str) -> Line<'static> {
        if self.highlights.is_empty() {
            return Line::from(vec![Span::styled(text.to_string(), self.base_style)]);
        }
        let mut res = Line::default();
        let mut chars = text.chars();
        let mut prev_end = 0;
        for range in &self.highlights {
            let plain: String = chars.by_ref().take(range.start - prev_end).collect();
            if !plain.is_empty() {
                res.push_span(Span::styled(plain, self.base_style));
            }
            let highlighted: String = chars.by_ref().take(range.end - range.start).collect();
            res.push_span(Span::styled(highlighted, self.base_style.patch(self.matched_style)));
            prev_end = range.end;
        }
        let rest: String = chars.collect();
        if !rest.is_empty() {
            res.push_span(Span::styled(rest, self.base_style));
        }
        res
    }
}
