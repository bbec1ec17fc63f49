//! Configuration options for a selection session.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::matcher::{CaseMatching, MatchStrategy, Matcher};
use crate::session::{AnnounceCallback, PreviewCallback, RenderCallback};

/// Where the host renders the list relative to the input line. Passed
/// through unchanged to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// Input on top, list below.
    #[default]
    List,
    /// List on top, input below.
    Reverse,
}

/// Options controlling a selection session.
///
/// Build with [`PickOptionsBuilder`]; every field has a default.
///
/// ```
/// use sifter::PickOptionsBuilder;
///
/// let options = PickOptionsBuilder::default()
///     .multi(true)
///     .vim_mode(true)
///     .build()
///     .unwrap();
/// assert!(options.multi);
/// ```
#[derive(Builder, Clone)]
#[builder(default)]
pub struct PickOptions {
    /// Allow confirming more than one candidate.
    pub multi: bool,
    /// Enable vim-style navigation characters.
    pub vim_mode: bool,
    /// Start with accessibility announcements enabled.
    pub accessible: bool,
    /// Case sensitivity for matching.
    pub case: CaseMatching,
    /// Which matching operation bulk search runs.
    pub strategy: MatchStrategy,
    /// Matches scoring below this are dropped from the view.
    pub min_score: f64,
    /// Collapse whitespace and fold diacritics before matching.
    pub normalize: bool,
    /// Generate highlight ranges for display.
    pub highlight: bool,
    /// Cap the filtered view at this many entries.
    pub limit: Option<usize>,
    /// Items moved by one page-up/page-down step.
    pub page_size: usize,
    /// Quiescence window between the last keystroke and recomputation.
    pub debounce: Duration,
    /// Waiting longer than this for a key cancels the session.
    pub input_timeout: Duration,
    /// Theme name, passed through to the rendering collaborator.
    pub theme: Option<String>,
    /// Layout choice, passed through to the rendering collaborator.
    pub layout: Layout,
    /// Called with a snapshot whenever the state changes.
    pub on_render: Option<RenderCallback>,
    /// Receives accessibility announcements.
    pub announce: Option<AnnounceCallback>,
    /// Produces preview text for the candidate under the cursor.
    pub preview: Option<PreviewCallback>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            multi: false,
            vim_mode: false,
            accessible: false,
            case: CaseMatching::default(),
            strategy: MatchStrategy::default(),
            min_score: 0.0,
            normalize: false,
            highlight: true,
            limit: None,
            page_size: 10,
            debounce: Duration::from_millis(50),
            input_timeout: Duration::from_secs(300),
            theme: None,
            layout: Layout::default(),
            on_render: None,
            announce: None,
            preview: None,
        }
    }
}

impl PickOptions {
    /// Builds the matching engine these options describe.
    pub fn matcher(&self) -> Matcher {
        let matcher = Matcher::default()
            .min_score(self.min_score)
            .highlights(self.highlight)
            .normalize(self.normalize)
            .strategy(self.strategy);
        match self.case {
            CaseMatching::Respect => matcher.respect_case(),
            CaseMatching::Ignore => matcher.ignore_case(),
            CaseMatching::Smart => matcher.smart_case(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let options = PickOptionsBuilder::default().build().unwrap();
        assert!(!options.multi);
        assert!(options.highlight);
        assert_eq!(options.page_size, 10);
        assert_eq!(options.debounce, Duration::from_millis(50));
    }

    #[test]
    fn builder_overrides_stick() {
        let options = PickOptionsBuilder::default()
            .min_score(0.5)
            .case(CaseMatching::Respect)
            .debounce(Duration::from_millis(10))
            .build()
            .unwrap();
        assert_eq!(options.min_score, 0.5);
        let matcher = options.matcher();
        assert_eq!(matcher.minimum_score(), 0.5);
        // Respect-case: a lowercase query no longer matches uppercase text.
        assert!(matcher.match_text("abc", "ABC").is_none());
    }
}
