//! The selection controller: a state machine over the candidate list.
//!
//! The controller owns the query, the filtered view, the cursor and the
//! multi-select set, and reacts to semantic [`Action`]s. It never touches
//! the terminal; the session runner renders snapshots and feeds committed
//! recomputations back in through [`Controller::apply_view`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexSet;

use super::event::Action;
use super::{Announcement, Mode, Outcome, Snapshot, SnapshotItem, ViewEntry};
use crate::candidate::Candidate;
use crate::options::PickOptions;
use crate::session::AnnounceCallback;

/// What the runner should do after an action was handled.
#[derive(Debug)]
pub enum Step {
    /// Keep going; nothing else to do.
    Continue,
    /// The query changed; route it through the debounce coordinator.
    QueryChanged,
    /// The session reached a terminal outcome.
    Finished(Outcome),
}

/// State machine driving one selection session.
pub struct Controller {
    corpus: Arc<Vec<Arc<Candidate>>>,
    multi: bool,
    page_size: usize,
    accessible: bool,
    announce: Option<AnnounceCallback>,

    query: String,
    view: Arc<Vec<ViewEntry>>,
    cursor: Option<usize>,
    selected: IndexSet<usize>,
    mode: Mode,
    prev_mode: Mode,

    /// Shared with the debounce coordinator; bumping it invalidates every
    /// in-flight recomputation.
    generation: Arc<AtomicU64>,
}

impl Controller {
    /// Creates a controller over the full candidate list: interactive
    /// mode, empty query, cursor on the first selectable candidate.
    pub fn new(corpus: Arc<Vec<Arc<Candidate>>>, options: &PickOptions, generation: Arc<AtomicU64>) -> Self {
        let view = Arc::new(full_view(&corpus));
        let cursor = first_enabled(&corpus, &view);
        Self {
            multi: options.multi,
            page_size: options.page_size.max(1),
            accessible: options.accessible,
            announce: options.announce.clone(),
            corpus,
            query: String::new(),
            view,
            cursor,
            selected: IndexSet::new(),
            mode: Mode::Interactive,
            prev_mode: Mode::Interactive,
            generation,
        }
    }

    /// The live query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Cursor position in the filtered view, if any candidate can hold it.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The current filtered view.
    pub fn view(&self) -> &Arc<Vec<ViewEntry>> {
        &self.view
    }

    /// Selected positions in the current filtered view, in selection order.
    pub fn selected_positions(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// The candidate under the cursor.
    pub fn current_candidate(&self) -> Option<Arc<Candidate>> {
        let cur = self.cursor?;
        self.view.get(cur).map(|e| self.corpus[e.index].clone())
    }

    /// Dispatches an action to the handler of the active mode.
    pub fn handle_action(&mut self, action: &Action) -> Step {
        debug!("mode {:?}, action {:?}", self.mode, action);
        match self.mode {
            Mode::Interactive => self.on_interactive(action),
            Mode::Search => self.on_search(action),
            Mode::Preview => self.on_preview(action),
            Mode::Help => self.on_help(action),
        }
    }

    fn on_interactive(&mut self, action: &Action) -> Step {
        match action {
            Action::Abort => Step::Finished(Outcome::Cancelled),
            Action::Accept => self.confirm(),
            Action::AddChar(c) => {
                // Typing from the list starts a search with the char.
                self.mode = Mode::Search;
                self.query.push(*c);
                Step::QueryChanged
            }
            Action::StartSearch => {
                self.start_search();
                Step::Continue
            }
            Action::ToggleHelp => {
                self.enter_help();
                Step::Continue
            }
            Action::TogglePreview => {
                self.mode = Mode::Preview;
                Step::Continue
            }
            Action::ToggleAccessibility => {
                self.toggle_accessibility();
                Step::Continue
            }
            other => {
                if !self.navigate(other) {
                    self.edit_selection(other);
                }
                Step::Continue
            }
        }
    }

    fn on_search(&mut self, action: &Action) -> Step {
        match action {
            Action::Abort => Step::Finished(Outcome::Cancelled),
            Action::Accept => self.confirm(),
            Action::AddChar(c) => {
                self.query.push(*c);
                Step::QueryChanged
            }
            Action::BackwardDeleteChar => {
                if self.query.pop().is_some() {
                    Step::QueryChanged
                } else {
                    Step::Continue
                }
            }
            Action::ClearQuery => {
                self.clear_query();
                self.mode = Mode::Interactive;
                Step::Continue
            }
            Action::StartSearch => {
                self.start_search();
                Step::Continue
            }
            Action::ToggleHelp => {
                self.enter_help();
                Step::Continue
            }
            Action::TogglePreview => {
                self.mode = Mode::Preview;
                Step::Continue
            }
            Action::ToggleAccessibility => {
                self.toggle_accessibility();
                Step::Continue
            }
            other => {
                if !self.navigate(other) {
                    self.edit_selection(other);
                }
                Step::Continue
            }
        }
    }

    fn on_preview(&mut self, action: &Action) -> Step {
        match action {
            Action::Abort => Step::Finished(Outcome::Cancelled),
            Action::Accept => self.confirm(),
            Action::TogglePreview => {
                self.mode = Mode::Interactive;
                Step::Continue
            }
            Action::ToggleHelp => {
                self.enter_help();
                Step::Continue
            }
            Action::ToggleAccessibility => {
                self.toggle_accessibility();
                Step::Continue
            }
            other => {
                self.navigate(other);
                Step::Continue
            }
        }
    }

    fn on_help(&mut self, action: &Action) -> Step {
        match action {
            // Help swallows everything except leaving it.
            Action::ToggleHelp => {
                self.mode = self.prev_mode;
                Step::Continue
            }
            Action::Abort => Step::Finished(Outcome::Cancelled),
            _ => Step::Continue,
        }
    }

    /// Returns true if the action was a navigation action.
    fn navigate(&mut self, action: &Action) -> bool {
        let page = self.page_size as isize;
        match action {
            Action::Up(n) => self.move_cursor(-(*n as isize)),
            Action::Down(n) => self.move_cursor(*n as isize),
            Action::PageUp(n) => self.move_cursor(-page * *n as isize),
            Action::PageDown(n) => self.move_cursor(page * *n as isize),
            Action::First => self.jump(first_enabled(&self.corpus, &self.view)),
            Action::Last => self.jump(last_enabled(&self.corpus, &self.view)),
            _ => return false,
        }
        true
    }

    /// Returns true if the action edited the multi-select set.
    fn edit_selection(&mut self, action: &Action) -> bool {
        if !self.multi {
            // Without multi-select these are no-ops, but still consumed.
            return matches!(
                action,
                Action::Toggle | Action::ToggleAll | Action::SelectAll | Action::DeselectAll
            );
        }
        match action {
            Action::Toggle => {
                if let Some(cur) = self.cursor {
                    if !self.selected.shift_remove(&cur) {
                        self.selected.insert(cur);
                    }
                    trace!("selection now {:?}", self.selected);
                }
            }
            Action::ToggleAll => {
                for pos in self.enabled_positions() {
                    if !self.selected.shift_remove(&pos) {
                        self.selected.insert(pos);
                    }
                }
            }
            Action::SelectAll => {
                for pos in self.enabled_positions() {
                    self.selected.insert(pos);
                }
            }
            Action::DeselectAll => self.selected.clear(),
            _ => return false,
        }
        true
    }

    fn enabled_positions(&self) -> Vec<usize> {
        self.view
            .iter()
            .enumerate()
            .filter(|(_, e)| !self.corpus[e.index].disabled)
            .map(|(pos, _)| pos)
            .collect()
    }

    fn confirm(&mut self) -> Step {
        if self.multi && !self.selected.is_empty() {
            let picked: Vec<Arc<Candidate>> = self
                .selected
                .iter()
                .filter_map(|&pos| self.view.get(pos))
                .map(|e| self.corpus[e.index].clone())
                .collect();
            if !picked.is_empty() {
                return Step::Finished(Outcome::SelectedMany(picked));
            }
        }
        match self.current_candidate() {
            Some(candidate) => Step::Finished(Outcome::Selected(candidate)),
            // Nothing to confirm over an empty or all-disabled view.
            None => Step::Continue,
        }
    }

    /// Moves the cursor by `delta` selectable items, wrapping at both
    /// ends and skipping disabled candidates. Over an all-disabled view
    /// the cursor is `None` and nothing moves.
    fn move_cursor(&mut self, delta: isize) {
        let Some(mut pos) = self.cursor else { return };
        if delta == 0 {
            return;
        }
        let dir = delta.signum();
        for _ in 0..delta.abs() {
            match self.next_enabled(pos, dir) {
                Some(next) => pos = next,
                None => break,
            }
        }
        self.cursor = Some(pos);
        self.announce_current();
    }

    /// The nearest selectable position from `from` in direction `dir`,
    /// wrapping. Walks at most one full cycle, so it terminates even when
    /// `from` is the only selectable item.
    fn next_enabled(&self, from: usize, dir: isize) -> Option<usize> {
        let len = self.view.len() as isize;
        (1..=len)
            .map(|k| ((from as isize + dir * k).rem_euclid(len)) as usize)
            .find(|&pos| !self.corpus[self.view[pos].index].disabled)
    }

    fn jump(&mut self, target: Option<usize>) {
        if let Some(pos) = target {
            self.cursor = Some(pos);
            self.announce_current();
        }
    }

    fn enter_help(&mut self) {
        self.prev_mode = self.mode;
        self.mode = Mode::Help;
    }

    fn toggle_accessibility(&mut self) {
        self.accessible = !self.accessible;
        if self.accessible {
            self.announce_current();
        }
    }

    /// Clears the query and resets the view to the full candidate list
    /// right away, invalidating any in-flight recomputation. This is the
    /// fast path; it does not go through the debounce coordinator.
    fn clear_query(&mut self) {
        self.query.clear();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.replace_view(full_view(&self.corpus));
    }

    fn start_search(&mut self) {
        self.clear_query();
        self.mode = Mode::Search;
    }

    /// Installs a committed filtered view. Selections are re-resolved by
    /// candidate identity; the cursor lands on the first selectable entry.
    pub fn apply_view(&mut self, view: Vec<ViewEntry>) {
        self.replace_view(view);
    }

    fn replace_view(&mut self, view: Vec<ViewEntry>) {
        let kept: IndexSet<String> = self
            .selected
            .iter()
            .filter_map(|&pos| self.view.get(pos))
            .map(|e| self.corpus[e.index].id.clone())
            .collect();
        self.view = Arc::new(view);
        self.selected = self
            .view
            .iter()
            .enumerate()
            .filter(|(_, e)| kept.contains(&self.corpus[e.index].id))
            .map(|(pos, _)| pos)
            .collect();
        self.cursor = first_enabled(&self.corpus, &self.view);
        debug!(
            "view replaced: {} entries, {} selections kept",
            self.view.len(),
            self.selected.len()
        );
        self.announce_current();
    }

    fn announce_current(&self) {
        if !self.accessible {
            return;
        }
        let Some(cb) = &self.announce else { return };
        let Some(cur) = self.cursor else { return };
        let candidate = &self.corpus[self.view[cur].index];
        let mut text = format!("Item {} of {}: {}", cur + 1, self.view.len(), candidate.text);
        if self.selected.contains(&cur) {
            text.push_str(". Selected");
        }
        cb(&Announcement {
            role: "navigation".to_string(),
            text,
        });
    }

    /// A render-ready copy of the current state.
    pub fn snapshot(&self, preview: Option<String>) -> Snapshot {
        Snapshot {
            query: self.query.clone(),
            mode: self.mode,
            help_visible: self.mode == Mode::Help,
            cursor: self.cursor,
            selected: self.selected_positions(),
            total: self.corpus.len(),
            items: self
                .view
                .iter()
                .map(|e| SnapshotItem {
                    candidate: self.corpus[e.index].clone(),
                    score: e.score,
                    highlights: e.highlights.clone(),
                })
                .collect(),
            preview,
        }
    }
}

/// The unfiltered view: every candidate, input order, empty-query scores.
pub(crate) fn full_view(corpus: &[Arc<Candidate>]) -> Vec<ViewEntry> {
    corpus
        .iter()
        .enumerate()
        .map(|(index, _)| ViewEntry {
            index,
            score: 1.0,
            positions: Vec::new(),
            highlights: Vec::new(),
        })
        .collect()
}

fn first_enabled(corpus: &[Arc<Candidate>], view: &[ViewEntry]) -> Option<usize> {
    view.iter().position(|e| !corpus[e.index].disabled)
}

fn last_enabled(corpus: &[Arc<Candidate>], view: &[ViewEntry]) -> Option<usize> {
    view.iter().rposition(|e| !corpus[e.index].disabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PickOptionsBuilder;
    use crate::spinlock::SpinLock;

    fn corpus(texts: &[&str]) -> Arc<Vec<Arc<Candidate>>> {
        Arc::new(texts.iter().map(|t| Arc::new(Candidate::new(*t))).collect())
    }

    fn controller(texts: &[&str], multi: bool) -> Controller {
        let options = PickOptionsBuilder::default().multi(multi).build().unwrap();
        Controller::new(corpus(texts), &options, Arc::new(AtomicU64::new(0)))
    }

    fn disabled(text: &str) -> Arc<Candidate> {
        let mut c = Candidate::new(text);
        c.disabled = true;
        Arc::new(c)
    }

    #[test]
    fn initial_state() {
        let ctl = controller(&["a", "b", "c"], false);
        assert_eq!(ctl.mode(), Mode::Interactive);
        assert_eq!(ctl.cursor(), Some(0));
        assert_eq!(ctl.query(), "");
        assert!(ctl.selected_positions().is_empty());
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut ctl = controller(&["a", "b", "c"], false);
        ctl.handle_action(&Action::Up(1));
        assert_eq!(ctl.cursor(), Some(2));
        ctl.handle_action(&Action::Down(1));
        assert_eq!(ctl.cursor(), Some(0));
        ctl.handle_action(&Action::Down(4));
        assert_eq!(ctl.cursor(), Some(1));
    }

    #[test]
    fn navigation_skips_disabled() {
        let corpus: Arc<Vec<Arc<Candidate>>> =
            Arc::new(vec![Arc::new(Candidate::new("a")), disabled("b"), Arc::new(Candidate::new("c"))]);
        let options = PickOptionsBuilder::default().build().unwrap();
        let mut ctl = Controller::new(corpus, &options, Arc::new(AtomicU64::new(0)));
        assert_eq!(ctl.cursor(), Some(0));
        ctl.handle_action(&Action::Down(1));
        assert_eq!(ctl.cursor(), Some(2));
        ctl.handle_action(&Action::Down(1));
        assert_eq!(ctl.cursor(), Some(0));
    }

    #[test]
    fn all_disabled_does_not_move_or_hang() {
        let corpus: Arc<Vec<Arc<Candidate>>> = Arc::new(vec![disabled("a"), disabled("b")]);
        let options = PickOptionsBuilder::default().build().unwrap();
        let mut ctl = Controller::new(corpus, &options, Arc::new(AtomicU64::new(0)));
        assert_eq!(ctl.cursor(), None);
        ctl.handle_action(&Action::Down(1));
        ctl.handle_action(&Action::Last);
        assert_eq!(ctl.cursor(), None);
        // Confirm over an all-disabled view stays in session.
        assert!(matches!(ctl.handle_action(&Action::Accept), Step::Continue));
    }

    #[test]
    fn first_and_last_respect_disabled_edges() {
        let corpus: Arc<Vec<Arc<Candidate>>> =
            Arc::new(vec![disabled("a"), Arc::new(Candidate::new("b")), disabled("c")]);
        let options = PickOptionsBuilder::default().build().unwrap();
        let mut ctl = Controller::new(corpus, &options, Arc::new(AtomicU64::new(0)));
        ctl.handle_action(&Action::Last);
        assert_eq!(ctl.cursor(), Some(1));
        ctl.handle_action(&Action::First);
        assert_eq!(ctl.cursor(), Some(1));
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut ctl = controller(&["a", "b", "c"], true);
        ctl.handle_action(&Action::Toggle);
        assert_eq!(ctl.selected_positions(), vec![0]);
        ctl.handle_action(&Action::Toggle);
        assert!(ctl.selected_positions().is_empty());
    }

    #[test]
    fn toggle_without_multi_is_a_noop() {
        let mut ctl = controller(&["a", "b"], false);
        ctl.handle_action(&Action::Toggle);
        assert!(ctl.selected_positions().is_empty());
    }

    #[test]
    fn confirm_returns_every_selected_candidate() {
        // Toggle position 0 and position 2, then confirm.
        let mut ctl = controller(&["a", "b", "c"], true);
        ctl.handle_action(&Action::Toggle);
        ctl.handle_action(&Action::Down(1));
        ctl.handle_action(&Action::Down(1));
        ctl.handle_action(&Action::Toggle);
        let Step::Finished(Outcome::SelectedMany(picked)) = ctl.handle_action(&Action::Accept) else {
            panic!("expected a multi-select outcome");
        };
        let ids: Vec<&str> = picked.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn confirm_without_selection_takes_the_cursor() {
        let mut ctl = controller(&["a", "b"], true);
        ctl.handle_action(&Action::Down(1));
        let Step::Finished(Outcome::Selected(candidate)) = ctl.handle_action(&Action::Accept) else {
            panic!("expected a single outcome");
        };
        assert_eq!(candidate.id, "b");
    }

    #[test]
    fn abort_cancels() {
        let mut ctl = controller(&["a"], false);
        assert!(matches!(
            ctl.handle_action(&Action::Abort),
            Step::Finished(Outcome::Cancelled)
        ));
    }

    #[test]
    fn typing_enters_search_and_changes_query() {
        let mut ctl = controller(&["a"], false);
        assert!(matches!(ctl.handle_action(&Action::AddChar('e')), Step::QueryChanged));
        assert_eq!(ctl.mode(), Mode::Search);
        assert_eq!(ctl.query(), "e");
        assert!(matches!(
            ctl.handle_action(&Action::BackwardDeleteChar),
            Step::QueryChanged
        ));
        assert_eq!(ctl.query(), "");
        // Deleting from an empty query changes nothing.
        assert!(matches!(ctl.handle_action(&Action::BackwardDeleteChar), Step::Continue));
    }

    #[test]
    fn help_round_trips_and_preserves_state() {
        let mut ctl = controller(&["a", "b"], true);
        ctl.handle_action(&Action::AddChar('x'));
        ctl.handle_action(&Action::Toggle);
        let before_query = ctl.query().to_string();
        let before_selected = ctl.selected_positions();

        ctl.handle_action(&Action::ToggleHelp);
        assert_eq!(ctl.mode(), Mode::Help);
        // Navigation is swallowed while help is up.
        let cursor = ctl.cursor();
        ctl.handle_action(&Action::Down(1));
        assert_eq!(ctl.cursor(), cursor);

        ctl.handle_action(&Action::ToggleHelp);
        assert_eq!(ctl.mode(), Mode::Search);
        assert_eq!(ctl.query(), before_query);
        assert_eq!(ctl.selected_positions(), before_selected);
    }

    #[test]
    fn clear_query_resets_view_and_bumps_generation() {
        let generation = Arc::new(AtomicU64::new(0));
        let options = PickOptionsBuilder::default().build().unwrap();
        let mut ctl = Controller::new(corpus(&["a", "b", "c"]), &options, generation.clone());
        ctl.handle_action(&Action::AddChar('a'));
        ctl.apply_view(vec![ViewEntry {
            index: 0,
            score: 0.9,
            positions: vec![0],
            highlights: vec![0..1],
        }]);
        assert_eq!(ctl.view().len(), 1);

        ctl.handle_action(&Action::ClearQuery);
        assert_eq!(ctl.query(), "");
        assert_eq!(ctl.mode(), Mode::Interactive);
        assert_eq!(ctl.view().len(), 3);
        assert!(generation.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn selection_survives_refilter_by_identity() {
        let mut ctl = controller(&["alpha", "beta", "gamma"], true);
        ctl.handle_action(&Action::Toggle); // alpha
        ctl.handle_action(&Action::Down(2));
        ctl.handle_action(&Action::Toggle); // gamma
        assert_eq!(ctl.selected_positions(), vec![0, 2]);

        // New view: gamma first, beta second; alpha fell out.
        ctl.apply_view(vec![
            ViewEntry {
                index: 2,
                score: 0.9,
                positions: vec![0],
                highlights: vec![0..1],
            },
            ViewEntry {
                index: 1,
                score: 0.5,
                positions: vec![0],
                highlights: vec![0..1],
            },
        ]);
        // gamma is still selected at its new position; alpha is gone.
        assert_eq!(ctl.selected_positions(), vec![0]);
        let Step::Finished(Outcome::SelectedMany(picked)) = ctl.handle_action(&Action::Accept) else {
            panic!("expected a multi-select outcome");
        };
        assert_eq!(picked[0].id, "gamma");
    }

    #[test]
    fn select_all_and_deselect_all_skip_disabled() {
        let corpus: Arc<Vec<Arc<Candidate>>> =
            Arc::new(vec![Arc::new(Candidate::new("a")), disabled("b"), Arc::new(Candidate::new("c"))]);
        let options = PickOptionsBuilder::default().multi(true).build().unwrap();
        let mut ctl = Controller::new(corpus, &options, Arc::new(AtomicU64::new(0)));
        ctl.handle_action(&Action::SelectAll);
        assert_eq!(ctl.selected_positions(), vec![0, 2]);
        ctl.handle_action(&Action::ToggleAll);
        assert!(ctl.selected_positions().is_empty());
        ctl.handle_action(&Action::SelectAll);
        ctl.handle_action(&Action::DeselectAll);
        assert!(ctl.selected_positions().is_empty());
    }

    #[test]
    fn announcements_follow_the_accessibility_flag() {
        let spoken: Arc<SpinLock<Vec<String>>> = Arc::new(SpinLock::new(Vec::new()));
        let sink = spoken.clone();
        let options = PickOptionsBuilder::default()
            .multi(true)
            .announce(Some(Arc::new(move |a: &Announcement| {
                sink.lock().push(format!("{}: {}", a.role, a.text));
            }) as AnnounceCallback))
            .build()
            .unwrap();
        let mut ctl = Controller::new(corpus(&["edit file", "open browser"]), &options, Arc::new(AtomicU64::new(0)));

        ctl.handle_action(&Action::Down(1));
        assert!(spoken.lock().is_empty(), "silent until the flag is on");

        ctl.handle_action(&Action::ToggleAccessibility);
        ctl.handle_action(&Action::Down(1));
        {
            let log = spoken.lock();
            assert!(!log.is_empty());
            assert!(log.last().unwrap().starts_with("navigation: Item 1 of 2: edit file"));
        }

        ctl.handle_action(&Action::ToggleAccessibility);
        let count = spoken.lock().len();
        ctl.handle_action(&Action::Down(1));
        assert_eq!(spoken.lock().len(), count);
    }

    #[test]
    fn announcement_mentions_selection() {
        let spoken: Arc<SpinLock<Vec<String>>> = Arc::new(SpinLock::new(Vec::new()));
        let sink = spoken.clone();
        let options = PickOptionsBuilder::default()
            .multi(true)
            .accessible(true)
            .announce(Some(Arc::new(move |a: &Announcement| {
                sink.lock().push(a.text.clone());
            }) as AnnounceCallback))
            .build()
            .unwrap();
        let mut ctl = Controller::new(corpus(&["a", "b"]), &options, Arc::new(AtomicU64::new(0)));
        ctl.handle_action(&Action::Toggle);
        ctl.handle_action(&Action::Down(1));
        ctl.handle_action(&Action::Up(1));
        assert!(spoken.lock().last().unwrap().ends_with(". Selected"));
    }

    #[test]
    fn empty_corpus_never_errors() {
        let mut ctl = controller(&[], false);
        assert_eq!(ctl.cursor(), None);
        ctl.handle_action(&Action::Down(1));
        assert!(matches!(ctl.handle_action(&Action::Accept), Step::Continue));
        let snap = ctl.snapshot(None);
        assert!(snap.items.is_empty());
        assert_eq!(snap.total, 0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut ctl = controller(&["a", "b"], true);
        ctl.handle_action(&Action::AddChar('a'));
        ctl.handle_action(&Action::Toggle);
        let snap = ctl.snapshot(Some("preview".into()));
        assert_eq!(snap.query, "a");
        assert_eq!(snap.mode, Mode::Search);
        assert!(!snap.help_visible);
        assert_eq!(snap.selected, vec![0]);
        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.preview.as_deref(), Some("preview"));
    }
}
