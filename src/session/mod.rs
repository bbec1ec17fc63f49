//! The interactive selection session.
//!
//! A [`Session`] owns the controller and the debounce coordinator and
//! drives them from a host-supplied key-event channel. The host keeps the
//! terminal; the session hands it render-ready [`Snapshot`]s and
//! accessibility [`Announcement`]s through callbacks and finishes with an
//! [`Outcome`].

use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::select;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::candidate::Candidate;
use crate::options::PickOptions;

pub mod binds;
pub mod controller;
pub mod debounce;
pub mod event;

pub use controller::{Controller, Step};
pub use debounce::{CommittedView, DebounceCoordinator};
pub use event::Action;

/// Which key table is active. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// List navigation; typing starts a search.
    Interactive,
    /// Query editing with live filtering.
    Search,
    /// Preview pane for the candidate under the cursor.
    Preview,
    /// Key binding help overlay.
    Help,
}

/// Terminal result of a session. The three cases are distinguishable so
/// callers can tell "picked one", "picked several" and "picked nothing"
/// apart.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A single confirmed candidate.
    Selected(Arc<Candidate>),
    /// Every candidate of a multi-select confirmation, in selection order.
    SelectedMany(Vec<Arc<Candidate>>),
    /// The user cancelled; there is no result.
    Cancelled,
}

/// One row of the filtered view, referring into the corpus by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewEntry {
    /// Index of the candidate in the corpus.
    pub index: usize,
    /// Match score in `[0, 1]`.
    pub score: f64,
    /// Matched char positions in the candidate's searchable text.
    pub positions: Vec<usize>,
    /// Contiguous highlight runs over the positions.
    pub highlights: Vec<Range<usize>>,
}

/// Render-ready copy of the controller state.
#[derive(Clone)]
pub struct Snapshot {
    /// The live query.
    pub query: String,
    /// The active mode.
    pub mode: Mode,
    /// True when the help overlay is up.
    pub help_visible: bool,
    /// Cursor position in `items`, if any candidate can hold it.
    pub cursor: Option<usize>,
    /// Selected positions in `items`, in selection order.
    pub selected: Vec<usize>,
    /// Total corpus size, for "x of y" displays.
    pub total: usize,
    /// The filtered view, best match first.
    pub items: Vec<SnapshotItem>,
    /// Preview text for the cursor candidate, when preview mode is active.
    pub preview: Option<String>,
}

/// One row of a [`Snapshot`].
#[derive(Clone)]
pub struct SnapshotItem {
    /// The candidate backing this row.
    pub candidate: Arc<Candidate>,
    /// Its match score.
    pub score: f64,
    /// Highlight runs over its display text, as char ranges.
    pub highlights: Vec<Range<usize>>,
}

/// A semantic announcement for screen-reader-oriented output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    /// Semantic role, e.g. `"navigation"`.
    pub role: String,
    /// Plain text, e.g. `"Item 3 of 12: Edit file. Selected"`.
    pub text: String,
}

/// Receives every snapshot the session wants drawn.
pub type RenderCallback = Arc<dyn Fn(&Snapshot) + Send + Sync>;
/// Receives accessibility announcements.
pub type AnnounceCallback = Arc<dyn Fn(&Announcement) + Send + Sync>;
/// Produces preview text for the candidate under the cursor. Invoked on
/// the render path, never by the state machine.
pub type PreviewCallback = Arc<dyn Fn(&Candidate) -> String + Send + Sync>;

/// Failures that end a session abnormally.
///
/// A read timeout is not one of them; it cancels the session instead.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The key-event channel closed before a selection was made.
    #[error("key input closed before a selection was made")]
    InputClosed,
}

/// An interactive selection over a fixed candidate list.
///
/// Candidates and options are supplied once at construction and stay
/// immutable for the session's lifetime; build a new session to change
/// the corpus.
pub struct Session {
    options: PickOptions,
    corpus: Arc<Vec<Arc<Candidate>>>,
}

impl Session {
    /// Creates a session over the given candidates.
    pub fn new(options: PickOptions, candidates: Vec<Candidate>) -> Self {
        let corpus = Arc::new(candidates.into_iter().map(Arc::new).collect::<Vec<_>>());
        Self { options, corpus }
    }

    /// Runs the session to completion on its own runtime, consuming key
    /// events from `keys` until a terminal outcome.
    pub fn run(self, keys: UnboundedReceiver<KeyEvent>) -> Result<Outcome> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run_async(keys))
    }

    /// Runs the session on the current runtime.
    ///
    /// Waiting for a key is bounded by the configured input timeout;
    /// expiry is treated as Cancel, so the loop never blocks forever. A
    /// closed key channel surfaces as [`SessionError::InputClosed`].
    pub async fn run_async(self, mut keys: UnboundedReceiver<KeyEvent>) -> Result<Outcome> {
        let generation = Arc::new(AtomicU64::new(0));
        let (coordinator, mut commits) = DebounceCoordinator::spawn(
            self.corpus.clone(),
            self.options.matcher(),
            self.options.limit,
            self.options.debounce,
            generation.clone(),
        );
        let mut controller = Controller::new(self.corpus.clone(), &self.options, generation);
        self.render(&controller);

        loop {
            select! {
                next = tokio::time::timeout(self.options.input_timeout, keys.recv()) => {
                    let Ok(received) = next else {
                        debug!("input timed out after {:?}, treating as cancel", self.options.input_timeout);
                        return Ok(Outcome::Cancelled);
                    };
                    let Some(key) = received else {
                        return Err(SessionError::InputClosed.into());
                    };
                    let Some(action) = binds::action_for(controller.mode(), self.options.vim_mode, &key) else {
                        trace!("unbound key {key:?}");
                        continue;
                    };
                    match controller.handle_action(&action) {
                        Step::Finished(outcome) => return Ok(outcome),
                        Step::QueryChanged => {
                            coordinator.update(controller.query());
                        }
                        Step::Continue => {}
                    }
                    self.render(&controller);
                }
                Some(()) = commits.recv() => {
                    if let Some(committed) = coordinator.take() {
                        if committed.generation == coordinator.latest_generation() {
                            controller.apply_view(committed.view);
                            self.render(&controller);
                        } else {
                            trace!("dropping stale commit (gen {})", committed.generation);
                        }
                    }
                }
            }
        }
    }

    fn render(&self, controller: &Controller) {
        let Some(cb) = &self.options.on_render else { return };
        let preview = if controller.mode() == Mode::Preview {
            self.options
                .preview
                .as_ref()
                .zip(controller.current_candidate())
                .map(|(preview_fn, candidate)| preview_fn(&candidate))
        } else {
            None
        };
        cb(&controller.snapshot(preview));
    }
}
