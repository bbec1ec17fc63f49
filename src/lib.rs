//! Sifter is the interaction core of a terminal task-action launcher.
//!
//! It pairs a fuzzy matching engine with an interactive selection
//! controller: the host owns the terminal and feeds key events in, sifter
//! narrows a candidate list in real time and hands back render-ready
//! snapshots until the user confirms or cancels.
//!
//! # Examples
//!
//! ```no_run
//! use sifter::{Candidate, Outcome, PickOptionsBuilder, Session};
//! use tokio::sync::mpsc::unbounded_channel;
//!
//! let options = PickOptionsBuilder::default()
//!     .multi(true)
//!     .build()
//!     .unwrap();
//!
//! let candidates = vec![
//!     Candidate::new("edit file"),
//!     Candidate::new("open browser"),
//!     Candidate::new("view log files"),
//! ];
//!
//! let (key_tx, key_rx) = unbounded_channel();
//! // ... hand key_tx to the loop that owns the terminal ...
//!
//! match Session::new(options, candidates).run(key_rx).unwrap() {
//!     Outcome::Selected(candidate) => println!("run {}", candidate.text),
//!     Outcome::SelectedMany(picked) => println!("run {} actions", picked.len()),
//!     Outcome::Cancelled => {}
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod candidate;
pub mod highlight;
pub mod matcher;
pub mod options;
pub mod ranker;
pub mod session;
pub mod spinlock;

pub use candidate::{Candidate, CandidateBuilder, Searchable};
pub use highlight::{DisplayContext, highlight_ranges, highlight_string};
pub use matcher::{CaseMatching, Match, MatchStrategy, Matcher};
pub use options::{Layout, PickOptions, PickOptionsBuilder};
pub use ranker::{MapHit, SearchHit, search, search_map, search_with_limit};
pub use session::{
    Action, Announcement, Mode, Outcome, Session, SessionError, Snapshot, SnapshotItem,
};
