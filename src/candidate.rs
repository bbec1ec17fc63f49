//! Candidate items and the searchable-text contract.
//!
//! A [`Candidate`] is one selectable entry supplied by the host at session
//! construction. The controller tracks candidates by index and identity and
//! never mutates their content.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use derive_builder::Builder;

/// Anything that exposes text to match against and text to display.
///
/// The two default to each other's natural choice: most corpora match on
/// exactly what they show.
pub trait Searchable {
    /// The string the matcher runs against.
    fn search_text(&self) -> Cow<'_, str>;

    /// The string shown in the list, defaults to [`Searchable::search_text`].
    fn display_text(&self) -> Cow<'_, str> {
        self.search_text()
    }
}

impl Searchable for str {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Searchable for String {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_text(&self) -> Cow<'_, str> {
        (**self).search_text()
    }

    fn display_text(&self) -> Cow<'_, str> {
        (**self).display_text()
    }
}

impl<T: Searchable + ?Sized> Searchable for Arc<T> {
    fn search_text(&self) -> Cow<'_, str> {
        (**self).search_text()
    }

    fn display_text(&self) -> Cow<'_, str> {
        (**self).display_text()
    }
}

/// One selectable item in the corpus.
///
/// Built once by the host and handed to the session as `Arc<Candidate>`;
/// the `payload` travels back out opaquely with the confirmed outcome so
/// hosts can attach whatever they resolve selections into.
#[derive(Builder, Clone)]
#[builder(pattern = "owned")]
pub struct Candidate {
    /// Stable identifier, unique within the corpus.
    pub id: String,
    /// Primary display text, also the default searchable text.
    pub text: String,
    /// Optional secondary description shown next to the text.
    #[builder(default)]
    pub description: Option<String>,
    /// Disabled candidates are displayed but can never hold the cursor.
    #[builder(default)]
    pub disabled: bool,
    /// Opaque host data carried through unchanged.
    #[builder(default)]
    pub payload: Option<Arc<dyn Any + Send + Sync>>,
    /// Handle of the action to run on confirmation, if any.
    #[builder(default)]
    pub action: Option<String>,
}

impl Candidate {
    /// Shorthand for a plain enabled candidate whose id is its text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: text.clone(),
            text,
            description: None,
            disabled: false,
            payload: None,
            action: None,
        }
    }

    /// Returns a builder for the full set of fields.
    pub fn builder() -> CandidateBuilder {
        CandidateBuilder::default()
    }
}

impl Searchable for Candidate {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("description", &self.description)
            .field("disabled", &self.disabled)
            .field("has_payload", &self.payload.is_some())
            .field("action", &self.action)
            .finish()
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Candidate {}
