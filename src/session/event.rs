//! Semantic actions driving the selection controller.

use serde::{Deserialize, Serialize};

/// Everything the controller can be asked to do.
///
/// Physical keys are translated into actions by the binds layer; hosts
/// with their own input handling can drive the controller with actions
/// directly. The serde derives let hosts persist custom keymaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Cancel the session with no result
    Abort,
    /// Confirm the current selection
    Accept,
    /// Append a character to the query
    AddChar(char),
    /// Delete the last query character
    BackwardDeleteChar,
    /// Clear the query and leave search, resetting the view immediately
    ClearQuery,
    /// Enter search mode with a fresh query
    StartSearch,
    /// Move the cursor down by N selectable items
    Down(usize),
    /// Move the cursor up by N selectable items
    Up(usize),
    /// Jump to the first selectable item
    First,
    /// Jump to the last selectable item
    Last,
    /// Move the cursor down by N pages
    PageDown(usize),
    /// Move the cursor up by N pages
    PageUp(usize),
    /// Toggle selection of the item under the cursor
    Toggle,
    /// Toggle selection of every selectable item
    ToggleAll,
    /// Select every selectable item
    SelectAll,
    /// Clear the selected set
    DeselectAll,
    /// Flip between help and the previous mode
    ToggleHelp,
    /// Flip the preview pane mode
    TogglePreview,
    /// Flip accessibility announcements
    ToggleAccessibility,
    /// Do nothing
    Ignore,
}
