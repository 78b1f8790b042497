//! Formatting actions and their dispatcher.
//!
//! Every toolbar button and text-view edit is expressed as an [`Action`] and
//! applied through [`dispatcher::dispatch`] against an explicit
//! [`core_state::EditorState`] plus [`core_config::Config`]. The dispatcher
//! records the undo checkpoint before any mutation and notifies observers
//! with a fresh [`ToolbarState`] once the action has run.
//!
//! Module map:
//! * `paragraph`  - selection clamping, paragraph splitting and the
//!   typing-attributes edge-case classifier shared by both engines
//! * `dispatcher` - indent / list / inline format / text edit / undo handlers
//! * `toolbar`    - read-only toolbar snapshot derived from the state

use core_text::{Color, TextRange};

pub mod dispatcher;
pub mod paragraph;
pub mod toolbar;

pub use dispatcher::indent::{IndentDirection, adjust_list_nesting, current_indent};
pub use dispatcher::list::{ListCache, current_list_type};
pub use dispatcher::{DispatchResult, dispatch};
pub use toolbar::{ToolbarState, toolbar_state};

/// A single user intent applied to the editor state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    IndentLeft,
    IndentRight,
    ToggleOrderedList,
    ToggleUnorderedList,
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrikethrough,
    IncreaseFontSize,
    DecreaseFontSize,
    ApplyFontFamily(String),
    SetTextColor(Color),
    /// `Color::CLEAR` removes the highlight.
    SetHighlightColor(Color),
    /// Replace the selection with text stamped with the typing attributes.
    InsertText(String),
    DeleteBackward,
    Select(TextRange),
    Undo,
    Redo,
}

impl Action {
    /// Formatting actions take a discrete undo checkpoint before running.
    pub fn is_formatting(&self) -> bool {
        !matches!(
            self,
            Action::InsertText(_)
                | Action::DeleteBackward
                | Action::Select(_)
                | Action::Undo
                | Action::Redo
        )
    }
}

/// Observer hook for actions (plugins, toolbar, tests).
pub trait ActionObserver {
    fn on_action(&self, action: &Action);

    /// Called once after an action changed anything, with the state the
    /// toolbar should now display.
    fn on_refresh(&self, _toolbar: &ToolbarState) {}
}
