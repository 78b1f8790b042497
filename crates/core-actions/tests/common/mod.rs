#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, dispatch};
use core_config::Config;
use core_state::EditorState;
use core_text::{Attributes, ParagraphStyle, TextRange};

pub fn cfg() -> Config {
    Config::default()
}

/// Plain text, caret at the start.
pub fn state(text: &str) -> EditorState {
    EditorState::from_text(text, Attributes::default())
}

pub fn run(state: &mut EditorState, action: Action) -> DispatchResult {
    dispatch(action, state, &cfg(), &[])
}

pub fn run_all(state: &mut EditorState, actions: impl IntoIterator<Item = Action>) {
    for action in actions {
        run(state, action);
    }
}

pub fn select(state: &mut EditorState, location: usize, length: usize) {
    run(state, Action::Select(TextRange::new(location, length)));
}

/// Paragraph style stored at `index` (default when none).
pub fn style_at(state: &EditorState, index: usize) -> ParagraphStyle {
    state
        .buffer
        .paragraph_style_at(index)
        .map(|s| ParagraphStyle::clone(s))
        .unwrap_or_default()
}

/// Start offsets of every stored paragraph.
pub fn paragraph_starts(state: &EditorState) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut at = 0;
    let len = state.buffer.len();
    while at < len {
        starts.push(at);
        at = state.buffer.paragraph_range(TextRange::caret(at)).end();
    }
    starts
}

/// Every listed paragraph (and the typing style) has indentation derived from
/// its depth.
pub fn assert_list_indent_coupled(state: &EditorState, unit: f64) {
    let typing = state.typing.paragraph_style().cloned();
    let stored = paragraph_starts(state).into_iter().map(|i| style_at(state, i));
    for style in stored.chain(typing) {
        if style.has_lists() {
            assert_eq!(style.head_indent, style.list_depth() as f64 * unit, "{style:?}");
            assert_eq!(style.first_line_head_indent, 0.0, "{style:?}");
        }
    }
}
