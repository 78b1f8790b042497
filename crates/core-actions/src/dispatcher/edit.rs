//! Text edit action handling (insert / backward delete).
//!
//! Inserted text is stamped with the typing attributes, so a new paragraph
//! typed after a list item carries the same paragraph style and continues the
//! list. Consecutive edits share one undo snapshot; a line break ends the run.

use super::DispatchResult;
use core_state::EditorState;
use core_text::{TextRange, is_line_break};
use tracing::{trace, warn};

/// Selection clamped for text replacement (a caret may sit at `len`).
fn replacement_range(state: &EditorState) -> Option<TextRange> {
    let selection = state.selection();
    if selection.is_not_found() {
        return None;
    }
    let len = state.buffer.len();
    let location = selection.location.min(len);
    let length = selection.length.min(len - location);
    Some(TextRange::new(location, length))
}

pub(crate) fn handle_insert(state: &mut EditorState, text: &str) -> DispatchResult {
    let Some(range) = replacement_range(state) else {
        return DispatchResult::clean();
    };
    if text.is_empty() && range.is_caret() {
        return DispatchResult::clean();
    }
    state.begin_insert_coalescing();
    state.note_insert_edit();
    let attrs = state.typing.clone();
    if let Err(error) = state.buffer.replace(range, text, attrs) {
        warn!(target: "actions.dispatch", op = "insert_text", %error, "edit_rejected");
        return DispatchResult::clean();
    }
    let caret = range.location + text.chars().count();
    state.place_selection(TextRange::caret(caret));
    if text.chars().any(is_line_break) {
        state.end_insert_coalescing();
    }
    trace!(target: "actions.dispatch", op = "insert_text", location = range.location, replaced = range.length, to = caret, "edit");
    state.dirty = true;
    DispatchResult::dirty()
}

pub(crate) fn handle_delete_backward(state: &mut EditorState) -> DispatchResult {
    let Some(range) = replacement_range(state) else {
        return DispatchResult::clean();
    };
    let doomed = if range.is_caret() {
        if range.location == 0 {
            return DispatchResult::clean();
        }
        let start = state.buffer.prev_grapheme_boundary(range.location);
        TextRange::new(start, range.location - start)
    } else {
        range
    };
    state.begin_insert_coalescing();
    state.note_insert_edit();
    if let Err(error) = state.buffer.delete(doomed) {
        warn!(target: "actions.dispatch", op = "delete_backward", %error, "edit_rejected");
        return DispatchResult::clean();
    }
    state.place_selection(TextRange::caret(doomed.location));
    state.sync_typing_attributes();
    trace!(target: "actions.dispatch", op = "delete_backward", location = doomed.location, length = doomed.length, "edit");
    state.dirty = true;
    DispatchResult::dirty()
}
