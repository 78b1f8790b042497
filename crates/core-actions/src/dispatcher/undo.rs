//! Undo / Redo handling.
//!
//! Delegates to the snapshot engine inside `EditorState`. Restoring a
//! snapshot swaps the whole buffer, so a successful step reports
//! `buffer_replaced`. The trace names the kind of step (formatting or a
//! typing run) that was reverted.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState) -> DispatchResult {
    if let Some(kind) = state.undo() {
        tracing::trace!(target: "actions.dispatch", op = "undo", ?kind, undo_depth = state.undo_depth(), redo_depth = state.redo_depth(), "undo");
        DispatchResult::buffer_replaced()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(state: &mut EditorState) -> DispatchResult {
    if let Some(kind) = state.redo() {
        tracing::trace!(target: "actions.dispatch", op = "redo", ?kind, undo_depth = state.undo_depth(), redo_depth = state.redo_depth(), "redo");
        DispatchResult::buffer_replaced()
    } else {
        DispatchResult::clean()
    }
}
