//! Editor state: styled buffer, selection, typing attributes and undo engine.
//!
//! `EditorState` is the explicit context every formatting operation receives.
//! Nothing here is ambient: the host owns one state per text view and passes
//! it into `core-actions`.
//!
//! Undo:
//! - Formatting actions push one discrete snapshot *before* any mutation, so
//!   an operation's own writes are never partially captured.
//! - A run of text insertions is captured by a single snapshot taken lazily at
//!   the first insert; a newline, a selection change, or any formatting action
//!   ends the run.
//! - Snapshots clone the buffer. The rope shares nodes and paragraph styles are
//!   `Rc`-shared, so a clone is cheap and never aliases mutable state.

use core_text::{Attributes, StyledBuffer, TextRange};
use tracing::trace;

pub mod undo;
use undo::UndoEngine;
pub use undo::{EditSnapshot, InsertRun, SnapshotKind, UNDO_HISTORY_MAX};

#[derive(Debug)]
pub struct EditorState {
    pub buffer: StyledBuffer,
    selection: TextRange,
    /// Style stamped onto the next inserted character.
    pub typing: Attributes,
    pub dirty: bool,
    undo: UndoEngine,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(StyledBuffer::new())
    }
}

impl EditorState {
    pub fn new(buffer: StyledBuffer) -> Self {
        Self {
            buffer,
            selection: TextRange::caret(0),
            typing: Attributes::default(),
            dirty: false,
            undo: UndoEngine::new(),
        }
    }

    /// State over `text` with uniform attributes, caret at the start and those
    /// attributes as typing attributes.
    pub fn from_text(text: &str, attrs: Attributes) -> Self {
        let mut state = Self::new(StyledBuffer::with_text(text, attrs.clone()));
        state.typing = attrs;
        state
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    /// Move the selection and re-derive the typing attributes from the text
    /// the caret sits after (or the first selected character), the way a
    /// platform text view does. An empty buffer keeps its typing attributes.
    pub fn set_selection(&mut self, selection: TextRange) {
        self.selection = selection;
        self.undo.end_insert_coalescing();
        self.sync_typing_attributes();
        trace!(target: "state.selection", location = selection.location, length = selection.length, "selection_set");
    }

    /// Re-derive the typing attributes from the stored text around the
    /// current selection. No-op for an empty buffer or no selection.
    pub fn sync_typing_attributes(&mut self) {
        let selection = self.selection;
        if selection.is_not_found() || self.buffer.is_empty() {
            return;
        }
        let len = self.buffer.len();
        let probe = if selection.is_caret() && selection.location > 0 {
            selection.location - 1
        } else {
            selection.location
        };
        if let Some((attrs, _)) = self.buffer.attributes_at(probe.min(len - 1)) {
            self.typing = attrs.clone();
        }
    }

    /// Store a selection without touching the typing attributes (used after
    /// edits that already synced them).
    pub fn place_selection(&mut self, selection: TextRange) {
        self.selection = selection;
    }

    /// Push a discrete undo snapshot of the current state. Ends any insert run.
    pub fn push_discrete_edit_snapshot(&mut self) {
        self.undo.end_insert_coalescing();
        self.undo
            .push_snapshot(SnapshotKind::Format, &self.buffer, self.selection, &self.typing);
    }

    /// Start (or continue) a coalesced typing run.
    pub fn begin_insert_coalescing(&mut self) {
        self.undo
            .begin_insert_coalescing(&self.buffer, self.selection, &self.typing);
    }

    pub fn end_insert_coalescing(&mut self) {
        self.undo.end_insert_coalescing();
    }

    pub fn note_insert_edit(&mut self) {
        self.undo.note_insert_edit();
    }

    /// Undo last snapshot. Returns the kind of step reverted, if any.
    pub fn undo(&mut self) -> Option<SnapshotKind> {
        let applied = self
            .undo
            .undo(&mut self.buffer, &mut self.selection, &mut self.typing);
        if applied.is_some() {
            self.dirty = true;
        }
        applied
    }

    /// Redo previously undone snapshot. Returns the kind of step reapplied, if any.
    pub fn redo(&mut self) -> Option<SnapshotKind> {
        let applied = self
            .undo
            .redo(&mut self.buffer, &mut self.selection, &mut self.typing);
        if applied.is_some() {
            self.dirty = true;
        }
        applied
    }

    /// Number of successive identical snapshots skipped.
    pub fn undo_snapshots_skipped(&self) -> u64 {
        self.undo.snapshots_skipped()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.undo.insert_run()
    }
}
