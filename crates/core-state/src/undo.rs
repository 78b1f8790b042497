use core_text::{Attributes, StyledBuffer, TextRange};
use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// What kind of step a snapshot records; undo and redo report it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotKind {
    /// Formatting change (indent, list, inline style). Always a discrete step.
    Format,
    /// Text entry; consecutive inserts share one snapshot.
    Typing,
}

/// A full-state snapshot for undo/redo (coarse clone; the rope and the
/// paragraph styles are shared, so this is cheap).
#[derive(Clone, Debug)]
pub struct EditSnapshot {
    pub kind: SnapshotKind,
    pub buffer: StyledBuffer,
    pub selection: TextRange,
    pub typing: Attributes,
    /// Generation of the buffer at capture; equal generations mean no change.
    pub generation: u64,
}

/// Insert run state tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    Active { edits: u32 },
}

#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: Vec<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    insert_run: InsertRun,
    snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.insert_run
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    pub fn push_snapshot(
        &mut self,
        kind: SnapshotKind,
        buffer: &StyledBuffer,
        selection: TextRange,
        typing: &Attributes,
    ) {
        if let Some(last) = self.undo_stack.last()
            && last.generation == buffer.generation()
            && last.selection == selection
            && last.typing == *typing
        {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), generation = buffer.generation(), "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(EditSnapshot {
            kind,
            buffer: buffer.clone(),
            selection,
            typing: typing.clone(),
            generation: buffer.generation(),
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), chars = buffer.len(), generation = buffer.generation(), ?kind, "push_snapshot");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        self.redo_stack.clear();
        trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
    }

    pub fn begin_insert_coalescing(
        &mut self,
        buffer: &StyledBuffer,
        selection: TextRange,
        typing: &Attributes,
    ) {
        match self.insert_run {
            InsertRun::Inactive => {
                self.push_snapshot(SnapshotKind::Typing, buffer, selection, typing);
                self.insert_run = InsertRun::Active { edits: 0 };
            }
            InsertRun::Active { .. } => {}
        }
    }

    pub fn end_insert_coalescing(&mut self) {
        self.insert_run = InsertRun::Inactive;
    }

    pub fn note_insert_edit(&mut self) {
        if let InsertRun::Active { edits } = &mut self.insert_run {
            *edits += 1;
        }
    }

    /// Restore the most recent snapshot, pushing the current state for redo.
    /// Returns the kind of step reverted, `None` when history is empty.
    pub fn undo(
        &mut self,
        buffer: &mut StyledBuffer,
        selection: &mut TextRange,
        typing: &mut Attributes,
    ) -> Option<SnapshotKind> {
        self.insert_run = InsertRun::Inactive;
        if let Some(last) = self.undo_stack.pop() {
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), kind = ?last.kind, "undo_pop");
            let current = EditSnapshot {
                kind: last.kind,
                buffer: buffer.clone(),
                selection: *selection,
                typing: typing.clone(),
                generation: buffer.generation(),
            };
            self.redo_stack.push(current);
            *buffer = last.buffer;
            *selection = last.selection;
            *typing = last.typing;
            Some(last.kind)
        } else {
            None
        }
    }

    pub fn redo(
        &mut self,
        buffer: &mut StyledBuffer,
        selection: &mut TextRange,
        typing: &mut Attributes,
    ) -> Option<SnapshotKind> {
        self.insert_run = InsertRun::Inactive;
        if let Some(next) = self.redo_stack.pop() {
            trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), kind = ?next.kind, "redo_pop");
            let current = EditSnapshot {
                kind: next.kind,
                buffer: buffer.clone(),
                selection: *selection,
                typing: typing.clone(),
                generation: buffer.generation(),
            };
            self.undo_stack.push(current);
            *buffer = next.buffer;
            *selection = next.selection;
            *typing = next.typing;
            Some(next.kind)
        } else {
            None
        }
    }
}
