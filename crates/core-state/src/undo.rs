use core_text::{Buffer, Selection};
use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Buffer + selection captured before an edit.
#[derive(Clone, Debug)]
pub struct EditSnapshot {
    pub label: String,
    pub buffer: Buffer,
    pub selection: Selection,
    /// Content hash of the buffer at capture.
    pub hash: u64,
}

impl EditSnapshot {
    pub fn capture(label: impl Into<String>, buffer: &Buffer, selection: &Selection) -> Self {
        Self {
            label: label.into(),
            buffer: buffer.clone(),
            selection: selection.clone(),
            hash: buffer.content_hash(),
        }
    }
}

/// Gluing state: while `Marked`, every snapshot pushed above `depth` belongs
/// to one group that `glue_marked` collapses into a single undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlueState {
    Inactive,
    Marked { depth: usize },
}

#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: Vec<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    glue: GlueState,
    /// Count of edits that left the text unchanged and were not recorded.
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
            glue: GlueState::Inactive,
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn glue_state(&self) -> GlueState {
        self.glue
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }
    pub fn last_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|s| s.label.as_str())
    }

    /// Record a finished edit given the state captured before it. Edits that
    /// did not change the text are skipped.
    pub fn commit(&mut self, before: EditSnapshot, after: &Buffer) {
        let after_hash = after.content_hash();
        if before.hash == after_hash {
            self.snapshots_skipped += 1;
            trace!(target: "host.undo", label = %before.label, undo_depth = self.undo_stack.len(), "snapshot_unchanged_skip");
            return;
        }
        trace!(target: "host.undo", label = %before.label, undo_depth = self.undo_stack.len() + 1, "push_snapshot");
        self.undo_stack.push(before);
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            let _ = self.undo_stack.remove(0);
            if let GlueState::Marked { depth } = &mut self.glue {
                *depth = depth.saturating_sub(1);
            }
            trace!(target: "host.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "host.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Start a glued group at the current history depth.
    pub fn mark_for_gluing(&mut self) {
        self.glue = GlueState::Marked {
            depth: self.undo_stack.len(),
        };
        trace!(target: "host.undo", depth = self.undo_stack.len(), "glue_marked");
    }

    /// Collapse every snapshot pushed since the mark into one undo step. The
    /// earliest snapshot is kept: undoing it restores the pre-group state.
    pub fn glue_marked(&mut self, label: &str) {
        let GlueState::Marked { depth } = self.glue else {
            return;
        };
        self.glue = GlueState::Inactive;
        if self.undo_stack.len() > depth + 1 {
            let dropped = self.undo_stack.len() - depth - 1;
            self.undo_stack.truncate(depth + 1);
            trace!(target: "host.undo", dropped, "glue_collapsed");
        }
        if let Some(first) = self.undo_stack.get_mut(depth) {
            first.label = label.to_string();
        }
    }

    pub fn undo(&mut self, buffer: &mut Buffer, selection: &mut Selection) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "host.undo", label = %last.label, undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len() + 1, "undo_pop");
        self.redo_stack
            .push(EditSnapshot::capture(last.label.clone(), buffer, selection));
        *buffer = last.buffer;
        *selection = last.selection;
        true
    }

    pub fn redo(&mut self, buffer: &mut Buffer, selection: &mut Selection) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "host.undo", label = %next.label, redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len() + 1, "redo_pop");
        self.undo_stack
            .push(EditSnapshot::capture(next.label.clone(), buffer, selection));
        *buffer = next.buffer;
        *selection = next.selection;
        true
    }
}
