//! Host buffer/view model consumed by the modal engine.
//!
//! The engine never touches text storage directly. Everything it needs from an
//! editor is expressed by the `Host` trait: selection access, line and
//! character queries, running a named command, per-view settings, status
//! slots, scroll-into-view, edit bracketing for undo, and the kill ring.
//!
//! `MemoryView` is a complete in-memory host. It keeps a command registry of
//! plain function pointers: the primitive editor commands from `commands` are
//! installed by default and higher layers register their own on top.
//!
//! Edit bracketing:
//! * `begin_edit`/`end_edit` nest; the outermost pair records one undo step
//!   when the text changed.
//! * A `run_command` issued outside any edit is wrapped in its own edit, so
//!   every top-level command is individually undoable. `undo`/`redo` are
//!   never wrapped.
//! * `mark_undo_groups_for_gluing`/`glue_marked_undo_groups` collapse every
//!   step recorded between them into one.

use core_state::{CommandArgs, KillRing};
use core_text::{Buffer, Region, Selection};
use thiserror::Error;

pub mod commands;
pub mod registry;
pub mod view;

pub use registry::{CommandFn, CommandRegistry};
pub use view::MemoryView;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid argument for {command}: {reason}")]
    InvalidArgument { command: String, reason: String },
    #[error("command disabled: {0}")]
    Disabled(String),
}

impl CommandError {
    pub fn invalid(command: &str, reason: impl Into<String>) -> Self {
        CommandError::InvalidArgument {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

/// Persistent per-view flags the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSettings {
    /// Command (normal) mode is active; off means insert mode.
    pub command_mode: bool,
    /// Block-caret rendering, kept in step with `command_mode`.
    pub inverse_caret_state: bool,
}

pub trait Host {
    fn buffer(&self) -> &Buffer;

    fn selection(&self) -> &Selection;
    fn set_selection(&mut self, selection: Selection);

    /// Insert text without adjusting the selection; returns chars inserted.
    fn insert(&mut self, pt: usize, text: &str) -> usize;
    /// Erase text without adjusting the selection.
    fn erase(&mut self, r: Region);

    fn run_command(&mut self, name: &str, args: &CommandArgs) -> Result<(), CommandError>;

    fn settings(&self) -> &ViewSettings;
    fn settings_mut(&mut self) -> &mut ViewSettings;

    fn set_status(&mut self, key: &str, text: &str);
    fn erase_status(&mut self, key: &str);

    /// Request that `selection` be scrolled into view.
    fn show(&mut self, selection: &Selection);

    fn begin_edit(&mut self, label: &str);
    fn end_edit(&mut self);
    fn mark_undo_groups_for_gluing(&mut self);
    fn glue_marked_undo_groups(&mut self);

    fn kill_ring_mut(&mut self) -> &mut KillRing;

    fn size(&self) -> usize {
        self.buffer().len()
    }

    fn substr(&self, r: Region) -> String {
        self.buffer().substr(r)
    }

    fn char_at(&self, pt: usize) -> Option<char> {
        self.buffer().char_at(pt)
    }

    fn line(&self, pt: usize) -> Region {
        self.buffer().line(pt)
    }

    fn full_line(&self, pt: usize) -> Region {
        self.buffer().full_line(pt)
    }

    fn text_point(&self, row: usize, col: usize) -> usize {
        self.buffer().text_point(row, col)
    }

    fn row_col(&self, pt: usize) -> (usize, usize) {
        self.buffer().row_col(pt)
    }

    fn has_non_empty_selection(&self) -> bool {
        self.selection().has_non_empty_region()
    }
}
