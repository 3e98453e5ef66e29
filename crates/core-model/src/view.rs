use crate::{CommandError, CommandRegistry, Host, ViewSettings};
use core_state::{CommandArgs, EditSnapshot, KillRing, UndoEngine};
use core_text::{Buffer, Region, Selection};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Label given to a glued undo group.
pub const GLUED_GROUP_LABEL: &str = "sequence";

/// In-memory host: a buffer, its selection, view settings, status slots, undo
/// history and kill ring, plus a command registry.
#[derive(Debug)]
pub struct MemoryView {
    buffer: Buffer,
    selection: Selection,
    settings: ViewSettings,
    status: BTreeMap<String, String>,
    registry: CommandRegistry,
    undo: UndoEngine,
    kill_ring: KillRing,
    edit_depth: usize,
    pending_edit: Option<EditSnapshot>,
    last_shown: Option<Selection>,
}

impl MemoryView {
    /// New view with a caret at offset 0 and the primitive commands installed.
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        Self {
            buffer: Buffer::from_str(name, text),
            selection: Selection::single(0),
            settings: ViewSettings::default(),
            status: BTreeMap::new(),
            registry: CommandRegistry::with_builtins(),
            undo: UndoEngine::new(),
            kill_ring: KillRing::default(),
            edit_depth: 0,
            pending_edit: None,
            last_shown: None,
        }
    }

    pub fn with_kill_ring(mut self, kill_ring: KillRing) -> Self {
        self.kill_ring = kill_ring;
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn status(&self, key: &str) -> Option<&str> {
        self.status.get(key).map(String::as_str)
    }

    pub fn undo_engine(&self) -> &UndoEngine {
        &self.undo
    }

    pub fn kill_ring(&self) -> &KillRing {
        &self.kill_ring
    }

    /// Selection passed to the most recent `show` request.
    pub fn last_shown(&self) -> Option<&Selection> {
        self.last_shown.as_ref()
    }

    pub fn in_edit(&self) -> bool {
        self.edit_depth > 0
    }

    pub fn undo(&mut self) -> bool {
        self.undo.undo(&mut self.buffer, &mut self.selection)
    }

    pub fn redo(&mut self) -> bool {
        self.undo.redo(&mut self.buffer, &mut self.selection)
    }
}

impl Host for MemoryView {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn selection(&self) -> &Selection {
        &self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        let size = self.buffer.len();
        self.selection = Selection::from_regions(
            selection
                .iter()
                .map(|r| Region::new(r.a.min(size), r.b.min(size))),
        );
    }

    fn insert(&mut self, pt: usize, text: &str) -> usize {
        self.buffer.insert(pt, text)
    }

    fn erase(&mut self, r: Region) {
        self.buffer.erase(r);
    }

    fn run_command(&mut self, name: &str, args: &CommandArgs) -> Result<(), CommandError> {
        match name {
            "undo" => {
                self.undo();
                return Ok(());
            }
            "redo" => {
                self.redo();
                return Ok(());
            }
            _ => {}
        }
        let Some(f) = self.registry.get(name) else {
            warn!(target: "host.command", command = name, "unknown_command");
            return Err(CommandError::UnknownCommand(name.to_string()));
        };
        debug!(target: "host.command", command = name, depth = self.edit_depth, ?args, "run_command");
        let top_level = self.edit_depth == 0;
        if top_level {
            self.begin_edit(name);
        }
        let result = f(self, args);
        if top_level {
            self.end_edit();
        }
        result
    }

    fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ViewSettings {
        &mut self.settings
    }

    fn set_status(&mut self, key: &str, text: &str) {
        self.status.insert(key.to_string(), text.to_string());
    }

    fn erase_status(&mut self, key: &str) {
        self.status.remove(key);
    }

    fn show(&mut self, selection: &Selection) {
        self.last_shown = Some(selection.clone());
    }

    fn begin_edit(&mut self, label: &str) {
        if self.edit_depth == 0 {
            self.pending_edit = Some(EditSnapshot::capture(
                label,
                &self.buffer,
                &self.selection,
            ));
            // Each top-level edit starts a fresh kill-ring entry.
            self.kill_ring.seal();
            trace!(target: "host.undo", label, "edit_begin");
        }
        self.edit_depth += 1;
    }

    fn end_edit(&mut self) {
        let Some(depth) = self.edit_depth.checked_sub(1) else {
            warn!(target: "host.undo", "end_edit_without_begin");
            return;
        };
        self.edit_depth = depth;
        if depth == 0
            && let Some(before) = self.pending_edit.take()
        {
            self.undo.commit(before, &self.buffer);
        }
    }

    fn mark_undo_groups_for_gluing(&mut self) {
        self.undo.mark_for_gluing();
    }

    fn glue_marked_undo_groups(&mut self) {
        self.undo.glue_marked(GLUED_GROUP_LABEL);
    }

    fn kill_ring_mut(&mut self) -> &mut KillRing {
        &mut self.kill_ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_args(text: &str) -> CommandArgs {
        CommandArgs::new().with_param("characters", text)
    }

    #[test]
    fn top_level_commands_are_individually_undoable() {
        let mut v = MemoryView::new("t", "");
        v.run_command("insert", &insert_args("a")).unwrap();
        v.run_command("insert", &insert_args("b")).unwrap();
        assert_eq!(v.undo_engine().undo_depth(), 2);
        v.run_command("undo", &CommandArgs::new()).unwrap();
        assert_eq!(v.text(), "a");
    }

    #[test]
    fn nested_edit_records_single_step() {
        let mut v = MemoryView::new("t", "");
        v.begin_edit("outer");
        v.run_command("insert", &insert_args("a")).unwrap();
        v.run_command("insert", &insert_args("b")).unwrap();
        v.end_edit();
        assert_eq!(v.undo_engine().undo_depth(), 1);
        assert_eq!(v.undo_engine().last_label(), Some("outer"));
        assert!(v.undo());
        assert_eq!(v.text(), "");
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut v = MemoryView::new("t", "x");
        assert_eq!(
            v.run_command("frobnicate", &CommandArgs::new()),
            Err(CommandError::UnknownCommand("frobnicate".into()))
        );
        assert!(!v.in_edit());
    }

    #[test]
    fn set_selection_clamps_to_buffer() {
        let mut v = MemoryView::new("t", "abc");
        v.set_selection(Selection::single(Region::new(1, 10)));
        assert_eq!(v.selection().regions(), &[Region::new(1, 3)]);
    }

    #[test]
    fn unbalanced_end_edit_is_ignored() {
        let mut v = MemoryView::new("t", "abc");
        v.end_edit();
        assert!(!v.in_edit());
    }
}
