//! Insert and visual mode transitions.

use super::{EngineError, ModalEngine};
use crate::commands::FIND_MOTION;
use crate::selection::{shrink_selections, transform_each_caret};
use core_model::{CommandError, Host};
use core_state::{CommandArgs, MotionMode};
use tracing::{debug, trace};

const EXIT_INSERT_LABEL: &str = "exit_insert_mode";

impl ModalEngine {
    /// Every edit from here until `exit_insert_mode` becomes one undo step.
    /// `insert_command` is the edit that opened insert mode (`o`, `A`, ...).
    /// A disabled opening command is skipped; any other failure closes the
    /// glued group again and leaves the view in command mode.
    pub fn enter_insert_mode(
        &mut self,
        host: &mut dyn Host,
        insert_command: Option<&str>,
        insert_args: CommandArgs,
    ) -> Result<(), EngineError> {
        host.mark_undo_groups_for_gluing();
        if let Some(cmd) = insert_command {
            match host.run_command(cmd, &insert_args) {
                Ok(()) => {}
                Err(CommandError::Disabled(name)) => {
                    trace!(target: "engine.mode", command = %name, "insert_command_disabled");
                }
                Err(e) => {
                    host.glue_marked_undo_groups();
                    return Err(e.into());
                }
            }
        }
        let settings = host.settings_mut();
        settings.command_mode = false;
        settings.inverse_caret_state = false;
        debug!(target: "engine.mode", insert_command, "enter_insert_mode");
        self.update_status(host);
        Ok(())
    }

    pub fn exit_insert_mode(&mut self, host: &mut dyn Host) -> Result<(), EngineError> {
        host.begin_edit(EXIT_INSERT_LABEL);
        let settings = host.settings_mut();
        settings.command_mode = true;
        settings.inverse_caret_state = true;
        if !host.has_non_empty_selection() {
            transform_each_caret(host, |_, pt| pt.saturating_sub(1), false, true);
        }
        self.update_status(host);
        host.end_edit();
        host.glue_marked_undo_groups();
        debug!(target: "engine.mode", "exit_insert_mode");
        Ok(())
    }

    pub fn enter_visual_line_mode(&mut self, host: &mut dyn Host) -> Result<(), EngineError> {
        self.input.motion_mode = MotionMode::Line;
        let args = CommandArgs::new().with_param("to", "line_without_eol");
        let result = host.run_command("expand_selection", &args);
        self.update_status(host);
        trace!(target: "engine.mode", "enter_visual_line_mode");
        result.map_err(EngineError::from)
    }

    pub fn exit_visual_line_mode(&mut self, host: &mut dyn Host) {
        self.input.motion_mode = MotionMode::Normal;
        self.update_status(host);
    }

    /// Escape in visual mode: first drop a line mode, then the selection.
    pub fn exit_visual_mode(&mut self, host: &mut dyn Host) {
        if self.input.motion_mode != MotionMode::Normal {
            self.input.motion_mode = MotionMode::Normal;
        } else {
            shrink_selections(host);
        }
        self.update_status(host);
    }

    /// Repeat the last character search (`;`), or reversed (`,`). The replay
    /// is not recorded, so `,` never changes what `;` repeats.
    pub fn repeat_find(&mut self, host: &mut dyn Host, reverse: bool) -> Result<(), EngineError> {
        let Some(mut args) = self.last_find.clone() else {
            trace!(target: "engine.mode", "repeat_find_without_search");
            return Ok(());
        };
        args = args.with_param("record", false);
        if reverse {
            args.forward = Some(!args.is_forward());
        }
        self.set_motion(host, FIND_MOTION, args, true, None, None)
    }
}
