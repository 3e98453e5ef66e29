//! Composition controls: the operations the key-binding layer calls while a
//! command is being typed.

use super::{EngineError, ModalEngine, eval};
use crate::commands::FIND_MOTION;
use core_model::Host;
use core_state::{CommandArgs, MotionMode, PendingCommand};
use tracing::{debug, trace, warn};

impl ModalEngine {
    pub fn push_repeat_digit(&mut self, host: &mut dyn Host, digit: char) {
        self.input.push_repeat_digit(digit);
        self.update_status(host);
    }

    /// Make `action` the pending operator. With a selection already present
    /// there is nothing left to wait for, so the command runs immediately.
    pub fn set_action(
        &mut self,
        host: &mut dyn Host,
        action: &str,
        args: CommandArgs,
        motion_mode: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), EngineError> {
        self.input.action = Some(PendingCommand::new(action, args));
        self.input.action_description = description.map(str::to_string);
        if let Some(mode) = motion_mode.and_then(parse_mode) {
            // Line is sticky against AutoLine so `Vd`-style combinations stay linewise.
            if self.input.motion_mode == MotionMode::Line && mode == MotionMode::AutoLine {
                trace!(target: "engine.input", "line_mode_kept");
            } else {
                self.input.motion_mode = mode;
            }
        }
        debug!(target: "engine.input", action, motion_mode = %self.input.motion_mode, "set_action");
        if host.has_non_empty_selection() {
            self.eval_input(host)
        } else {
            self.update_status(host);
            Ok(())
        }
    }

    /// Set the terminating motion and run the composed command.
    pub fn set_motion(
        &mut self,
        host: &mut dyn Host,
        motion: &str,
        mut args: CommandArgs,
        inclusive: bool,
        character: Option<char>,
        motion_mode: Option<&str>,
    ) -> Result<(), EngineError> {
        if let Some(c) = character {
            args.character = Some(c);
        }
        if motion == FIND_MOTION && args.param_bool("record") != Some(false) {
            self.last_find = Some(args.clone());
        }
        self.input.motion = Some(PendingCommand::new(motion, args));
        self.input.motion_inclusive = inclusive;
        if let Some(mode) = motion_mode.and_then(parse_mode) {
            self.input.motion_mode = mode;
        }
        debug!(target: "engine.input", motion, inclusive, motion_mode = %self.input.motion_mode, "set_motion");
        self.eval_input(host)
    }

    /// Single-token commands (`D`, `x`, ...) that name both halves at once.
    pub fn set_action_motion(
        &mut self,
        host: &mut dyn Host,
        motion: &str,
        action: &str,
        motion_args: CommandArgs,
        motion_inclusive: bool,
        action_args: CommandArgs,
    ) -> Result<(), EngineError> {
        self.input.action = Some(PendingCommand::new(action, action_args));
        self.input.motion = Some(PendingCommand::new(motion, motion_args));
        self.input.motion_inclusive = motion_inclusive;
        debug!(target: "engine.input", action, motion, "set_action_motion");
        self.eval_input(host)
    }

    /// Invalid mode strings are logged and ignored.
    pub fn set_motion_mode(&mut self, host: &mut dyn Host, mode: &str) {
        if let Some(mode) = parse_mode(mode) {
            self.input.motion_mode = mode;
        }
        self.update_status(host);
    }

    /// Consume the input state, then evaluate. The state is already reset
    /// when a host command fails.
    fn eval_input(&mut self, host: &mut dyn Host) -> Result<(), EngineError> {
        let composed = self.input.take_composed(self.settings.max_repeat);
        let result = eval::evaluate(host, composed);
        self.update_status(host);
        result
    }
}

fn parse_mode(mode: &str) -> Option<MotionMode> {
    match mode.parse() {
        Ok(m) => Some(m),
        Err(e) => {
            warn!(target: "engine.input", error = %e, "motion_mode_ignored");
            None
        }
    }
}
