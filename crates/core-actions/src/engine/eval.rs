//! Execution of a composed command.
//!
//! The whole run is bracketed by one host edit, so a composed command is a
//! single undo step however many times its motion repeats. The bracket is
//! closed on every path. When a host command fails, the text and selection
//! are put back as they were before the run, so the failed edit records
//! nothing.

use super::EngineError;
use crate::selection::{
    clip_empty_carets_to_line_content, expand_spanning_selections_to_full_line,
    expand_to_full_line, expand_to_line, shrink_exclusive, shrink_inclusive, transform_each_range,
};
use core_model::{CommandError, Host};
use core_state::{ComposedCommand, MotionMode, PendingCommand, VISUAL_ACTION};
use core_text::{Buffer, Region, Selection};
use tracing::{debug, trace};

const EDIT_LABEL: &str = "vi_eval";

/// Visual composition keeps its selection: a selection with nothing to act
/// on, a bare motion in line mode, or the `visual` sentinel action.
pub fn is_visual(has_non_empty_selection: bool, cmd: &ComposedCommand) -> bool {
    let no_action = cmd.action.is_none();
    (has_non_empty_selection && no_action)
        || (cmd.motion_mode == MotionMode::Line && no_action)
        || cmd.action_name() == Some(VISUAL_ACTION)
}

pub fn evaluate(host: &mut dyn Host, mut cmd: ComposedCommand) -> Result<(), EngineError> {
    host.begin_edit(EDIT_LABEL);
    let checkpoint = Checkpoint::capture(host);
    let result = run(host, &mut cmd);
    if let Err(e) = &result {
        debug!(target: "engine.eval", error = %e, "evaluate_failed_restoring");
        checkpoint.restore(host);
    }
    host.end_edit();
    result
}

/// Text and selection as they were before a run.
struct Checkpoint {
    buffer: Buffer,
    selection: Selection,
}

impl Checkpoint {
    fn capture(host: &dyn Host) -> Self {
        Self {
            buffer: host.buffer().clone(),
            selection: host.selection().clone(),
        }
    }

    fn restore(self, host: &mut dyn Host) {
        if host.buffer().content_hash() != self.buffer.content_hash() {
            let all = Region::new(0, host.size());
            host.erase(all);
            host.insert(0, &self.buffer.text());
        }
        host.set_selection(self.selection);
    }
}

fn run(host: &mut dyn Host, cmd: &mut ComposedCommand) -> Result<(), EngineError> {
    cmd.fold_repeats();
    let visual = is_visual(host.has_non_empty_selection(), cmd);
    debug!(
        target: "engine.eval",
        action = cmd.action_name(),
        motion = cmd.motion.as_ref().map(|m| m.name.as_str()),
        prefix_repeat = cmd.prefix_repeat,
        motion_repeat = cmd.motion_repeat,
        motion_mode = %cmd.motion_mode,
        inclusive = cmd.motion_inclusive,
        visual,
        "evaluate"
    );

    for _ in 0..cmd.prefix_repeat {
        if let Some(motion) = &cmd.motion {
            for _ in 0..cmd.motion_repeat {
                if cmd.motion_mode != MotionMode::Line {
                    pre_expand(host, motion.args.forward, cmd.motion_inclusive);
                }
                dispatch(host, motion)?;
            }
        }

        match cmd.motion_mode {
            MotionMode::Line => expand_to_line(host),
            MotionMode::AutoLine => expand_spanning_selections_to_full_line(host),
            MotionMode::Normal => {}
        }

        if let Some(action) = &cmd.action {
            if cmd.motion_mode == MotionMode::Line {
                expand_to_full_line(host);
            }
            dispatch(host, action)?;
        }
    }

    if !visual {
        if cmd.motion_inclusive {
            transform_each_range(host, |_, r| Some(shrink_inclusive(r)));
        } else {
            transform_each_range(host, |_, r| Some(shrink_exclusive(r)));
        }
    }

    if host.settings().command_mode {
        clip_empty_carets_to_line_content(host);
    }

    let selection = host.selection().clone();
    host.show(&selection);
    Ok(())
}

/// Open empty carets one character in the motion's direction so that the
/// motion extends from the character under the caret.
fn pre_expand(host: &mut dyn Host, forward: Option<bool>, inclusive: bool) {
    match forward {
        Some(true) if inclusive => transform_each_range(host, |_, r| {
            Some(if r.is_empty() {
                Region::new(r.b, r.b + 1)
            } else {
                r
            })
        }),
        Some(false) => transform_each_range(host, |_, r| {
            Some(if r.is_empty() {
                Region::new(r.b + 1, r.b)
            } else {
                r
            })
        }),
        _ => {}
    }
}

/// Disabled commands are skipped the way a host ignores a disabled binding.
fn dispatch(host: &mut dyn Host, cmd: &PendingCommand) -> Result<(), EngineError> {
    match host.run_command(&cmd.name, &cmd.args) {
        Err(CommandError::Disabled(name)) => {
            trace!(target: "engine.eval", command = %name, "command_disabled");
            Ok(())
        }
        other => other.map_err(EngineError::from),
    }
}
