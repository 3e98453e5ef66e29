//! Mode label rendering for the status bar.

use crate::{InputState, MotionMode};

pub const VISUAL_LINE_MODE: &str = "VISUAL LINE MODE";
pub const VISUAL_MODE: &str = "VISUAL MODE";
pub const COMMAND_MODE: &str = "COMMAND MODE";
pub const INSERT_MODE: &str = "INSERT MODE";

/// Render the mode label for a view.
///
/// Visual line wins over visual; a command-mode label carries the pending
/// action (its description when one was given) and the effective repeat when
/// either differs from the defaults, e.g. `COMMAND MODE - Delete * 6`.
pub fn mode_label(
    state: &InputState,
    command_mode: bool,
    has_non_empty_selection: bool,
    max_repeat: u32,
) -> String {
    if !command_mode {
        return INSERT_MODE.to_string();
    }
    if state.motion_mode == MotionMode::Line {
        return VISUAL_LINE_MODE.to_string();
    }
    if has_non_empty_selection {
        return VISUAL_MODE.to_string();
    }
    let repeat = state.effective_repeat(max_repeat);
    let desc = state
        .action_description
        .as_deref()
        .or_else(|| state.action_name());
    match (desc, repeat) {
        (None, 1) => COMMAND_MODE.to_string(),
        (Some(desc), 1) => format!("{COMMAND_MODE} - {desc}"),
        (Some(desc), n) => format!("{COMMAND_MODE} - {desc} * {n}"),
        (None, n) => format!("{COMMAND_MODE} - * {n}"),
    }
}
