//! Vi-level motions and actions, built on the host primitives.
//!
//! Motions only reshape the selection; actions consume it. Neither knows
//! about repeat counts or motion modes, which the engine applies around them.
//! The exceptions are the motions that take a `repeat` argument
//! (`vi_move_to_hard_eol`, `vi_goto_line`): the engine hands them the whole
//! count instead of looping.

use core_model::CommandRegistry;

mod edit;
mod motion;

/// The character search motion; the engine records its arguments for `;`/`,`.
pub const FIND_MOTION: &str = "vi_move_to_character";

pub fn register_vi_commands(r: &mut CommandRegistry) {
    r.register("vi_move_by_characters_in_line", motion::by_characters_in_line);
    r.register("vi_move_by_characters", motion::by_characters);
    r.register("vi_move_to_hard_eol", motion::to_hard_eol);
    r.register(
        "vi_move_to_first_non_white_space_character",
        motion::to_first_non_white_space_character,
    );
    r.register(FIND_MOTION, motion::to_character);
    r.register("vi_goto_line", motion::goto_line);

    r.register(core_state::VISUAL_ACTION, edit::visual);
    r.register("vi_delete", edit::delete);
    r.register("vi_right_delete", edit::right_delete);
    r.register("vi_copy", edit::copy);
    r.register("vi_paste_right", edit::paste_right);
    r.register("vi_paste_left", edit::paste_left);
    r.register("paste_from_kill_ring", edit::paste_from_kill_ring);
    r.register("replace_character", edit::replace_character);
    r.register("shrink_selections", edit::shrink);
}
