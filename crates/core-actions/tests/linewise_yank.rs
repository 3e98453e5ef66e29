//! Caret placement after a line-mode action on a one-line buffer.

mod common;

use common::Session;
use core_model::{CommandError, Host};
use core_state::CommandArgs;
use core_text::Region;
use pretty_assertions::assert_eq;

const HELLO: &str = "hello\n";

/// Yank that leaves the selection it was given untouched.
fn yank_in_place(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    host.run_command("add_to_kill_ring", &CommandArgs::new().with_forward(true))
}

fn yank_line(s: &mut Session, action: &str) {
    s.action_in_mode(action, "line");
    s.motion(
        "expand_selection",
        CommandArgs::new().with_param("to", "line_without_eol"),
        false,
    );
}

#[test]
fn line_mode_yank_captures_terminator_and_returns_to_line_start() {
    for start in 0..=4 {
        let mut s = Session::at(HELLO, start);
        yank_line(&mut s, "vi_copy");
        assert_eq!(s.view.kill_ring().top(), Some(HELLO));
        assert_eq!(s.text(), HELLO);
        assert_eq!(s.caret(), 0, "started at {start}");
    }
}

#[test]
fn selection_preserving_action_collapses_exclusively_to_six() {
    let mut s = Session::at(HELLO, 2);
    s.view.registry_mut().register("yank_in_place", yank_in_place);
    yank_line(&mut s, "yank_in_place");
    assert_eq!(s.view.kill_ring().top(), Some(HELLO));
    // [0, 6) collapses to its end; offset 6 is the empty last line, so the
    // line-content clip leaves it there.
    assert_eq!(s.regions(), vec![Region::caret(6)]);
}

#[test]
fn line_mode_ends_after_the_action() {
    let mut s = Session::at(HELLO, 3);
    yank_line(&mut s, "vi_copy");
    assert_eq!(s.engine.input().motion_mode, core_state::MotionMode::Normal);
    assert_eq!(s.status(), Some("COMMAND MODE"));
}
