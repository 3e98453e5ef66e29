mod common;

use common::{Session, chars_in_line};
use core_actions::FIND_MOTION;
use core_state::{CommandArgs, InputState, MotionMode};
use core_text::Region;
use pretty_assertions::assert_eq;

#[test]
fn stray_digit_does_not_survive_a_click() {
    let mut s = Session::new("abcdef");
    s.digits("2");
    s.click(3);
    s.motion("vi_move_by_characters_in_line", chars_in_line(true), false);
    assert_eq!(s.caret(), 4);
}

#[test]
fn digit_applies_without_interruption() {
    let mut s = Session::at("abcdef", 3);
    s.digits("2");
    s.motion("vi_move_by_characters_in_line", chars_in_line(true), false);
    assert_eq!(s.caret(), 5);
}

#[test]
fn pending_action_is_dropped_by_a_click() {
    let mut s = Session::new("abc def ghi");
    s.action("vi_delete");
    assert_eq!(s.status(), Some("COMMAND MODE - vi_delete"));
    s.click(4);
    assert_eq!(s.status(), Some("COMMAND MODE"));
    s.word_forward();
    assert_eq!(s.text(), "abc def ghi");
    assert_eq!(s.caret(), 8);
    assert_eq!(s.view.undo_engine().undo_depth(), 0);
}

#[test]
fn click_keeps_line_mode_but_focus_change_drops_it() {
    let mut s = Session::new("one\ntwo\n");
    s.engine.enter_visual_line_mode(&mut s.view).unwrap();
    s.digits("3");
    s.click(5);
    assert_eq!(s.engine.input().motion_mode, MotionMode::Line);
    assert!(s.engine.input().prefix_repeat_digits.is_empty());

    s.engine.on_deactivated(&mut s.view);
    assert_eq!(s.engine.input(), &InputState::default());
}

#[test]
fn reset_is_idempotent() {
    let mut s = Session::new("abc");
    s.digits("12");
    s.click(1);
    let once = s.engine.input().clone();
    s.engine.on_selection_modified(&mut s.view);
    assert_eq!(s.engine.input(), &once);
}

#[test]
fn failed_find_leaves_the_caret_alone() {
    let mut s = Session::at("abcdef", 2);
    let result = s.engine.set_motion(
        &mut s.view,
        FIND_MOTION,
        CommandArgs::new().with_forward(true).with_extend(true),
        true,
        None,
        None,
    );
    assert!(result.is_err());
    assert_eq!(s.regions(), vec![Region::caret(2)]);
    assert_eq!(s.status(), Some("COMMAND MODE"));
}

#[test]
fn failed_motion_does_not_leave_a_visual_selection() {
    let mut s = Session::new("abc def ghi");
    s.action("vi_delete");
    let result = s.engine.set_motion(
        &mut s.view,
        "no_such_motion",
        CommandArgs::new().with_forward(true),
        true,
        None,
        None,
    );
    assert!(result.is_err());
    assert_eq!(s.regions(), vec![Region::caret(0)]);
    assert_eq!(s.status(), Some("COMMAND MODE"));

    // The next action composes instead of running on a stray character.
    s.action("vi_delete");
    assert_eq!(s.text(), "abc def ghi");
    assert_eq!(s.status(), Some("COMMAND MODE - vi_delete"));
    s.word_forward();
    assert_eq!(s.text(), "def ghi");
    assert_eq!(s.view.undo_engine().undo_depth(), 1);
}
