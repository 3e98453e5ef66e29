mod common;

use common::Session;
use core_model::{CommandError, Host};
use core_state::{CommandArgs, GlueState};
use core_text::{Region, Selection};
use pretty_assertions::assert_eq;

#[test]
fn insert_session_undoes_in_one_step() {
    let mut s = Session::at("fn main() {}\n", 11);
    s.engine
        .enter_insert_mode(&mut s.view, None, CommandArgs::new())
        .unwrap();
    assert_eq!(s.status(), Some("INSERT MODE"));
    for word in [" ", "println!", "()", ";", " "] {
        s.type_text(word);
    }
    s.engine.exit_insert_mode(&mut s.view).unwrap();
    assert_eq!(s.text(), "fn main() { println!(); }\n");
    assert_eq!(s.status(), Some("COMMAND MODE"));
    // Caret steps back onto the last inserted character.
    assert_eq!(s.caret(), 23);

    assert_eq!(s.view.undo_engine().undo_depth(), 1);
    assert!(s.undo());
    assert_eq!(s.text(), "fn main() {}\n");
    assert!(!s.undo());
}

#[test]
fn insert_session_redo_restores_whole_session() {
    let mut s = Session::at("ab", 1);
    s.engine
        .enter_insert_mode(&mut s.view, None, CommandArgs::new())
        .unwrap();
    s.type_text("1");
    s.type_text("2");
    s.engine.exit_insert_mode(&mut s.view).unwrap();
    assert!(s.undo());
    assert_eq!(s.text(), "ab");
    assert!(s.view.redo());
    assert_eq!(s.text(), "a12b");
}

#[test]
fn opening_command_joins_the_session() {
    let mut s = Session::at("one\n", 3);
    s.engine
        .enter_insert_mode(
            &mut s.view,
            Some("insert"),
            CommandArgs::new().with_param("characters", "\n"),
        )
        .unwrap();
    s.type_text("two");
    s.engine.exit_insert_mode(&mut s.view).unwrap();
    assert_eq!(s.text(), "one\ntwo\n");
    assert_eq!(s.view.undo_engine().undo_depth(), 1);
    assert!(s.undo());
    assert_eq!(s.text(), "one\n");
}

#[test]
fn edits_before_and_after_stay_separate() {
    let mut s = Session::new("abc def");
    s.action("vi_delete");
    s.word_forward();
    s.engine
        .enter_insert_mode(&mut s.view, None, CommandArgs::new())
        .unwrap();
    s.type_text("xyz ");
    s.engine.exit_insert_mode(&mut s.view).unwrap();
    assert_eq!(s.text(), "xyz def");
    assert_eq!(s.view.undo_engine().undo_depth(), 2);
    assert!(s.undo());
    assert_eq!(s.text(), "def");
}

#[test]
fn exit_with_selection_keeps_it() {
    let mut s = Session::new("abcdef");
    s.engine
        .enter_insert_mode(&mut s.view, None, CommandArgs::new())
        .unwrap();
    s.view
        .set_selection(Selection::single(Region::new(2, 5)));
    s.engine.exit_insert_mode(&mut s.view).unwrap();
    assert_eq!(s.regions(), vec![Region::new(2, 5)]);
    assert_eq!(s.status(), Some("VISUAL MODE"));
}

#[test]
fn on_load_forces_command_mode() {
    let mut s = Session::at("abc", 3);
    s.engine
        .enter_insert_mode(&mut s.view, None, CommandArgs::new())
        .unwrap();
    assert!(!s.view.settings().command_mode);
    s.engine.on_load(&mut s.view).unwrap();
    assert!(s.view.settings().command_mode);
    assert!(s.view.settings().inverse_caret_state);
    assert_eq!(s.caret(), 2);
}

fn never_enabled(_host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    Err(CommandError::Disabled("never_enabled".into()))
}

#[test]
fn failed_opening_command_keeps_command_mode_and_history() {
    let mut s = Session::new("abc");
    let result = s
        .engine
        .enter_insert_mode(&mut s.view, Some("no_such_command"), CommandArgs::new());
    assert!(result.is_err());
    assert!(s.view.settings().command_mode);
    assert_eq!(s.status(), Some("COMMAND MODE"));
    assert_eq!(s.view.undo_engine().glue_state(), GlueState::Inactive);

    // Later edits stay separate steps, even across a load.
    s.type_text("x");
    s.type_text("y");
    s.engine.on_load(&mut s.view).unwrap();
    assert_eq!(s.view.undo_engine().undo_depth(), 2);
    assert!(s.undo());
    assert_eq!(s.text(), "xabc");
}

#[test]
fn disabled_opening_command_still_enters_insert_mode() {
    let mut s = Session::new("abc");
    s.view.registry_mut().register("never_enabled", never_enabled);
    s.engine
        .enter_insert_mode(&mut s.view, Some("never_enabled"), CommandArgs::new())
        .unwrap();
    assert!(!s.view.settings().command_mode);
    assert_eq!(s.status(), Some("INSERT MODE"));
    s.type_text("z");
    s.engine.exit_insert_mode(&mut s.view).unwrap();
    assert_eq!(s.text(), "zabc");
    assert_eq!(s.view.undo_engine().undo_depth(), 1);
}
