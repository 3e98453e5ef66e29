#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{ModalEngine, vi_view};
use core_model::{Host, MemoryView};
use core_state::CommandArgs;
use core_text::{Region, Selection};

/// An attached engine driving one in-memory view.
pub struct Session {
    pub engine: ModalEngine,
    pub view: MemoryView,
}

impl Session {
    pub fn new(text: &str) -> Self {
        Self::at(text, 0)
    }

    pub fn at(text: &str, caret: usize) -> Self {
        let mut engine = ModalEngine::new();
        let mut view = vi_view("test", text);
        engine.attach(&mut view);
        view.set_selection(Selection::single(Region::caret(caret)));
        Self { engine, view }
    }

    pub fn text(&self) -> String {
        self.view.text()
    }

    pub fn regions(&self) -> Vec<Region> {
        self.view.selection().regions().to_vec()
    }

    /// Caret of a single empty selection.
    pub fn caret(&self) -> usize {
        let regions = self.regions();
        assert_eq!(regions.len(), 1, "expected one region, got {regions:?}");
        assert!(regions[0].is_empty(), "expected a caret, got {regions:?}");
        regions[0].b
    }

    pub fn status(&self) -> Option<&str> {
        self.view.status("mode")
    }

    pub fn digits(&mut self, digits: &str) {
        for d in digits.chars() {
            self.engine.push_repeat_digit(&mut self.view, d);
        }
    }

    pub fn action(&mut self, action: &str) {
        self.engine
            .set_action(&mut self.view, action, CommandArgs::new(), None, None)
            .expect("set_action");
    }

    pub fn action_in_mode(&mut self, action: &str, mode: &str) {
        self.engine
            .set_action(&mut self.view, action, CommandArgs::new(), Some(mode), None)
            .expect("set_action");
    }

    pub fn motion(&mut self, motion: &str, args: CommandArgs, inclusive: bool) {
        self.engine
            .set_motion(&mut self.view, motion, args, inclusive, None, None)
            .expect("set_motion");
    }

    pub fn word_forward(&mut self) {
        self.motion("move", words(true), false);
    }

    pub fn line_down(&mut self) {
        self.motion("move", lines(true), false);
    }

    /// Simulate a selection change made outside the engine (mouse, plugin).
    pub fn click(&mut self, caret: usize) {
        self.view
            .set_selection(Selection::single(Region::caret(caret)));
        self.engine.on_selection_modified(&mut self.view);
    }

    pub fn undo(&mut self) -> bool {
        self.view.undo()
    }

    pub fn type_text(&mut self, text: &str) {
        self.view
            .run_command("insert", &CommandArgs::new().with_param("characters", text))
            .expect("insert");
    }
}

pub fn words(forward: bool) -> CommandArgs {
    CommandArgs::new()
        .with_forward(forward)
        .with_extend(true)
        .with_param("by", "words")
}

pub fn lines(forward: bool) -> CommandArgs {
    CommandArgs::new()
        .with_forward(forward)
        .with_extend(true)
        .with_param("by", "lines")
}

pub fn chars_in_line(forward: bool) -> CommandArgs {
    CommandArgs::new().with_forward(forward).with_extend(true)
}
