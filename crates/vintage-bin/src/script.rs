//! Replay scripts: a TOML list of `[[step]]` tables, each tagged by `op`.
//!
//! ```toml
//! [[step]]
//! op = "digit"
//! digits = "2"
//!
//! [[step]]
//! op = "action"
//! name = "vi_delete"
//! description = "Delete"
//!
//! [[step]]
//! op = "motion"
//! name = "move"
//! args = { by = "words", forward = true, extend = true }
//! ```

use anyhow::{Context, Result};
use core_actions::ModalEngine;
use core_model::{Host, MemoryView};
use core_state::CommandArgs;
use core_text::{Region, Selection};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Digit {
        digits: String,
    },
    Action {
        name: String,
        #[serde(default)]
        args: CommandArgs,
        mode: Option<String>,
        description: Option<String>,
    },
    Motion {
        name: String,
        #[serde(default)]
        args: CommandArgs,
        #[serde(default)]
        inclusive: bool,
        character: Option<char>,
        mode: Option<String>,
    },
    ActionMotion {
        action: String,
        motion: String,
        #[serde(default)]
        action_args: CommandArgs,
        #[serde(default)]
        motion_args: CommandArgs,
        #[serde(default)]
        inclusive: bool,
    },
    MotionMode {
        mode: String,
    },
    EnterInsert {
        command: Option<String>,
        #[serde(default)]
        args: CommandArgs,
    },
    ExitInsert,
    /// Text typed in insert mode.
    Type {
        text: String,
    },
    /// Selection replaced from outside the engine, as `[anchor, caret]` pairs.
    SelectionModified {
        regions: Vec<[usize; 2]>,
    },
    Undo,
    Redo,
    VisualLine,
    ExitVisual,
    RepeatFind {
        #[serde(default)]
        reverse: bool,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

pub fn parse(src: &str) -> Result<Script> {
    toml::from_str(src).context("parse replay script")
}

/// Outcome of a replay. Failing steps are logged and skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub failed: usize,
}

pub fn replay(engine: &mut ModalEngine, view: &mut MemoryView, steps: &[Step]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (index, step) in steps.iter().enumerate() {
        debug!(target: "replay", index, ?step, "step");
        match apply(engine, view, step) {
            Ok(()) => report.applied += 1,
            Err(e) => {
                warn!(target: "replay", index, error = %e, "step_failed");
                report.failed += 1;
            }
        }
    }
    report
}

fn apply(engine: &mut ModalEngine, view: &mut MemoryView, step: &Step) -> Result<()> {
    match step {
        Step::Digit { digits } => {
            for d in digits.chars() {
                engine.push_repeat_digit(view, d);
            }
        }
        Step::Action {
            name,
            args,
            mode,
            description,
        } => engine.set_action(
            view,
            name,
            args.clone(),
            mode.as_deref(),
            description.as_deref(),
        )?,
        Step::Motion {
            name,
            args,
            inclusive,
            character,
            mode,
        } => engine.set_motion(
            view,
            name,
            args.clone(),
            *inclusive,
            *character,
            mode.as_deref(),
        )?,
        Step::ActionMotion {
            action,
            motion,
            action_args,
            motion_args,
            inclusive,
        } => engine.set_action_motion(
            view,
            motion,
            action,
            motion_args.clone(),
            *inclusive,
            action_args.clone(),
        )?,
        Step::MotionMode { mode } => engine.set_motion_mode(view, mode),
        Step::EnterInsert { command, args } => {
            engine.enter_insert_mode(view, command.as_deref(), args.clone())?
        }
        Step::ExitInsert => engine.exit_insert_mode(view)?,
        Step::Type { text } => view.run_command(
            "insert",
            &CommandArgs::new().with_param("characters", text.as_str()),
        )?,
        Step::SelectionModified { regions } => {
            view.set_selection(Selection::from_regions(
                regions.iter().map(|[a, b]| Region::new(*a, *b)),
            ));
            engine.on_selection_modified(view);
        }
        Step::Undo => {
            view.undo();
            engine.update_status(view);
        }
        Step::Redo => {
            view.redo();
            engine.update_status(view);
        }
        Step::VisualLine => engine.enter_visual_line_mode(view)?,
        Step::ExitVisual => engine.exit_visual_mode(view),
        Step::RepeatFind { reverse } => engine.repeat_find(view, *reverse)?,
    }
    Ok(())
}
