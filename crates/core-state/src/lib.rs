//! Input composition state for the modal command engine.
//!
//! `InputState` accumulates the tokens of a vi command (repeat digits, a pending
//! action, a terminating motion) until a motion or a visual-mode action
//! completes it. Completion atomically consumes the state into a
//! `ComposedCommand` and resets it.
//!
//! Repeat digits may come before the action, after it, or both: `4dw`, `d4w`
//! and `2d2w` all compose to the same effective repeat of 4.
//!
//! Reset flavors:
//! - `reset_interrupted` clears everything except `motion_mode`; used when the
//!   selection changes underneath a half-typed command so that it cannot fire
//!   later, while an active visual-line mode survives ordinary cursor movement.
//! - `reset_all` additionally returns `motion_mode` to `Normal`; used on focus
//!   changes.

use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{trace, warn};

pub mod args;
pub mod kill_ring;
pub mod status;
pub mod undo;

pub use args::{ArgValue, CommandArgs};
pub use kill_ring::KillRing;
pub use status::mode_label;
pub use undo::{EditSnapshot, GlueState, UNDO_HISTORY_MAX, UndoEngine};

/// Decoded repeat counts saturate here.
pub const MAX_REPEAT: u32 = 999_999;

/// Sentinel action that only establishes a selection (visual mode is implicit
/// in a non-empty selection).
pub const VISUAL_ACTION: &str = "visual";

/// How a motion's resulting selection is reshaped before an action consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionMode {
    /// Motions apply to exactly the characters they select.
    #[default]
    Normal,
    /// Motions extend to whole lines (visual line mode).
    Line,
    /// Motions that cross a line boundary extend to whole lines (e.g. `dj`).
    AutoLine,
}

impl MotionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionMode::Normal => "normal",
            MotionMode::Line => "line",
            MotionMode::AutoLine => "auto_line",
        }
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid motion mode: {0:?}")]
pub struct MotionModeParseError(pub String);

impl FromStr for MotionMode {
    type Err = MotionModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(MotionMode::Normal),
            "line" => Ok(MotionMode::Line),
            "auto_line" => Ok(MotionMode::AutoLine),
            other => Err(MotionModeParseError(other.to_string())),
        }
    }
}

/// A named host command together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub name: String,
    pub args: CommandArgs,
}

impl PendingCommand {
    pub fn new(name: impl Into<String>, args: CommandArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

pub type RepeatDigits = SmallVec<[char; 4]>;

/// Decode a repeat digit sequence (most significant first). An empty sequence
/// is an implicit repeat of 1; a malformed or zero sequence also degrades to 1.
pub fn digits_to_number(digits: &[char]) -> u32 {
    decode_repeat(digits, MAX_REPEAT)
}

/// `digits_to_number` saturating at `max`.
pub fn decode_repeat(digits: &[char], max: u32) -> u32 {
    if digits.is_empty() {
        return 1;
    }
    let mut number: u32 = 0;
    for d in digits {
        let Some(v) = d.to_digit(10) else {
            warn!(target: "engine.input", digit = %d, "malformed_repeat_digit");
            return 1;
        };
        number = number.saturating_mul(10).saturating_add(v);
    }
    if number == 0 {
        warn!(target: "engine.input", "zero_repeat_degraded");
        return 1;
    }
    number.min(max.max(1))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pub prefix_repeat_digits: RepeatDigits,
    pub action: Option<PendingCommand>,
    pub action_description: Option<String>,
    pub motion_repeat_digits: RepeatDigits,
    pub motion: Option<PendingCommand>,
    pub motion_mode: MotionMode,
    pub motion_inclusive: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digits go to the motion repeat once an action is pending, else to the prefix.
    pub fn push_repeat_digit(&mut self, digit: char) {
        if self.action.is_some() {
            self.motion_repeat_digits.push(digit);
        } else {
            self.prefix_repeat_digits.push(digit);
        }
        trace!(target: "engine.input", digit = %digit, has_action = self.action.is_some(), "repeat_digit_push");
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action.as_ref().map(|a| a.name.as_str())
    }

    /// The digit sequence the next digit would extend.
    pub fn pending_digits(&self) -> &[char] {
        if self.action.is_some() {
            &self.motion_repeat_digits
        } else {
            &self.prefix_repeat_digits
        }
    }

    /// Prefix repeat times motion repeat, as shown in the status line. The
    /// product saturates at `max` like each factor does.
    pub fn effective_repeat(&self, max: u32) -> u32 {
        decode_repeat(&self.prefix_repeat_digits, max)
            .saturating_mul(decode_repeat(&self.motion_repeat_digits, max))
            .min(max.max(1))
    }

    /// Clear a partial composition but keep `motion_mode`.
    pub fn reset_interrupted(&mut self) {
        self.prefix_repeat_digits.clear();
        self.action = None;
        self.action_description = None;
        self.motion_repeat_digits.clear();
        self.motion = None;
        self.motion_inclusive = false;
    }

    /// Clear everything, including `motion_mode`.
    pub fn reset_all(&mut self) {
        self.reset_interrupted();
        self.motion_mode = MotionMode::Normal;
    }

    /// Consume the state into a `ComposedCommand`. `motion_mode` is only reset
    /// when an action was pending: a bare motion (e.g. one made in visual line
    /// mode) must not cancel the mode it runs under.
    pub fn take_composed(&mut self, max_repeat: u32) -> ComposedCommand {
        let composed = ComposedCommand {
            prefix_repeat: decode_repeat(&self.prefix_repeat_digits, max_repeat),
            action: self.action.take(),
            motion_repeat: decode_repeat(&self.motion_repeat_digits, max_repeat),
            motion: self.motion.take(),
            motion_mode: self.motion_mode,
            motion_inclusive: self.motion_inclusive,
            max_repeat: max_repeat.max(1),
        };
        if composed.action.is_some() {
            self.reset_all();
        } else {
            self.reset_interrupted();
        }
        composed
    }
}

/// A fully composed command: what one evaluation executes as a single undoable edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedCommand {
    pub prefix_repeat: u32,
    pub action: Option<PendingCommand>,
    pub motion_repeat: u32,
    pub motion: Option<PendingCommand>,
    pub motion_mode: MotionMode,
    pub motion_inclusive: bool,
    /// Upper bound for the folded repeat.
    pub max_repeat: u32,
}

impl ComposedCommand {
    /// Fold the prefix repeat into the motion repeat (`2d3w == d6w`) so the
    /// motion runs N times and the action once. A motion that declares a
    /// `repeat` parameter receives the whole product instead. The product
    /// saturates at `max_repeat`.
    pub fn fold_repeats(&mut self) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        let max = self.max_repeat.max(1);
        if self.prefix_repeat > 1 {
            self.motion_repeat = self.motion_repeat.saturating_mul(self.prefix_repeat);
            self.prefix_repeat = 1;
        }
        self.motion_repeat = self.motion_repeat.min(max);
        if motion.args.repeat.is_some() {
            motion.args.repeat = Some(self.motion_repeat);
            self.motion_repeat = 1;
            self.prefix_repeat = 1;
        }
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action.as_ref().map(|a| a.name.as_str())
    }
}
