//! Typed parameters handed to host commands.
//!
//! The engine only ever inspects `forward`, `repeat` and `character`; every
//! other family-specific knob (`by`, `to`, `before`, ...) travels through the
//! `params` map and is interpreted by the command that owns it.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommandArgs {
    /// Motion direction; `None` for motions without a direction.
    pub forward: Option<bool>,
    pub extend: bool,
    /// Visual-mode variant of a motion (no clipping to line content).
    pub visual: bool,
    /// Present when the command consumes the repeat count itself.
    pub repeat: Option<u32>,
    /// Target character for single-character motions and replacements.
    pub character: Option<char>,
    #[serde(flatten)]
    pub params: BTreeMap<String, ArgValue>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forward(mut self, forward: bool) -> Self {
        self.forward = Some(forward);
        self
    }

    pub fn with_extend(mut self, extend: bool) -> Self {
        self.extend = extend;
        self
    }

    pub fn with_visual(mut self, visual: bool) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn with_character(mut self, character: char) -> Self {
        self.character = Some(character);
        self
    }

    pub fn with_param(mut self, key: &str, value: impl Into<ArgValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        match self.params.get(key) {
            Some(ArgValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn param_bool(&self, key: &str) -> Option<bool> {
        match self.params.get(key) {
            Some(ArgValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// `forward` with the conventional default of `true`.
    pub fn is_forward(&self) -> bool {
        self.forward.unwrap_or(true)
    }
}
