//! The modal engine: one `InputState` per editing session, driven by the
//! key-binding layer through the composition controls and read back through
//! the context queries.
//!
//! Composition never edits by itself. A motion (or an action issued while a
//! selection already exists) completes the command; the state is consumed and
//! reset first, then `eval::evaluate` runs the composed command as one
//! undoable host edit.

use core_config::EngineConfig;
use core_model::{CommandError, Host};
use core_state::{CommandArgs, InputState, MAX_REPEAT, mode_label};
use thiserror::Error;
use tracing::{debug, info, trace};

mod compose;
mod context;
pub mod eval;
mod mode;

pub use context::{ContextQuery, QueryOperator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Engine knobs sourced from `[engine]` in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub max_repeat: u32,
    pub status_key: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_repeat: MAX_REPEAT,
            status_key: "mode".to_string(),
        }
    }
}

impl From<&EngineConfig> for EngineSettings {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            max_repeat: cfg.max_repeat,
            status_key: cfg.status_key.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalEngine {
    input: InputState,
    settings: EngineSettings,
    last_find: Option<CommandArgs>,
}

impl ModalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Arguments of the last recorded character search, replayed by `repeat_find`.
    pub fn last_find(&self) -> Option<&CommandArgs> {
        self.last_find.as_ref()
    }

    pub fn status_label(&self, host: &dyn Host) -> String {
        mode_label(
            &self.input,
            host.settings().command_mode,
            host.has_non_empty_selection(),
            self.settings.max_repeat,
        )
    }

    /// Write the mode label into the host's status slot.
    pub fn update_status(&self, host: &mut dyn Host) {
        let label = self.status_label(&*host);
        trace!(target: "engine.mode", label = %label, "status_update");
        host.set_status(&self.settings.status_key, &label);
    }

    /// Put a freshly opened view into command mode.
    pub fn attach(&mut self, host: &mut dyn Host) {
        let settings = host.settings_mut();
        settings.command_mode = true;
        settings.inverse_caret_state = true;
        self.update_status(host);
        info!(target: "engine.mode", "attached");
    }

    /// Focus gained. Clears the whole input state and re-syncs
    /// `inverse_caret_state` to `command_mode`. `command_mode` itself is left
    /// as is: a view in insert mode stays in insert mode.
    pub fn on_activated(&mut self, host: &mut dyn Host) {
        self.reset_session(host);
    }

    /// Focus lost. Same reset as `on_activated`.
    pub fn on_deactivated(&mut self, host: &mut dyn Host) {
        self.reset_session(host);
    }

    /// Focus changes drop everything, including a visual line mode, and bring
    /// the caret style back in line with the mode flag.
    fn reset_session(&mut self, host: &mut dyn Host) {
        self.input.reset_all();
        let settings = host.settings_mut();
        settings.inverse_caret_state = settings.command_mode;
        debug!(target: "engine.input", "input_reset_all");
        self.update_status(host);
    }

    /// A selection change from outside the engine cancels a half-typed
    /// command but keeps the motion mode.
    pub fn on_selection_modified(&mut self, host: &mut dyn Host) {
        self.input.reset_interrupted();
        trace!(target: "engine.input", "input_reset_interrupted");
        self.update_status(host);
    }

    /// Views start (or are reloaded) in command mode.
    pub fn on_load(&mut self, host: &mut dyn Host) -> Result<(), EngineError> {
        self.exit_insert_mode(host)
    }

    /// Leave every view without a modal indicator when the engine goes away.
    pub fn unload<'a, I>(&mut self, hosts: I)
    where
        I: IntoIterator<Item = &'a mut dyn Host>,
    {
        let mut count = 0usize;
        for host in hosts {
            let settings = host.settings_mut();
            settings.command_mode = false;
            settings.inverse_caret_state = false;
            host.erase_status(&self.settings.status_key);
            count += 1;
        }
        self.input.reset_all();
        info!(target: "engine.mode", views = count, "unloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vi_view;
    use core_model::MemoryView;
    use core_text::{Region, Selection};

    fn attached(text: &str) -> (ModalEngine, MemoryView) {
        let mut engine = ModalEngine::new();
        let mut view = vi_view("t", text);
        engine.attach(&mut view);
        (engine, view)
    }

    #[test]
    fn attach_enters_command_mode() {
        let (_, view) = attached("abc");
        assert!(view.settings().command_mode);
        assert!(view.settings().inverse_caret_state);
        assert_eq!(view.status("mode"), Some("COMMAND MODE"));
    }

    #[test]
    fn custom_status_key() {
        let mut engine = ModalEngine::with_settings(EngineSettings {
            max_repeat: 9,
            status_key: "vi".into(),
        });
        let mut view = vi_view("t", "abc");
        engine.attach(&mut view);
        engine.push_repeat_digit(&mut view, '5');
        engine.push_repeat_digit(&mut view, '5');
        assert_eq!(view.status("vi"), Some("COMMAND MODE - * 9"));
        assert_eq!(view.status("mode"), None);
    }

    #[test]
    fn settings_from_config() {
        let cfg = EngineConfig {
            max_repeat: 42,
            status_key: "m".into(),
        };
        let s = EngineSettings::from(&cfg);
        assert_eq!(s.max_repeat, 42);
        assert_eq!(s.status_key, "m");
    }

    #[test]
    fn activation_resets_motion_mode() {
        let (mut engine, mut view) = attached("abc");
        engine.set_motion_mode(&mut view, "line");
        engine.push_repeat_digit(&mut view, '3');
        engine.on_activated(&mut view);
        assert_eq!(engine.input(), &InputState::default());
        assert_eq!(view.status("mode"), Some("COMMAND MODE"));
    }

    #[test]
    fn selection_change_keeps_motion_mode() {
        let (mut engine, mut view) = attached("abc\ndef");
        engine.enter_visual_line_mode(&mut view).unwrap();
        engine.push_repeat_digit(&mut view, '2');
        view.set_selection(Selection::single(Region::new(0, 7)));
        engine.on_selection_modified(&mut view);
        assert!(engine.input().prefix_repeat_digits.is_empty());
        assert_eq!(view.status("mode"), Some("VISUAL LINE MODE"));
    }

    #[test]
    fn unload_clears_every_view() {
        let mut engine = ModalEngine::new();
        let mut a = vi_view("a", "one");
        let mut b = vi_view("b", "two");
        engine.attach(&mut a);
        engine.attach(&mut b);
        engine.unload([&mut a as &mut dyn Host, &mut b]);
        for v in [&a, &b] {
            assert!(!v.settings().command_mode);
            assert!(!v.settings().inverse_caret_state);
            assert_eq!(v.status("mode"), None);
        }
    }
}
