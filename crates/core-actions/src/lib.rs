//! Vi-style modal command engine.
//!
//! `ModalEngine` turns a stream of command tokens (repeat digits, an action,
//! a motion) into a composed command and runs it against a `Host` as one
//! undoable edit. It also owns the insert/visual mode transitions, the status
//! label and the context queries used by conditional key bindings.
//!
//! The vi-level motions and actions in `commands` are ordinary host commands;
//! `register_vi_commands` installs them next to the host primitives.

pub mod commands;
pub mod engine;
pub mod selection;

pub use commands::{FIND_MOTION, register_vi_commands};
pub use engine::{ContextQuery, EngineError, EngineSettings, ModalEngine, QueryOperator};

use core_model::MemoryView;

/// In-memory view with the vi commands installed.
pub fn vi_view(name: impl Into<String>, text: &str) -> MemoryView {
    let mut view = MemoryView::new(name, text);
    register_vi_commands(view.registry_mut());
    view
}
