use crate::{CommandError, Host, commands};
use core_state::CommandArgs;
use std::collections::HashMap;
use std::fmt;

pub type CommandFn = fn(&mut dyn Host, &CommandArgs) -> Result<(), CommandError>;

/// Name -> command table. Later registrations override earlier ones.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandFn>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CommandRegistry")
            .field("commands", &names)
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the primitive editor commands.
    pub fn with_builtins() -> Self {
        let mut r = Self::new();
        commands::register_builtins(&mut r);
        r
    }

    pub fn register(&mut self, name: &str, f: CommandFn) {
        self.commands.insert(name.to_string(), f);
    }

    pub fn get(&self, name: &str) -> Option<CommandFn> {
        self.commands.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
