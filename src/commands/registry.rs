use super::command::Command;
use crate::core::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Command table keyed by name. Re-registering a name replaces the old entry.
pub struct CommandRegistry<D = ()> {
    commands: HashMap<String, Arc<dyn Command<D>>>,
}

impl<D: 'static> CommandRegistry<D> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register<T: Command<D>>(&mut self, command: T) -> Result<&mut Self> {
        self.register_arc(Arc::new(command))
    }

    pub fn register_arc(&mut self, command: Arc<dyn Command<D>>) -> Result<&mut Self> {
        let name = command.name().trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation(
                "command name must not be empty".to_string(),
            ));
        }

        if self.commands.insert(name.clone(), command).is_some() {
            log::debug!("Command '{}' re-registered, previous handler replaced", name);
        } else {
            log::debug!("Command '{}' registered", name);
        }
        Ok(self)
    }

    pub fn find_command(&self, name: &str) -> Option<Arc<dyn Command<D>>> {
        self.commands.get(name.trim()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name.trim())
    }

    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn debug_info(&self) -> String {
        format!("CommandRegistry: {} commands", self.commands.len())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<D: 'static> Default for CommandRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
