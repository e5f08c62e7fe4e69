// =====================================================
// FILE: src/commands/manager.rs - UNDO/REDO COMMAND MANAGER
// =====================================================

use super::command::Command;
use super::history::History;
use super::registry::CommandRegistry;
use crate::core::prelude::*;

/// Owns the command table, the linear history and the shortcut gate for one
/// editing surface.
///
/// Every mutating operation takes `&mut self`, so redo/undo effects of one
/// manager never overlap. The cursor moves only after an effect resolves
/// successfully; a failing effect leaves it where it was and the error is
/// returned unchanged.
pub struct CommandManager<D = ()> {
    registry: CommandRegistry<D>,
    history: History,
    shortcut_gate: bool,
}

impl<D: 'static> CommandManager<D> {
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
            history: History::new(),
            shortcut_gate: false,
        }
    }

    /// Applies the history limit from config. The gate stays closed until an
    /// adapter mounts.
    pub fn with_config(config: &Config) -> Self {
        Self {
            registry: CommandRegistry::new(),
            history: History::with_limit(config.history.max_entries),
            shortcut_gate: false,
        }
    }

    pub fn register<T: Command<D>>(&mut self, command: T) -> Result<()> {
        self.registry.register(command)?;
        Ok(())
    }

    /// Runs `name` with `data`. Unknown names are ignored.
    pub async fn invoke(&mut self, name: &str, data: Option<D>) -> Result<()> {
        let Some(command) = self.registry.find_command(name) else {
            log::debug!("invoke: no command registered as '{}'", name);
            return Ok(());
        };

        let mut action = command
            .execute(data)?
            .with_command_name(command.name().trim());
        action.redo().await?;

        if !command.recordable() {
            log::debug!("invoke: '{}' executed (not recorded)", command.name());
            return Ok(());
        }

        self.history.record(action);
        log::debug!(
            "invoke: '{}' recorded, history={} cursor={:?}",
            command.name(),
            self.history.len(),
            self.history.cursor()
        );
        Ok(())
    }

    pub async fn redo(&mut self) -> Result<()> {
        let Some(action) = self.history.next_redo_mut() else {
            log::debug!("redo: nothing to redo");
            return Ok(());
        };

        action.redo().await?;
        self.history.advance();
        Ok(())
    }

    pub async fn undo(&mut self) -> Result<()> {
        let Some(action) = self.history.current_mut() else {
            log::debug!("undo: nothing to undo");
            return Ok(());
        };

        action.undo().await?;
        self.history.retreat();
        Ok(())
    }

    pub fn set_shortcut_gate(&mut self, enabled: bool) {
        self.shortcut_gate = enabled;
    }

    pub fn shortcuts_enabled(&self) -> bool {
        self.shortcut_gate
    }

    /// Drops all commands and history and resets the cursor.
    pub fn teardown(&mut self) {
        self.registry.clear();
        self.history.clear();
        log::info!("CommandManager torn down");
    }

    pub fn cursor(&self) -> Option<usize> {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_names(&self) -> Vec<Option<&str>> {
        self.history.names()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.registry.list_commands()
    }

    pub fn debug_info(&self) -> String {
        format!(
            "{}, history: {}, cursor: {:?}, shortcuts: {}",
            self.registry.debug_info(),
            self.history.len(),
            self.history.cursor(),
            self.shortcut_gate
        )
    }
}

impl<D: 'static> Default for CommandManager<D> {
    fn default() -> Self {
        Self::new()
    }
}
