#[macro_export]
macro_rules! impl_default {
    ($type:ty, $body:expr) => {
        impl Default for $type {
            fn default() -> Self {
                $body
            }
        }
    };
}

// Module definitions
pub mod commands;
pub mod core;
pub mod shortcuts;

// Essential re-exports
pub use commands::{Command, CommandManager, FnCommand, ReversibleAction};
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};
pub use shortcuts::{ShortcutAction, ShortcutAdapter};

/// Builds a manager and its keyboard adapter for one editing surface.
///
/// The adapter is not mounted yet; call [`ShortcutAdapter::mount`] once the
/// surface starts receiving key events.
pub fn create_manager<D: 'static>(config: &Config) -> (CommandManager<D>, ShortcutAdapter) {
    (
        CommandManager::with_config(config),
        ShortcutAdapter::from_config(&config.shortcuts),
    )
}

pub async fn load_config() -> Result<Config> {
    Config::load().await
}
