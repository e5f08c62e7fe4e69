// =====================================================
// FILE: commands/mod.rs
// =====================================================

pub mod action;
pub mod command;
pub mod history;
pub mod manager;
pub mod registry;

pub use action::{Effect, ReversibleAction};
pub use command::{Command, FnCommand};
pub use history::History;
pub use manager::CommandManager;
pub use registry::CommandRegistry;
