pub const APP_TITLE: &str = "UNDO SYNC";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_FILE_NAME: &str = "undo-sync.toml";
pub const CONFIG_ENV_VAR: &str = "UNDO_SYNC_CONFIG";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const MAX_DEBOUNCE_MS: u64 = 5000;
/// 0 = unbounded history.
pub const DEFAULT_MAX_HISTORY: usize = 0;

pub const DEFAULT_UNDO_CHORDS: &[&str] = &["ctrl+z", "super+z"];
pub const DEFAULT_REDO_CHORDS: &[&str] = &["ctrl+y", "super+y", "ctrl+shift+z", "super+shift+z"];
