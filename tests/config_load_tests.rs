// =====================================================
// FILE: tests/config_load_tests.rs - CONFIG SEARCH PATH
// =====================================================

use std::io::Write;
use std::time::Duration;
use undo_sync::Config;

// Env var and working directory are process-wide, so the search order is
// checked in a single test in its own binary.
#[tokio::test]
async fn test_load_search_order() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[general]
log_level = "debug"

[shortcuts]
debounce_ms = 250
"#
    )
    .unwrap();

    std::env::set_var("UNDO_SYNC_CONFIG", file.path());
    let config = Config::load().await.unwrap();
    assert_eq!(config.config_path(), Some(file.path()));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.shortcuts.debounce, Duration::from_millis(250));

    // Env var wins over a file in the working directory.
    std::fs::write(dir.path().join("undo-sync.toml"), "[general]\nlog_level = \"warn\"\n").unwrap();
    let config = Config::load().await.unwrap();
    assert_eq!(config.log_level, "debug");

    std::env::remove_var("UNDO_SYNC_CONFIG");
    let config = Config::load().await.unwrap();
    assert_eq!(config.log_level, "warn");

    std::fs::remove_file(dir.path().join("undo-sync.toml")).unwrap();
    let config = Config::load().await.unwrap();
    assert_eq!(config.config_path(), None);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.shortcuts.debounce, Duration::from_millis(500));
    assert!(config.shortcuts.enabled);
    assert_eq!(config.history.max_entries, None);
}
