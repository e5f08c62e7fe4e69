// =====================================================
// FILE: tests/config_tests.rs - CONFIG + FACTORY
// =====================================================

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io::Write;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use undo_sync::{create_manager, AppError, Config, FnCommand, ReversibleAction, ShortcutAction};

#[tokio::test]
async fn test_from_file_reads_all_sections() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[general]
log_level = "debug"

[history]
max_entries = 3

[shortcuts]
enabled = false
debounce_ms = 0
undo = ["alt+u"]
redo = ["alt+r"]
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.history.max_entries, Some(3));
    assert!(!config.shortcuts.enabled);
    assert_eq!(config.shortcuts.undo, vec!["alt+u"]);
    assert_eq!(config.config_path(), Some(file.path()));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(dir.path().join("absent.toml")).await;
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[tokio::test]
async fn test_factory_applies_history_limit_and_keymap() {
    let config = Config::from_toml_str(
        r#"
[history]
max_entries = 2

[shortcuts]
debounce_ms = 0
undo = ["alt+u"]
"#,
    )
    .unwrap();

    let counter = Arc::new(AtomicI32::new(0));
    let shared = counter.clone();
    let (mut manager, mut adapter) = create_manager::<()>(&config);
    manager
        .register(FnCommand::new("inc", move |_| {
            let (up, down) = (shared.clone(), shared.clone());
            Ok(ReversibleAction::from_fn(
                move || {
                    up.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                move || {
                    down.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                },
            ))
        }))
        .unwrap();

    for _ in 0..3 {
        manager.invoke("inc", None).await.unwrap();
    }
    assert_eq!(manager.history_len(), 2);
    assert_eq!(manager.cursor(), Some(1));

    assert!(!manager.shortcuts_enabled());
    adapter.mount(&mut manager);
    assert!(manager.shortcuts_enabled());

    let alt_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::ALT);
    for _ in 0..3 {
        adapter.handle_key(&mut manager, &alt_u).await.unwrap();
    }
    // Only the two retained entries can be undone.
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(manager.cursor(), None);

    let ctrl_z = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
    assert_eq!(adapter.handle_key(&mut manager, &ctrl_z).await.unwrap(), None);

    let ctrl_y = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL);
    assert_eq!(
        adapter.handle_key(&mut manager, &ctrl_y).await.unwrap(),
        Some(ShortcutAction::Redo)
    );
}
