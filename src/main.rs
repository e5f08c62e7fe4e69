// src/main.rs - terminal demo for the undo/redo manager
use crossterm::event::{
    self as crossterm_event, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::{cursor, execute, style::Print, terminal};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::Duration;
use undo_sync::core::constants::{APP_TITLE, VERSION};
use undo_sync::{
    create_manager, AppError, CommandManager, Config, FnCommand, Result, ReversibleAction,
};

type Document = Arc<Mutex<String>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().await?;
    init_logger(&config);

    std::panic::set_hook(Box::new(|panic_info| {
        restore_terminal();
        eprintln!("❌ PANIC OCCURRED! {}", panic_info);
    }));

    let document: Document = Arc::new(Mutex::new(String::new()));
    let (mut manager, mut adapter) = create_manager::<char>(&config);
    register_commands(&mut manager, &document)?;
    adapter.mount(&mut manager);

    terminal::enable_raw_mode()?;
    println!(
        "{} v{} - type to edit, Backspace delete, Ctrl+L clear, Tab toggles shortcuts, Esc quits\r",
        APP_TITLE, VERSION
    );

    let mut rx = spawn_key_reader();
    let mut status = String::from("ready");
    render(&manager, &document, &status)?;

    while let Some(key) = rx.recv().await {
        if key.kind == KeyEventKind::Release {
            continue;
        }

        let outcome = match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => break,
            (KeyCode::Tab, _) => {
                let enabled = !manager.shortcuts_enabled();
                manager.set_shortcut_gate(enabled);
                Ok(format!("shortcuts {}", if enabled { "on" } else { "off" }))
            }
            _ => dispatch(&mut adapter, &mut manager, &key).await,
        };

        status = match outcome {
            Ok(msg) => msg,
            Err(e) => {
                log::error!("{}", e);
                e.to_string()
            }
        };
        render(&manager, &document, &status)?;
    }

    adapter.unmount(&mut manager);
    restore_terminal();
    println!();
    Ok(())
}

async fn dispatch(
    adapter: &mut undo_sync::ShortcutAdapter,
    manager: &mut CommandManager<char>,
    key: &KeyEvent,
) -> Result<String> {
    if let Some(action) = adapter.handle_key(manager, key).await? {
        return Ok(format!("{:?}", action).to_lowercase());
    }
    if manager.shortcuts_enabled() && adapter.is_bound(key) {
        return Ok(String::new());
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
            manager.invoke("clear", None).await?;
            Ok("clear".into())
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            manager.invoke("insert", Some(c)).await?;
            Ok(format!("insert '{}'", c))
        }
        (KeyCode::Backspace, _) => {
            manager.invoke("delete", None).await?;
            Ok("delete".into())
        }
        _ => Ok(String::new()),
    }
}

fn register_commands(manager: &mut CommandManager<char>, document: &Document) -> Result<()> {
    let doc = document.clone();
    manager.register(FnCommand::new("insert", move |data: Option<char>| {
        let ch = data.ok_or_else(|| AppError::Validation("insert needs a character".into()))?;
        let (redo_doc, undo_doc) = (doc.clone(), doc.clone());
        Ok(ReversibleAction::from_fn(
            move || {
                edit(&redo_doc, |text| text.push(ch));
                Ok(())
            },
            move || {
                edit(&undo_doc, |text| {
                    text.pop();
                });
                Ok(())
            },
        ))
    }))?;

    let doc = document.clone();
    manager.register(FnCommand::new("delete", move |_| {
        let removed = lock(&doc)
            .chars()
            .last()
            .ok_or_else(|| AppError::Validation("nothing to delete".into()))?;
        let (redo_doc, undo_doc) = (doc.clone(), doc.clone());
        Ok(ReversibleAction::from_fn(
            move || {
                edit(&redo_doc, |text| {
                    text.pop();
                });
                Ok(())
            },
            move || {
                edit(&undo_doc, |text| text.push(removed));
                Ok(())
            },
        ))
    }))?;

    let doc = document.clone();
    manager.register(FnCommand::new("clear", move |_| {
        let previous = lock(&doc).clone();
        let (redo_doc, undo_doc) = (doc.clone(), doc.clone());
        Ok(ReversibleAction::from_fn(
            move || {
                edit(&redo_doc, String::clear);
                Ok(())
            },
            move || {
                edit(&undo_doc, |text| *text = previous.clone());
                Ok(())
            },
        ))
    }))?;

    Ok(())
}

fn lock(doc: &Document) -> std::sync::MutexGuard<'_, String> {
    doc.lock().unwrap_or_else(|poisoned| {
        log::warn!("Recovered from poisoned mutex");
        poisoned.into_inner()
    })
}

fn edit(doc: &Document, f: impl FnOnce(&mut String)) {
    f(&mut lock(doc));
}

fn spawn_key_reader() -> mpsc::Receiver<KeyEvent> {
    let (tx, rx) = mpsc::channel(100);

    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        match crossterm_event::poll(Duration::from_millis(100)) {
            Ok(true) => {
                if let Ok(CrosstermEvent::Key(key)) = crossterm_event::read() {
                    if tx.blocking_send(key).is_err() {
                        break;
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                log::error!("Key reader stopped: {}", e);
                break;
            }
        }
    });

    rx
}

fn render(manager: &CommandManager<char>, document: &Document, status: &str) -> Result<()> {
    let position = manager
        .cursor()
        .map_or_else(|| "-1".to_string(), |c| c.to_string());
    let line = format!(
        "{} │ history {} cursor {} shortcuts {} │ {}",
        lock(document),
        manager.history_len(),
        position,
        if manager.shortcuts_enabled() { "on" } else { "off" },
        status
    );

    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        Print(line)
    )?;
    stdout.flush()?;
    Ok(())
}

fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(std::io::stdout(), cursor::Show);
}

fn init_logger(config: &Config) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&config.log_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // Raw mode owns the terminal, so logs go to a file next to the working dir.
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("undo-sync.log")
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("❌ FAILED TO OPEN LOG FILE: {}", e),
    }

    let _ = builder.try_init();
}
