// =====================================================
// FILE: src/shortcuts/keymap.rs - CHORD DECODING
// =====================================================

use super::Decode;
use crate::core::config::ShortcutConfig;
use crate::core::constants::{DEFAULT_REDO_CHORDS, DEFAULT_UNDO_CHORDS};
use crate::core::prelude::*;
use crossterm::event::KeyEventKind;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

const CHORD_MODIFIERS: KeyModifiers = KeyModifiers::SHIFT
    .union(KeyModifiers::CONTROL)
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER);

/// Modifier set plus key code, e.g. `ctrl+shift+z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code: normalize_code(code),
            modifiers: modifiers & CHORD_MODIFIERS,
        }
    }

    pub fn from_event(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

// Terminals report shifted letters as uppercase; bindings are stored lowercase.
fn normalize_code(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl FromStr for KeyChord {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |why: &str| AppError::Validation(format!("invalid chord '{}': {}", s, why));

        let parts: Vec<String> = s
            .split('+')
            .map(|p| p.trim().to_lowercase())
            .collect();
        let Some((key, mods)) = parts.split_last() else {
            return Err(invalid("empty"));
        };

        let mut modifiers = KeyModifiers::NONE;
        for m in mods {
            modifiers |= match m.as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "shift" => KeyModifiers::SHIFT,
                "alt" | "option" => KeyModifiers::ALT,
                "super" | "cmd" | "meta" => KeyModifiers::SUPER,
                other => return Err(invalid(&format!("unknown modifier '{}'", other))),
            };
        }

        let code = match key.as_str() {
            "" => return Err(invalid("missing key")),
            "esc" | "escape" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => k[1..]
                .parse::<u8>()
                .map(KeyCode::F)
                .map_err(|_| invalid("unknown key"))?,
            k => {
                let mut chars = k.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(invalid("unknown key")),
                }
            }
        };

        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("ctrl".into());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("alt".into());
        }
        if self.modifiers.contains(KeyModifiers::SUPER) {
            parts.push("super".into());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("shift".into());
        }

        parts.push(match self.code {
            KeyCode::Char(' ') => "space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "esc".into(),
            KeyCode::Enter => "enter".into(),
            KeyCode::Tab => "tab".into(),
            KeyCode::Backspace => "backspace".into(),
            KeyCode::Delete => "delete".into(),
            KeyCode::F(n) => format!("f{}", n),
            other => format!("{:?}", other).to_lowercase(),
        });

        write!(f, "{}", parts.join("+"))
    }
}

/// Chord → action table.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyChord, ShortcutAction>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default platform chords: ctrl/cmd+z undo; ctrl/cmd+y and ctrl/cmd+shift+z redo.
    pub fn with_defaults() -> Self {
        let mut keymap = Self::new();
        keymap.bind_all(ShortcutAction::Undo, DEFAULT_UNDO_CHORDS.iter().copied());
        keymap.bind_all(ShortcutAction::Redo, DEFAULT_REDO_CHORDS.iter().copied());
        keymap
    }

    /// Unparsable chords are skipped with a warning.
    pub fn from_config(config: &ShortcutConfig) -> Self {
        let mut keymap = Self::new();
        keymap.bind_all(ShortcutAction::Undo, config.undo.iter().map(String::as_str));
        keymap.bind_all(ShortcutAction::Redo, config.redo.iter().map(String::as_str));
        keymap
    }

    fn bind_all<'a>(&mut self, action: ShortcutAction, chords: impl Iterator<Item = &'a str>) {
        for raw in chords {
            match raw.parse::<KeyChord>() {
                Ok(chord) => self.bind(chord, action),
                Err(e) => log::warn!("Skipping shortcut binding: {}", e),
            }
        }
    }

    pub fn bind(&mut self, chord: KeyChord, action: ShortcutAction) {
        if let Some(previous) = self.bindings.insert(chord, action) {
            if previous != action {
                log::debug!("Chord {} rebound {:?} -> {:?}", chord, previous, action);
            }
        }
    }

    pub fn unbind(&mut self, chord: &KeyChord) -> Option<ShortcutAction> {
        self.bindings.remove(chord)
    }

    pub fn action_for(&self, key: &KeyEvent) -> Option<ShortcutAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        self.bindings.get(&KeyChord::from_event(key)).copied()
    }

    pub fn chords_for(&self, action: ShortcutAction) -> Vec<KeyChord> {
        let mut chords: Vec<KeyChord> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(c, _)| *c)
            .collect();
        chords.sort_by_key(|c| c.to_string());
        chords
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Decode for Keymap {
    type Event = KeyEvent;
    type Output = ShortcutAction;

    fn decode(&mut self, event: &KeyEvent) -> Option<ShortcutAction> {
        self.action_for(event)
    }
}
