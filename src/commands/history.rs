// src/commands/history.rs
use super::action::ReversibleAction;

/// Linear history of reversible actions.
///
/// `applied` counts how many leading entries are currently applied, so the
/// conventional cursor is `applied - 1` and "nothing applied" is `applied == 0`.
/// Invariant: `applied <= entries.len()`.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<ReversibleAction>,
    applied: usize,
    max_entries: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_entries: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            applied: 0,
            max_entries: max_entries.filter(|&n| n > 0),
        }
    }

    /// Appends a freshly executed action, discarding any redoable entries first.
    pub fn record(&mut self, action: ReversibleAction) {
        if self.applied < self.entries.len() {
            let discarded = self.entries.len() - self.applied;
            self.entries.truncate(self.applied);
            log::debug!("History: discarded {} redoable entries", discarded);
        }

        self.entries.push(action);

        if let Some(max) = self.max_entries {
            if self.entries.len() > max {
                let overflow = self.entries.len() - max;
                self.entries.drain(0..overflow);
            }
        }

        self.applied = self.entries.len();
    }

    /// Entry that `redo` would re-apply.
    pub fn next_redo_mut(&mut self) -> Option<&mut ReversibleAction> {
        self.entries.get_mut(self.applied)
    }

    /// Entry that `undo` would reverse.
    pub fn current_mut(&mut self) -> Option<&mut ReversibleAction> {
        let cursor = self.cursor()?;
        self.entries.get_mut(cursor)
    }

    pub(crate) fn advance(&mut self) {
        if self.applied < self.entries.len() {
            self.applied += 1;
        }
    }

    pub(crate) fn retreat(&mut self) {
        self.applied = self.applied.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.applied = 0;
    }

    /// Index of the last applied entry; `None` when nothing is applied.
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    pub fn names(&self) -> Vec<Option<&str>> {
        self.entries.iter().map(|a| a.command_name()).collect()
    }
}
