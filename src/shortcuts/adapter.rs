// =====================================================
// FILE: src/shortcuts/adapter.rs - KEYBOARD → UNDO/REDO
// =====================================================

use super::debounce::Debounced;
use super::keymap::{Keymap, ShortcutAction};
use super::Decode;
use crate::commands::CommandManager;
use crate::core::config::ShortcutConfig;
use crate::core::prelude::*;
use tokio::sync::mpsc;

/// Connects a key event source to a [`CommandManager`].
///
/// The manager's shortcut gate is checked before anything is decoded, so a
/// closed gate neither dispatches nor advances the decoder's state.
pub struct ShortcutAdapter<Dec = Debounced<Keymap>> {
    decoder: Dec,
    listen_on_mount: bool,
}

impl ShortcutAdapter {
    /// Keymap from config wrapped in the configured debounce window.
    pub fn from_config(config: &ShortcutConfig) -> Self {
        Self {
            decoder: Debounced::new(Keymap::from_config(config), config.debounce),
            listen_on_mount: config.enabled,
        }
    }

    /// Whether `key` is bound to a shortcut, regardless of debouncing.
    ///
    /// While the gate is open, bound keys belong to the adapter even when a
    /// repeat was dropped, so callers should not treat them as other input.
    pub fn is_bound(&self, key: &KeyEvent) -> bool {
        self.decoder.inner().action_for(key).is_some()
    }
}

impl<Dec> ShortcutAdapter<Dec>
where
    Dec: Decode<Event = KeyEvent, Output = ShortcutAction>,
{
    pub fn new(decoder: Dec) -> Self {
        Self {
            decoder,
            listen_on_mount: true,
        }
    }

    pub fn decoder(&self) -> &Dec {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut Dec {
        &mut self.decoder
    }

    pub fn mount<P: 'static>(&mut self, manager: &mut CommandManager<P>) {
        manager.set_shortcut_gate(self.listen_on_mount);
        log::info!("Shortcuts mounted (listening: {})", self.listen_on_mount);
    }

    pub fn unmount<P: 'static>(&mut self, manager: &mut CommandManager<P>) {
        manager.set_shortcut_gate(false);
        manager.teardown();
        log::info!("Shortcuts unmounted");
    }

    /// Decodes `key` and runs the matching undo/redo.
    ///
    /// Returns the dispatched action, or `None` when the gate is closed or
    /// the key is not a shortcut (or was debounced).
    pub async fn handle_key<P: 'static>(
        &mut self,
        manager: &mut CommandManager<P>,
        key: &KeyEvent,
    ) -> Result<Option<ShortcutAction>> {
        if !manager.shortcuts_enabled() {
            return Ok(None);
        }

        let Some(action) = self.decoder.decode(key) else {
            return Ok(None);
        };

        log::debug!("Shortcut {:?} from {:?}+{:?}", action, key.modifiers, key.code);
        match action {
            ShortcutAction::Undo => manager.undo().await?,
            ShortcutAction::Redo => manager.redo().await?,
        }
        Ok(Some(action))
    }

    /// Feeds every received key through [`handle_key`](Self::handle_key)
    /// until the sender side closes. Effect failures stop the loop.
    pub async fn listen<P: 'static>(
        &mut self,
        manager: &mut CommandManager<P>,
        rx: &mut mpsc::Receiver<KeyEvent>,
    ) -> Result<()> {
        while let Some(key) = rx.recv().await {
            self.handle_key(manager, &key).await?;
        }
        log::debug!("Shortcut listener: key source closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{FnCommand, ReversibleAction};
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    fn counter_manager(counter: Arc<AtomicI32>) -> CommandManager {
        let mut manager = CommandManager::new();
        manager
            .register(FnCommand::new("inc", move |_| {
                let (up, down) = (counter.clone(), counter.clone());
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
        manager
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[tokio::test]
    async fn test_closed_gate_blocks_dispatch() {
        let counter = Arc::new(AtomicI32::new(0));
        let mut manager = counter_manager(counter.clone());
        manager.invoke("inc", None).await.unwrap();

        let mut adapter = ShortcutAdapter::new(Keymap::with_defaults());
        manager.set_shortcut_gate(false);

        let dispatched = adapter.handle_key(&mut manager, &ctrl('z')).await.unwrap();
        assert_eq!(dispatched, None);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(manager.cursor(), Some(0));
    }

    #[tokio::test]
    async fn test_mount_opens_gate_and_dispatches() {
        let counter = Arc::new(AtomicI32::new(0));
        let mut manager = counter_manager(counter.clone());
        manager.invoke("inc", None).await.unwrap();

        let mut adapter = ShortcutAdapter::new(Keymap::with_defaults());
        adapter.mount(&mut manager);

        assert_eq!(
            adapter.handle_key(&mut manager, &ctrl('z')).await.unwrap(),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(
            adapter.handle_key(&mut manager, &ctrl('y')).await.unwrap(),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(
            adapter.handle_key(&mut manager, &ctrl('q')).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_unmount_tears_down() {
        let counter = Arc::new(AtomicI32::new(0));
        let mut manager = counter_manager(counter);
        manager.invoke("inc", None).await.unwrap();

        let mut adapter = ShortcutAdapter::new(Keymap::with_defaults());
        adapter.mount(&mut manager);
        adapter.unmount(&mut manager);

        assert!(!manager.shortcuts_enabled());
        assert!(!manager.is_registered("inc"));
        assert_eq!(manager.history_len(), 0);
        assert_eq!(manager.cursor(), None);
    }

    #[tokio::test]
    async fn test_disabled_config_keeps_gate_closed() {
        let config = ShortcutConfig {
            enabled: false,
            debounce: Duration::ZERO,
            undo: vec!["ctrl+z".into()],
            redo: vec!["ctrl+y".into()],
        };
        let mut manager: CommandManager = CommandManager::new();
        let mut adapter = ShortcutAdapter::from_config(&config);
        adapter.mount(&mut manager);
        assert!(!manager.shortcuts_enabled());
        assert_eq!(adapter.decoder().window(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_dropped_repeat_is_still_bound() {
        let config = ShortcutConfig {
            enabled: true,
            debounce: Duration::from_secs(60),
            undo: vec!["u".into()],
            redo: vec!["ctrl+y".into()],
        };
        let counter = Arc::new(AtomicI32::new(0));
        let mut manager = counter_manager(counter.clone());
        manager.invoke("inc", None).await.unwrap();
        manager.invoke("inc", None).await.unwrap();

        let mut adapter = ShortcutAdapter::from_config(&config);
        adapter.mount(&mut manager);

        let u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(
            adapter.handle_key(&mut manager, &u).await.unwrap(),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(adapter.handle_key(&mut manager, &u).await.unwrap(), None);
        assert!(adapter.is_bound(&u));
        assert!(!adapter.is_bound(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_listen_drains_channel() {
        let counter = Arc::new(AtomicI32::new(0));
        let mut manager = counter_manager(counter.clone());
        manager.invoke("inc", None).await.unwrap();
        manager.invoke("inc", None).await.unwrap();

        let mut adapter = ShortcutAdapter::new(Keymap::with_defaults());
        adapter.mount(&mut manager);

        let (tx, mut rx) = mpsc::channel(8);
        tx.send(ctrl('z')).await.unwrap();
        tx.send(ctrl('z')).await.unwrap();
        tx.send(ctrl('z')).await.unwrap();
        drop(tx);

        adapter.listen(&mut manager, &mut rx).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(manager.cursor(), None);
    }
}
