// =====================================================
// FILE: shortcuts/mod.rs - KEYBOARD ADAPTER LAYER
// =====================================================

pub mod adapter;
pub mod debounce;
pub mod keymap;

pub use adapter::ShortcutAdapter;
pub use debounce::Debounced;
pub use keymap::{KeyChord, Keymap, ShortcutAction};

/// Turns raw input events into higher-level outputs.
///
/// Implemented by [`Keymap`] for chord decoding; [`Debounced`] wraps any
/// implementation to rate-limit what it emits.
pub trait Decode {
    type Event;
    type Output;

    fn decode(&mut self, event: &Self::Event) -> Option<Self::Output>;
}
