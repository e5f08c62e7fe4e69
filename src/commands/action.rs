// =====================================================
// FILE: src/commands/action.rs - REDO/UNDO PAIR
// =====================================================

use crate::core::prelude::*;
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;

/// Replayable side effect. Called once per redo/undo; may be called many times.
pub type Effect = Box<dyn FnMut() -> BoxFuture<'static, Result<()>> + Send>;

/// One execution instance of a command: the effect that applies it and the
/// effect that reverses it.
pub struct ReversibleAction {
    command_name: Option<String>,
    redo: Effect,
    undo: Effect,
}

impl ReversibleAction {
    /// Builds an action from async closures.
    pub fn new<R, RF, U, UF>(mut redo: R, mut undo: U) -> Self
    where
        R: FnMut() -> RF + Send + 'static,
        RF: Future<Output = Result<()>> + Send + 'static,
        U: FnMut() -> UF + Send + 'static,
        UF: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            command_name: None,
            redo: Box::new(move || redo().boxed()),
            undo: Box::new(move || undo().boxed()),
        }
    }

    /// Builds an action from synchronous closures.
    pub fn from_fn<R, U>(mut redo: R, mut undo: U) -> Self
    where
        R: FnMut() -> Result<()> + Send + 'static,
        U: FnMut() -> Result<()> + Send + 'static,
    {
        Self {
            command_name: None,
            redo: Box::new(move || {
                let result = redo();
                async move { result }.boxed()
            }),
            undo: Box::new(move || {
                let result = undo();
                async move { result }.boxed()
            }),
        }
    }

    pub fn with_command_name(mut self, name: impl Into<String>) -> Self {
        self.command_name = Some(name.into());
        self
    }

    pub fn command_name(&self) -> Option<&str> {
        self.command_name.as_deref()
    }

    pub async fn redo(&mut self) -> Result<()> {
        (self.redo)().await
    }

    pub async fn undo(&mut self) -> Result<()> {
        (self.undo)().await
    }
}

impl std::fmt::Debug for ReversibleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReversibleAction")
            .field("command_name", &self.command_name)
            .finish_non_exhaustive()
    }
}
