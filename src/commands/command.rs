use super::action::ReversibleAction;
use crate::core::prelude::*;

/// A named operation that produces a [`ReversibleAction`] each time it runs.
///
/// `D` is the payload type handed to `execute`; it is fixed per manager.
pub trait Command<D = ()>: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Whether a successful execution is recorded in history.
    fn recordable(&self) -> bool {
        true
    }

    fn execute(&self, data: Option<D>) -> Result<ReversibleAction>;
}

type ExecuteFn<D> = Box<dyn Fn(Option<D>) -> Result<ReversibleAction> + Send + Sync>;

/// Closure-backed command for callers that don't want a dedicated type.
pub struct FnCommand<D = ()> {
    name: String,
    recordable: bool,
    execute: ExecuteFn<D>,
}

impl<D> FnCommand<D> {
    pub fn new<F>(name: impl Into<String>, execute: F) -> Self
    where
        F: Fn(Option<D>) -> Result<ReversibleAction> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            recordable: true,
            execute: Box::new(execute),
        }
    }

    pub fn non_recordable(mut self) -> Self {
        self.recordable = false;
        self
    }
}

impl<D: 'static> Command<D> for FnCommand<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn recordable(&self) -> bool {
        self.recordable
    }

    fn execute(&self, data: Option<D>) -> Result<ReversibleAction> {
        (self.execute)(data)
    }
}

impl<D> std::fmt::Debug for FnCommand<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("recordable", &self.recordable)
            .finish()
    }
}
