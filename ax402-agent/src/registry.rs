//! Plain-data action registration and dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::session::Session;

/// A boxed future, as returned by action handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An action implementation: borrows the session, consumes the argument
/// object, and produces result text for the model.
pub type ActionHandler =
    Box<dyn for<'a> Fn(&'a Session, Value) -> BoxFuture<'a, String> + Send + Sync>;

/// One registered action: a name, a description and input schema for the
/// model, and the handler that runs it.
#[allow(missing_debug_implementations)] // handler is a dyn closure
pub struct ActionDef {
    /// Name the model invokes the action by.
    pub name: &'static str,

    /// One-line description surfaced to the model.
    pub description: &'static str,

    /// JSON Schema of the argument object.
    pub schema: Value,

    /// The handler itself.
    pub handler: ActionHandler,
}

/// Maps action names to handlers.
///
/// Registration is plain data: no decorators, no runtime metadata. Unknown
/// action names produce a descriptive string rather than an error type, since
/// the consumer is a language model.
#[derive(Default)]
#[allow(missing_debug_implementations)] // contains dyn closures
pub struct ActionRegistry {
    actions: HashMap<&'static str, ActionDef>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action, replacing any previous action of the same name.
    pub fn register(&mut self, action: ActionDef) {
        self.actions.insert(action.name, action);
    }

    /// Returns the registered action names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.actions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Iterates over registered actions, for prompt assembly.
    pub fn definitions(&self) -> impl Iterator<Item = &ActionDef> {
        self.actions.values()
    }

    /// Runs the named action against the session.
    ///
    /// Unknown names are reported in the result text along with the
    /// available actions.
    pub async fn dispatch(&self, session: &Session, name: &str, args: Value) -> String {
        match self.actions.get(name) {
            Some(action) => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(action = name, "Dispatching action");
                (action.handler)(session, args).await
            }
            None => format!(
                "Unknown action `{name}`. Available actions: {}",
                self.names().join(", ")
            ),
        }
    }
}
