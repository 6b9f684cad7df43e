use thiserror::Error;

use entbridge_shared::CallbackError;

/// Errors returned by the [`BridgeManager`](crate::BridgeManager) lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// `start` was called on a bridge that is already running
    #[error("Bridge is already started")]
    AlreadyStarted,

    /// An operation that needs the callbacks ran before `start`
    #[error("Bridge must be started before {operation}")]
    NotStarted { operation: &'static str },

    /// The entity system reported ready more than once
    #[error("An entity listener is already registered with the entity system")]
    ListenerAlreadyRegistered,

    /// Two callbacks were configured under the same name
    #[error("Callback name '{name}' is configured more than once")]
    DuplicateCallbackName { name: String },

    /// The registry refused to create a callback. Nothing was left registered.
    #[error("Failed to create callback '{name}': {source}")]
    CallbackCreation { name: String, source: CallbackError },
}
