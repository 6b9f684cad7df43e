use thiserror::Error;

/// Errors raised while creating named callbacks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    /// The registry cannot hold another callback
    #[error("Cannot create callback '{name}': registry is full ({capacity} callbacks)")]
    Exhausted { name: String, capacity: usize },
}

/// Errors raised while executing a callback's subscribers.
///
/// These never cross into the host; callers report them out of band and
/// carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// A subscriber reported a failure
    #[error("Subscriber on '{callback}' failed: {message}")]
    Failed { callback: String, message: String },

    /// A subscriber panicked and the panic was caught at the dispatch boundary
    #[error("Subscriber on '{callback}' panicked: {message}")]
    Panicked { callback: String, message: String },

    /// The callback is already running further up the stack; nested
    /// dispatch on the same callback is refused
    #[error("Callback '{callback}' is already executing")]
    AlreadyExecuting { callback: String },

    /// The key does not name a live callback
    #[error("Callback {key} is not registered")]
    CallbackNotFound { key: u32 },
}

impl ScriptError {
    /// Shorthand for subscribers reporting their own failure. The callback name
    /// is filled in by the dispatcher.
    pub fn failed(message: impl Into<String>) -> Self {
        ScriptError::Failed {
            callback: String::new(),
            message: message.into(),
        }
    }

    pub(crate) fn with_callback(self, name: &str) -> Self {
        match self {
            ScriptError::Failed { callback, message } if callback.is_empty() => {
                ScriptError::Failed {
                    callback: name.to_string(),
                    message,
                }
            }
            other => other,
        }
    }
}
