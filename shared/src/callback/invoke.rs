use super::{context::ScriptContext, error::ScriptError};

/// A script function attached to a callback
pub type Subscriber = Box<dyn FnMut(&mut ScriptContext) -> Result<(), ScriptError>>;

cfg_if! {
    if #[cfg(feature = "catch_unwind")] {
        use std::{any::Any, panic::{self, AssertUnwindSafe}};

        fn panic_message(payload: &(dyn Any + Send)) -> String {
            if let Some(message) = payload.downcast_ref::<&str>() {
                return (*message).to_string();
            }
            if let Some(message) = payload.downcast_ref::<String>() {
                return message.clone();
            }
            "unknown panic payload".to_string()
        }

        /// Runs one subscriber, turning a panic into a [`ScriptError::Panicked`]
        pub(crate) fn invoke(
            callback: &str,
            subscriber: &mut Subscriber,
            context: &mut ScriptContext,
        ) -> Result<(), ScriptError> {
            match panic::catch_unwind(AssertUnwindSafe(|| subscriber(context))) {
                Ok(result) => result.map_err(|err| err.with_callback(callback)),
                Err(payload) => Err(ScriptError::Panicked {
                    callback: callback.to_string(),
                    message: panic_message(payload.as_ref()),
                }),
            }
        }
    } else {
        pub(crate) fn invoke(
            callback: &str,
            subscriber: &mut Subscriber,
            context: &mut ScriptContext,
        ) -> Result<(), ScriptError> {
            subscriber(context).map_err(|err| err.with_callback(callback))
        }
    }
}
