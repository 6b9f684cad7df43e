use std::fmt;

use super::{
    context::ScriptContext,
    error::{CallbackError, ScriptError},
};

/// Identifies one named callback inside a [`CallbackRegistry`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackKey(u32);

impl CallbackKey {
    pub(crate) const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CallbackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackKey({})", self.0)
    }
}

/// How a callback's subscribers are driven
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Notify every subscriber in registration order. Results are ignored and
    /// a failing subscriber does not stop the others.
    Broadcast,
    /// Ask subscribers in registration order until one produces a non-null
    /// result. Only one subscriber decides; a failure ends the dispatch.
    SingleProvider,
}

/// One callback detached from its registry for the length of a dispatch.
///
/// Subscribers run while the registry itself is not borrowed, so they may
/// cause notifications on other callbacks.
pub trait Invocation {
    fn function_count(&self) -> usize;

    fn script_context(&mut self) -> &mut ScriptContext;

    /// Runs the subscribers against the detached script context
    fn execute(&mut self, dispatch: Dispatch) -> Result<(), ScriptError>;
}

/// The named-callback registry the bridge drives.
///
/// Callers follow the same sequence for every invocation: check
/// `function_count`, detach the callback with `begin_invocation`, `reset` and
/// `push` on its script context, `execute`, read the result back, then hand
/// it back with `end_invocation`.
pub trait CallbackRegistry {
    type Invocation: Invocation;

    /// Creates (or returns the existing) callback for `name`
    fn create_callback(&mut self, name: &str) -> Result<CallbackKey, CallbackError>;

    /// Releases a callback; the key must not be used afterwards. Releasing a
    /// callback that is mid-dispatch drops it once the dispatch ends.
    fn release_callback(&mut self, key: CallbackKey);

    /// Number of subscribers attached to the callback, zero for unknown keys
    fn function_count(&self, key: CallbackKey) -> usize;

    fn callback_name(&self, key: CallbackKey) -> Option<&str>;

    /// `None` for unknown keys and while the callback is detached
    fn script_context(&mut self, key: CallbackKey) -> Option<&mut ScriptContext>;

    /// Detaches the callback. Fails with `CallbackNotFound` for unknown keys
    /// and `AlreadyExecuting` if it is already detached.
    fn begin_invocation(&mut self, key: CallbackKey) -> Result<Self::Invocation, ScriptError>;

    /// Reattaches a callback detached by `begin_invocation`
    fn end_invocation(&mut self, key: CallbackKey, invocation: Self::Invocation);

    /// Runs the callback's subscribers against its script context without
    /// releasing the registry in between
    fn execute(&mut self, key: CallbackKey, dispatch: Dispatch) -> Result<(), ScriptError> {
        let mut invocation = self.begin_invocation(key)?;
        let result = invocation.execute(dispatch);
        self.end_invocation(key, invocation);
        result
    }
}
