use std::collections::HashMap;

use log::{debug, warn};

use super::{
    context::ScriptContext,
    error::{CallbackError, ScriptError},
    invoke::{invoke, Subscriber},
    registry::{CallbackKey, CallbackRegistry, Dispatch, Invocation},
};

/// Identifies one subscription on a callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Contains Config properties used by the [`CallbackManager`]
#[derive(Clone, Debug)]
pub struct CallbackManagerConfig {
    /// Upper bound on live callbacks; creating past it fails
    pub max_callbacks: usize,
}

impl Default for CallbackManagerConfig {
    fn default() -> Self {
        Self { max_callbacks: 256 }
    }
}

/// A callback's subscribers and script context, moved out of the
/// [`CallbackManager`] while they run
pub struct CallbackInvocation {
    name: String,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    context: ScriptContext,
}

impl CallbackInvocation {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: Vec::new(),
            context: ScriptContext::new(),
        }
    }

    fn broadcast(&mut self) -> Result<(), ScriptError> {
        let mut first_fault = None;
        let mut faults = 0;
        for (_, subscriber) in self.subscribers.iter_mut() {
            if let Err(err) = invoke(&self.name, subscriber, &mut self.context) {
                faults += 1;
                debug!("{}", err);
                first_fault.get_or_insert(err);
            }
        }
        match first_fault {
            Some(err) => {
                if faults > 1 {
                    warn!(
                        "{} subscribers on '{}' failed during broadcast",
                        faults, self.name
                    );
                }
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn single_provider(&mut self) -> Result<(), ScriptError> {
        self.context.take_result();
        for (_, subscriber) in self.subscribers.iter_mut() {
            invoke(&self.name, subscriber, &mut self.context)?;
            if self.context.has_usable_result() {
                return Ok(());
            }
            self.context.discard_null_result();
        }
        Ok(())
    }
}

impl Invocation for CallbackInvocation {
    fn function_count(&self) -> usize {
        self.subscribers.len()
    }

    fn script_context(&mut self) -> &mut ScriptContext {
        &mut self.context
    }

    fn execute(&mut self, dispatch: Dispatch) -> Result<(), ScriptError> {
        match dispatch {
            Dispatch::Broadcast => self.broadcast(),
            Dispatch::SingleProvider => self.single_provider(),
        }
    }
}

struct CallbackEntry {
    name: String,
    function_count: usize,
    /// `None` while detached by `begin_invocation`
    attached: Option<CallbackInvocation>,
}

/// In-process named-callback registry.
///
/// Subscribers run in the order they were added. A callback that is
/// mid-dispatch cannot gain or lose subscribers.
pub struct CallbackManager {
    config: CallbackManagerConfig,
    callbacks: HashMap<CallbackKey, CallbackEntry>,
    names: HashMap<String, CallbackKey>,
    next_key: u32,
    next_subscriber: u64,
}

impl CallbackManager {
    pub fn new(config: CallbackManagerConfig) -> Self {
        Self {
            config,
            callbacks: HashMap::new(),
            names: HashMap::new(),
            next_key: 0,
            next_subscriber: 0,
        }
    }

    pub fn find_callback(&self, name: &str) -> Option<CallbackKey> {
        self.names.get(name).copied()
    }

    /// Number of live callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Attaches a subscriber, returning `None` if the callback does not exist
    /// or is executing
    pub fn subscribe<F>(&mut self, key: CallbackKey, subscriber: F) -> Option<SubscriberId>
    where
        F: FnMut(&mut ScriptContext) -> Result<(), ScriptError> + 'static,
    {
        let entry = self.callbacks.get_mut(&key)?;
        let callback = entry.attached.as_mut()?;
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        callback.subscribers.push((id, Box::new(subscriber)));
        entry.function_count = callback.subscribers.len();
        Some(id)
    }

    /// Detaches a subscriber. Returns false if it was not attached.
    pub fn unsubscribe(&mut self, key: CallbackKey, id: SubscriberId) -> bool {
        let Some(entry) = self.callbacks.get_mut(&key) else {
            return false;
        };
        let Some(callback) = entry.attached.as_mut() else {
            return false;
        };
        callback.subscribers.retain(|(existing, _)| *existing != id);
        let removed = callback.subscribers.len() != entry.function_count;
        entry.function_count = callback.subscribers.len();
        removed
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new(CallbackManagerConfig::default())
    }
}

impl CallbackRegistry for CallbackManager {
    type Invocation = CallbackInvocation;

    fn create_callback(&mut self, name: &str) -> Result<CallbackKey, CallbackError> {
        if let Some(key) = self.names.get(name) {
            return Ok(*key);
        }
        if self.callbacks.len() >= self.config.max_callbacks {
            return Err(CallbackError::Exhausted {
                name: name.to_string(),
                capacity: self.config.max_callbacks,
            });
        }

        let key = CallbackKey::new(self.next_key);
        self.next_key += 1;
        self.callbacks.insert(
            key,
            CallbackEntry {
                name: name.to_string(),
                function_count: 0,
                attached: Some(CallbackInvocation::new(name)),
            },
        );
        self.names.insert(name.to_string(), key);
        Ok(key)
    }

    fn release_callback(&mut self, key: CallbackKey) {
        if let Some(entry) = self.callbacks.remove(&key) {
            self.names.remove(&entry.name);
        }
    }

    fn function_count(&self, key: CallbackKey) -> usize {
        self.callbacks
            .get(&key)
            .map_or(0, |entry| entry.function_count)
    }

    fn callback_name(&self, key: CallbackKey) -> Option<&str> {
        self.callbacks.get(&key).map(|entry| entry.name.as_str())
    }

    fn script_context(&mut self, key: CallbackKey) -> Option<&mut ScriptContext> {
        self.callbacks
            .get_mut(&key)
            .and_then(|entry| entry.attached.as_mut())
            .map(|callback| &mut callback.context)
    }

    fn begin_invocation(&mut self, key: CallbackKey) -> Result<CallbackInvocation, ScriptError> {
        let Some(entry) = self.callbacks.get_mut(&key) else {
            return Err(ScriptError::CallbackNotFound { key: key.to_u32() });
        };
        entry
            .attached
            .take()
            .ok_or_else(|| ScriptError::AlreadyExecuting {
                callback: entry.name.clone(),
            })
    }

    fn end_invocation(&mut self, key: CallbackKey, invocation: CallbackInvocation) {
        match self.callbacks.get_mut(&key) {
            Some(entry) if entry.attached.is_none() => entry.attached = Some(invocation),
            _ => debug!("Dropped invocation of released callback '{}'", invocation.name),
        }
    }
}
