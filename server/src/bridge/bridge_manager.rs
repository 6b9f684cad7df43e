use std::{cell::RefCell, rc::Rc};

use log::{info, warn};

use entbridge_shared::{CallbackKey, CallbackRegistry};

use crate::{
    host::{HookKey, ListenerKey, SharedEntitySystem, TransmitHookHost},
    listener::{EntityEventListener, ListenerCallbacks},
    transmit_filter::TransmitFilter,
    BridgeError,
};

use super::bridge_config::{BridgeConfig, CallbackNames};

/// The five callbacks a running bridge owns. Moved out and released as one
/// unit on stop, so no key outlives its registration.
#[derive(Debug)]
pub struct BridgeCallbacks {
    pub entity_spawned: CallbackKey,
    pub entity_created: CallbackKey,
    pub entity_deleted: CallbackKey,
    pub entity_parent_changed: CallbackKey,
    pub entity_check_transmit: CallbackKey,
}

impl BridgeCallbacks {
    /// Creates all five callbacks, or none of them
    fn create<R: CallbackRegistry>(
        registry: &mut R,
        names: &CallbackNames,
    ) -> Result<Self, BridgeError> {
        let mut created = Vec::with_capacity(5);
        let result = Self::try_create(registry, names, &mut created);
        if result.is_err() {
            for key in created.into_iter().rev() {
                registry.release_callback(key);
            }
        }
        result
    }

    fn try_create<R: CallbackRegistry>(
        registry: &mut R,
        names: &CallbackNames,
        created: &mut Vec<CallbackKey>,
    ) -> Result<Self, BridgeError> {
        let mut create = |name: &str| -> Result<CallbackKey, BridgeError> {
            let key = registry
                .create_callback(name)
                .map_err(|source| BridgeError::CallbackCreation {
                    name: name.to_string(),
                    source,
                })?;
            created.push(key);
            Ok(key)
        };

        Ok(Self {
            entity_spawned: create(names.entity_spawned.as_str())?,
            entity_created: create(names.entity_created.as_str())?,
            entity_deleted: create(names.entity_deleted.as_str())?,
            entity_parent_changed: create(names.entity_parent_changed.as_str())?,
            entity_check_transmit: create(names.entity_check_transmit.as_str())?,
        })
    }

    fn release<R: CallbackRegistry>(self, registry: &mut R) {
        for key in [
            self.entity_check_transmit,
            self.entity_parent_changed,
            self.entity_deleted,
            self.entity_created,
            self.entity_spawned,
        ] {
            registry.release_callback(key);
        }
    }

    fn listener_callbacks(&self) -> ListenerCallbacks {
        ListenerCallbacks {
            spawned: self.entity_spawned,
            created: self.entity_created,
            deleted: self.entity_deleted,
            parent_changed: self.entity_parent_changed,
        }
    }
}

struct ListenerRegistration {
    entity_system: SharedEntitySystem,
    key: ListenerKey,
}

/// Owns the bridge lifecycle: callback creation and release, the transmit
/// hook, and the entity listener registration.
///
/// Every acquisition has exactly one matching release in [`stop`](Self::stop),
/// performed in reverse order. `stop` is safe from any partial state, and a
/// manager dropped while started stops itself.
pub struct BridgeManager<R: CallbackRegistry + 'static, H: TransmitHookHost> {
    config: BridgeConfig,
    registry: Rc<RefCell<R>>,
    transmit_host: Rc<RefCell<H>>,
    callbacks: Option<BridgeCallbacks>,
    transmit_hook: Option<HookKey>,
    listener: Option<ListenerRegistration>,
}

impl<R: CallbackRegistry + 'static, H: TransmitHookHost> BridgeManager<R, H> {
    pub fn new(config: BridgeConfig, registry: Rc<RefCell<R>>, transmit_host: Rc<RefCell<H>>) -> Self {
        Self {
            config,
            registry,
            transmit_host,
            callbacks: None,
            transmit_hook: None,
            listener: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.callbacks.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    pub fn callbacks(&self) -> Option<&BridgeCallbacks> {
        self.callbacks.as_ref()
    }

    /// Creates the five callbacks and installs the transmit hook.
    ///
    /// If any callback cannot be created, the ones already created are
    /// released and the hook is never installed.
    pub fn start(&mut self) -> Result<(), BridgeError> {
        if self.is_started() {
            return Err(BridgeError::AlreadyStarted);
        }
        self.config.callback_names.validate()?;

        let callbacks =
            BridgeCallbacks::create(&mut *self.registry.borrow_mut(), &self.config.callback_names)?;

        let filter = Rc::new(TransmitFilter::new(
            self.registry.clone(),
            callbacks.entity_check_transmit,
            self.config.warn_on_discarded_index,
        ));
        let hook_key = self.transmit_host.borrow_mut().install_transmit_hook(filter);

        self.transmit_hook = Some(hook_key);
        self.callbacks = Some(callbacks);

        info!("Entity bridge started");
        Ok(())
    }

    /// Registers the entity listener. Call once the host's entity system
    /// reports ready, which happens some time after `start`.
    pub fn on_entity_system_ready(
        &mut self,
        entity_system: SharedEntitySystem,
    ) -> Result<(), BridgeError> {
        let Some(callbacks) = &self.callbacks else {
            return Err(BridgeError::NotStarted {
                operation: "registering the entity listener",
            });
        };
        if self.listener.is_some() {
            return Err(BridgeError::ListenerAlreadyRegistered);
        }

        let listener = Rc::new(EntityEventListener::new(
            self.registry.clone(),
            callbacks.listener_callbacks(),
        ));
        let key = entity_system.borrow_mut().add_listener(listener);
        self.listener = Some(ListenerRegistration { entity_system, key });

        info!("Entity listener registered");
        Ok(())
    }

    /// Tears down whatever was set up: listener, then hook, then callbacks.
    /// Calling it again, or without `start`, does nothing.
    pub fn stop(&mut self) {
        if let Some(registration) = self.listener.take() {
            if !registration
                .entity_system
                .borrow_mut()
                .remove_listener(registration.key)
            {
                warn!("Entity system did not know listener {:?}", registration.key);
            }
        }

        if let Some(hook_key) = self.transmit_hook.take() {
            if !self.transmit_host.borrow_mut().remove_transmit_hook(hook_key) {
                warn!("Host did not know transmit hook {:?}", hook_key);
            }
        }

        if let Some(callbacks) = self.callbacks.take() {
            callbacks.release(&mut *self.registry.borrow_mut());
            info!("Entity bridge stopped");
        }
    }
}

impl<R: CallbackRegistry + 'static, H: TransmitHookHost> Drop for BridgeManager<R, H> {
    fn drop(&mut self) {
        self.stop();
    }
}
