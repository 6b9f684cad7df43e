//! Interfaces the host implements for the bridge to plug into.

use std::{cell::RefCell, rc::Rc};

use entbridge_shared::{EntityHandle, TransmitRecord};

/// Receives entity lifecycle notifications from the host
pub trait EntityListener {
    fn on_entity_spawned(&self, entity: EntityHandle);
    fn on_entity_created(&self, entity: EntityHandle);
    fn on_entity_deleted(&self, entity: EntityHandle);
    fn on_entity_parent_changed(&self, entity: EntityHandle, new_parent: Option<EntityHandle>);
}

/// Identifies a listener registration with an [`EntitySystem`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

impl ListenerKey {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

/// The host's entity subsystem
pub trait EntitySystem {
    fn add_listener(&mut self, listener: Rc<dyn EntityListener>) -> ListenerKey;

    /// Returns false if the key was not registered
    fn remove_listener(&mut self, key: ListenerKey) -> bool;
}

/// Called by the host once per network-build pass with one record per recipient.
///
/// Implementations may only clear bits in the records' bitmaps and must
/// not panic.
pub trait TransmitHook {
    fn on_check_transmit(&self, records: &mut [&mut dyn TransmitRecord]);
}

/// Identifies an installed [`TransmitHook`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookKey(u64);

impl HookKey {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

/// The host's interception point for transmit checks
pub trait TransmitHookHost {
    fn install_transmit_hook(&mut self, hook: Rc<dyn TransmitHook>) -> HookKey;

    /// Returns false if the key was not installed
    fn remove_transmit_hook(&mut self, key: HookKey) -> bool;
}

/// Shared handle to a host entity system
pub type SharedEntitySystem = Rc<RefCell<dyn EntitySystem>>;
