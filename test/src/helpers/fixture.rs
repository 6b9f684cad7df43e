use std::{cell::RefCell, rc::Rc};

use entbridge_server::{
    shared::{CallbackKey, ScriptContext, ScriptError},
    BridgeCallbacks, BridgeConfig, BridgeManager,
};

use super::{test_host::TestHost, tracking_registry::TrackingRegistry};

/// A bridge wired to a [`TestHost`] and a [`TrackingRegistry`]
pub struct BridgeFixture {
    pub registry: Rc<RefCell<TrackingRegistry>>,
    pub host: Rc<RefCell<TestHost>>,
    pub manager: BridgeManager<TrackingRegistry, TestHost>,
}

impl BridgeFixture {
    pub fn new() -> Self {
        Self::with_registry(TrackingRegistry::new())
    }

    pub fn with_registry(registry: TrackingRegistry) -> Self {
        let registry = Rc::new(RefCell::new(registry));
        let host = TestHost::shared();
        let manager = BridgeManager::new(BridgeConfig::default(), registry.clone(), host.clone());
        Self {
            registry,
            host,
            manager,
        }
    }

    /// Started bridge with the entity listener registered
    pub fn running() -> Self {
        let mut fixture = Self::new();
        fixture.manager.start().expect("bridge starts");
        fixture
            .manager
            .on_entity_system_ready(fixture.host.clone())
            .expect("listener registers");
        fixture
    }

    pub fn callbacks(&self) -> &BridgeCallbacks {
        self.manager.callbacks().expect("bridge is started")
    }

    pub fn subscribe<F>(&self, key: CallbackKey, subscriber: F)
    where
        F: FnMut(&mut ScriptContext) -> Result<(), ScriptError> + 'static,
    {
        self.registry
            .borrow_mut()
            .inner
            .subscribe(key, subscriber)
            .expect("callback exists");
    }
}

impl Default for BridgeFixture {
    fn default() -> Self {
        Self::new()
    }
}
