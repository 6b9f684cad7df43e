use std::collections::HashSet;

use crate::BridgeError;

pub const ON_ENTITY_SPAWNED: &str = "OnEntitySpawned";
pub const ON_ENTITY_CREATED: &str = "OnEntityCreated";
pub const ON_ENTITY_DELETED: &str = "OnEntityDeleted";
pub const ON_ENTITY_PARENT_CHANGED: &str = "OnEntityParentChanged";
pub const ON_ENTITY_CHECK_TRANSMIT: &str = "OnEntityCheckTransmit";

/// Names under which the bridge registers its five callbacks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackNames {
    pub entity_spawned: String,
    pub entity_created: String,
    pub entity_deleted: String,
    pub entity_parent_changed: String,
    pub entity_check_transmit: String,
}

impl CallbackNames {
    /// Names in creation order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            &self.entity_spawned,
            &self.entity_created,
            &self.entity_deleted,
            &self.entity_parent_changed,
            &self.entity_check_transmit,
        ]
        .into_iter()
        .map(String::as_str)
    }

    /// Every callback needs its own name, otherwise two handles would alias
    /// one registry entry and be released twice
    pub fn validate(&self) -> Result<(), BridgeError> {
        let mut seen = HashSet::new();
        for name in self.iter() {
            if !seen.insert(name) {
                return Err(BridgeError::DuplicateCallbackName {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for CallbackNames {
    fn default() -> Self {
        Self {
            entity_spawned: ON_ENTITY_SPAWNED.to_string(),
            entity_created: ON_ENTITY_CREATED.to_string(),
            entity_deleted: ON_ENTITY_DELETED.to_string(),
            entity_parent_changed: ON_ENTITY_PARENT_CHANGED.to_string(),
            entity_check_transmit: ON_ENTITY_CHECK_TRANSMIT.to_string(),
        }
    }
}

/// Contains Config properties which will be used by the Bridge
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Names of the callbacks scripts subscribe to
    pub callback_names: CallbackNames,
    /// Log a warning when a script asks to hide an entity index the bitmap
    /// cannot address. The index is discarded either way.
    pub warn_on_discarded_index: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            callback_names: CallbackNames::default(),
            warn_on_discarded_index: true,
        }
    }
}
