mod bridge_config;
mod bridge_manager;

pub use bridge_config::{
    BridgeConfig, CallbackNames, ON_ENTITY_CHECK_TRANSMIT, ON_ENTITY_CREATED, ON_ENTITY_DELETED,
    ON_ENTITY_PARENT_CHANGED, ON_ENTITY_SPAWNED,
};
pub use bridge_manager::{BridgeCallbacks, BridgeManager};
