//! # Entbridge Server
//! Bridges a game server's entity lifecycle notifications and per-recipient
//! transmit checks onto named script callbacks, and applies the scripts'
//! visibility overrides back onto each recipient's transmit bitmap.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use entbridge_shared::{
        CallbackError, CallbackInvocation, CallbackKey, CallbackManager, CallbackManagerConfig,
        CallbackRegistry,
        Dispatch, EntityHandle, RawTransmitInfo, RecipientSlot, ScriptContext, ScriptError,
        ScriptValue, TransmitBitVec, TransmitInfo, TransmitRecord, TRANSMIT_BIT_CAPACITY,
    };
}

mod bridge;
mod error;
pub mod host;
mod listener;
mod transmit_filter;

pub use bridge::{
    BridgeCallbacks, BridgeConfig, BridgeManager, CallbackNames, ON_ENTITY_CHECK_TRANSMIT,
    ON_ENTITY_CREATED, ON_ENTITY_DELETED, ON_ENTITY_PARENT_CHANGED, ON_ENTITY_SPAWNED,
};
pub use error::BridgeError;
pub use host::{
    EntityListener, EntitySystem, HookKey, ListenerKey, SharedEntitySystem, TransmitHook,
    TransmitHookHost,
};
pub use listener::EntityEventListener;
pub use transmit_filter::{TransmitFilter, TransmitReport};
