//! # Entbridge Shared
//! Common functionality shared by the entbridge crates: per-recipient
//! visibility bitmaps, host transmit records, scripted override lists, and
//! the named-callback registry that script subscribers attach to.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod callback;
mod transmit;
mod types;

pub use callback::{
    context::ScriptContext,
    error::{CallbackError, ScriptError},
    invoke::Subscriber,
    manager::{CallbackInvocation, CallbackManager, CallbackManagerConfig, SubscriberId},
    registry::{CallbackKey, CallbackRegistry, Dispatch, Invocation},
    value::ScriptValue,
};
pub use transmit::{
    bit_vec::{ClearOutcome, TransmitBitVec, TRANSMIT_BIT_CAPACITY},
    override_list::{ApplyOutcome, OverrideList},
    record::{RawTransmitInfo, TransmitInfo, TransmitRecord, RAW_TRANSMIT_INFO_LAYOUT_VERSION},
};
pub use types::{EntityHandle, EntityIndex, RecipientSlot};
