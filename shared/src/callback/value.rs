use crate::types::{EntityHandle, EntityIndex, RecipientSlot};

/// A value passed to, or returned from, a script callback
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptValue {
    Null,
    Bool(bool),
    Int(i64),
    Entity(EntityHandle),
    /// Count-prefixed buffer of dense entity indices
    IndexBuffer(Vec<EntityIndex>),
}

impl ScriptValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ScriptValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScriptValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<EntityHandle> {
        match self {
            ScriptValue::Entity(handle) => Some(*handle),
            _ => None,
        }
    }

    pub fn as_index_buffer(&self) -> Option<&[EntityIndex]> {
        match self {
            ScriptValue::IndexBuffer(buffer) => Some(buffer),
            _ => None,
        }
    }
}

impl From<EntityHandle> for ScriptValue {
    fn from(handle: EntityHandle) -> Self {
        ScriptValue::Entity(handle)
    }
}

impl From<Option<EntityHandle>> for ScriptValue {
    fn from(handle: Option<EntityHandle>) -> Self {
        match handle {
            Some(handle) => ScriptValue::Entity(handle),
            None => ScriptValue::Null,
        }
    }
}

impl From<RecipientSlot> for ScriptValue {
    fn from(slot: RecipientSlot) -> Self {
        ScriptValue::Int(i64::from(slot.get()))
    }
}

impl From<i64> for ScriptValue {
    fn from(value: i64) -> Self {
        ScriptValue::Int(value)
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        ScriptValue::Bool(value)
    }
}

impl From<Vec<EntityIndex>> for ScriptValue {
    fn from(buffer: Vec<EntityIndex>) -> Self {
        ScriptValue::IndexBuffer(buffer)
    }
}
