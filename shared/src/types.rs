/// Dense index of an entity within a transmit bitmap
pub type EntityIndex = u32;

/// Opaque reference to a live host entity.
///
/// Only valid for the duration of the notification in which it was received;
/// the bridge never dereferences it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityHandle(u64);

impl EntityHandle {
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// Identifies one network recipient (a connected client) for the current frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipientSlot(u16);

impl RecipientSlot {
    pub(crate) const fn new(value: u16) -> Self {
        Self(value)
    }

    pub(crate) fn from_host(value: i32) -> Option<Self> {
        u16::try_from(value).ok().map(Self)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}
