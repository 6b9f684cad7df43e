use crate::types::RecipientSlot;

use super::bit_vec::TransmitBitVec;

/// One recipient's entry in a transmit-check batch.
///
/// The host owns the record; the bridge borrows it for a single check and only
/// ever clears bits in the returned bitmap.
pub trait TransmitRecord {
    /// The recipient this record will be sent to, `None` if the host gave an
    /// invalid slot
    fn recipient(&self) -> Option<RecipientSlot>;

    /// The recipient's visibility bitmap for this frame
    fn transmit_bits(&mut self) -> Option<&mut TransmitBitVec>;
}

impl<T: TransmitRecord + ?Sized> TransmitRecord for &mut T {
    fn recipient(&self) -> Option<RecipientSlot> {
        (**self).recipient()
    }

    fn transmit_bits(&mut self) -> Option<&mut TransmitBitVec> {
        (**self).transmit_bits()
    }
}

/// Owned transmit record, for hosts that build their batches in Rust
#[derive(Clone, Debug)]
pub struct TransmitInfo {
    recipient: RecipientSlot,
    bits: TransmitBitVec,
}

impl TransmitInfo {
    pub fn new(recipient: u16, bits: TransmitBitVec) -> Self {
        Self {
            recipient: RecipientSlot::new(recipient),
            bits,
        }
    }

    pub fn bits(&self) -> &TransmitBitVec {
        &self.bits
    }

    pub fn into_bits(self) -> TransmitBitVec {
        self.bits
    }
}

impl TransmitRecord for TransmitInfo {
    fn recipient(&self) -> Option<RecipientSlot> {
        Some(self.recipient)
    }

    fn transmit_bits(&mut self) -> Option<&mut TransmitBitVec> {
        Some(&mut self.bits)
    }
}

/// Bumped whenever the host changes the layout of its check-transmit record.
/// Any bump is a breaking change for the bridge.
pub const RAW_TRANSMIT_INFO_LAYOUT_VERSION: u32 = 1;

const RAW_TRANSMIT_INFO_RESERVED: usize = 552;

/// Shadow of the host's check-transmit record.
///
/// Layout (version 1):
///
/// | field          | type                   | offset (64-bit) |
/// |----------------|------------------------|-----------------|
/// | transmit_edict | `*mut TransmitBitVec`  | 0               |
/// | reserved       | `[u8; 552]`            | 8               |
/// | client_slot    | `i32`                  | 560             |
///
/// Only the two named fields are read; everything in between is opaque host
/// state and is never touched.
#[repr(C)]
pub struct RawTransmitInfo {
    transmit_edict: *mut TransmitBitVec,
    _reserved: [u8; RAW_TRANSMIT_INFO_RESERVED],
    client_slot: i32,
}

impl RawTransmitInfo {
    /// Builds a record the way the host lays it out.
    ///
    /// # Safety
    ///
    /// `transmit_edict` must be null or point to a bitmap that stays valid and
    /// unaliased for as long as this record is used.
    pub unsafe fn new(transmit_edict: *mut TransmitBitVec, client_slot: i32) -> Self {
        Self {
            transmit_edict,
            _reserved: [0; RAW_TRANSMIT_INFO_RESERVED],
            client_slot,
        }
    }

    /// Reinterprets a host pointer as a record.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live host record with layout version
    /// [`RAW_TRANSMIT_INFO_LAYOUT_VERSION`], valid and unaliased for `'a`. The
    /// same contract applies to the bitmap pointer stored inside it.
    pub unsafe fn from_host_ptr<'a>(ptr: *mut RawTransmitInfo) -> Option<&'a mut RawTransmitInfo> {
        ptr.as_mut()
    }
}

impl TransmitRecord for RawTransmitInfo {
    fn recipient(&self) -> Option<RecipientSlot> {
        RecipientSlot::from_host(self.client_slot)
    }

    fn transmit_bits(&mut self) -> Option<&mut TransmitBitVec> {
        // SAFETY: upheld by the constructors' contracts
        unsafe { self.transmit_edict.as_mut() }
    }
}
