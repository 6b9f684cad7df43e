use crate::types::EntityIndex;

use super::bit_vec::{ClearOutcome, TransmitBitVec};

/// Tally of one override list applied to one bitmap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Bits that were set and are now clear
    pub cleared: usize,
    /// Indices whose bit was already clear
    pub already_clear: usize,
    /// Indices beyond the bitmap capacity, discarded
    pub out_of_range: usize,
}

impl ApplyOutcome {
    /// Indices that addressed a real bit, whether or not it changed
    pub fn applied(&self) -> usize {
        self.cleared + self.already_clear
    }

    pub fn merge(&mut self, other: &ApplyOutcome) {
        self.cleared += other.cleared;
        self.already_clear += other.already_clear;
        self.out_of_range += other.out_of_range;
    }
}

/// A scripted list of entities to hide from one recipient this frame.
///
/// On the wire it is a count `N` followed by `N` dense entity indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverrideList<'a> {
    indices: &'a [EntityIndex],
    declared: usize,
}

impl<'a> OverrideList<'a> {
    /// Parses a count-prefixed buffer.
    ///
    /// Returns `None` for an empty buffer or a zero count. A count larger than
    /// the values that follow is cut down to what is actually there.
    pub fn from_counted(buffer: &'a [EntityIndex]) -> Option<Self> {
        let (&count, rest) = buffer.split_first()?;
        if count == 0 {
            return None;
        }
        let declared = count as usize;
        let available = declared.min(rest.len());
        Some(Self {
            indices: &rest[..available],
            declared,
        })
    }

    pub fn indices(&self) -> &'a [EntityIndex] {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The count prefix promised more indices than the buffer held
    pub fn is_truncated(&self) -> bool {
        self.declared > self.indices.len()
    }

    pub fn declared_len(&self) -> usize {
        self.declared
    }

    /// Clears every listed bit that is currently set. Out-of-range indices are
    /// skipped; the rest of the list still applies.
    pub fn apply(&self, bits: &mut TransmitBitVec) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        for index in self.indices {
            match bits.clear(*index as usize) {
                ClearOutcome::Cleared => outcome.cleared += 1,
                ClearOutcome::AlreadyClear => outcome.already_clear += 1,
                ClearOutcome::OutOfRange => outcome.out_of_range += 1,
            }
        }
        outcome
    }
}
