use std::fmt;

/// Number of entity slots addressable by a transmit bitmap
pub const TRANSMIT_BIT_CAPACITY: usize = 16384;

const WORD_BITS: usize = u32::BITS as usize;
const WORD_COUNT: usize = TRANSMIT_BIT_CAPACITY / WORD_BITS;

/// Result of clearing a single bit in a [`TransmitBitVec`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The bit was set and is now clear
    Cleared,
    /// The bit was already clear, nothing changed
    AlreadyClear,
    /// The index lies outside the bitmap, nothing changed
    OutOfRange,
}

/// Per-recipient visibility bitmap: bit `i` set means the entity with dense
/// index `i` is serialized to that recipient this frame.
///
/// Stored as 32-bit words so the layout matches the host's own bit vector.
#[repr(C)]
#[derive(Clone, PartialEq, Eq)]
pub struct TransmitBitVec {
    words: [u32; WORD_COUNT],
}

impl TransmitBitVec {
    /// Creates a bitmap with every bit clear
    pub fn new() -> Self {
        Self {
            words: [0; WORD_COUNT],
        }
    }

    /// Creates a bitmap with every bit set
    pub fn full() -> Self {
        Self {
            words: [u32::MAX; WORD_COUNT],
        }
    }

    pub const fn capacity(&self) -> usize {
        TRANSMIT_BIT_CAPACITY
    }

    fn locate(index: usize) -> Option<(usize, u32)> {
        if index >= TRANSMIT_BIT_CAPACITY {
            return None;
        }
        Some((index / WORD_BITS, 1u32 << (index % WORD_BITS)))
    }

    /// Returns true if the bit is set. Out-of-range indices read as clear.
    pub fn is_bit_set(&self, index: usize) -> bool {
        match Self::locate(index) {
            Some((word, mask)) => self.words[word] & mask != 0,
            None => false,
        }
    }

    /// Sets a bit, returning false if the index is out of range.
    ///
    /// Only the host side marks entities visible; the bridge itself never calls this.
    pub fn set(&mut self, index: usize) -> bool {
        let Some((word, mask)) = Self::locate(index) else {
            return false;
        };
        self.words[word] |= mask;
        true
    }

    /// Clears a bit if it is set
    pub fn clear(&mut self, index: usize) -> ClearOutcome {
        let Some((word, mask)) = Self::locate(index) else {
            return ClearOutcome::OutOfRange;
        };
        if self.words[word] & mask == 0 {
            return ClearOutcome::AlreadyClear;
        }
        self.words[word] &= !mask;
        ClearOutcome::Cleared
    }

    pub fn count_set(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Iterates the indices of every set bit in ascending order
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, word)| {
                let word = *word;
                (0..WORD_BITS)
                    .filter(move |bit| word & (1u32 << bit) != 0)
                    .map(move |bit| word_index * WORD_BITS + bit)
            })
    }
}

impl Default for TransmitBitVec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransmitBitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmitBitVec")
            .field("set", &self.count_set())
            .field("capacity", &TRANSMIT_BIT_CAPACITY)
            .finish()
    }
}
