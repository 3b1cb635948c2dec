//! Enabled-LED bitmask
//!
//! Two 32-bit words: bit `i` of word 0 is LED `i` for `i < 32`, bit
//! `i - 32` of word 1 is LED `i` for `32 <= i < 42`. Bits past LED 41 are
//! always zero.

use heapless::Vec;

use crate::pin_map::LED_COUNT;

/// Number of 32-bit words in a mask
pub const MASK_WORDS: usize = LED_COUNT.div_ceil(32);

/// Number of bytes in the little-endian encoding of a mask
pub const MASK_BYTES: usize = MASK_WORDS * 4;

const TAIL_BITS: usize = LED_COUNT % 32;
const TAIL_MASK: u32 = if TAIL_BITS == 0 {
    u32::MAX
} else {
    (1 << TAIL_BITS) - 1
};

/// Set of LEDs that should appear lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct LedMask {
    words: [u32; MASK_WORDS],
}

impl LedMask {
    /// Mask with every LED off
    pub const EMPTY: Self = Self {
        words: [0; MASK_WORDS],
    };

    /// Mask with every LED on
    pub const FULL: Self = Self {
        words: [u32::MAX, TAIL_MASK],
    };

    /// Build a mask from raw words, dropping bits past the last LED
    pub const fn from_words(words: [u32; MASK_WORDS]) -> Self {
        Self {
            words: [words[0], words[1] & TAIL_MASK],
        }
    }

    /// Raw words of the mask
    pub const fn words(self) -> [u32; MASK_WORDS] {
        self.words
    }

    /// Encode as little-endian words
    pub fn to_le_bytes(self) -> [u8; MASK_BYTES] {
        let mut bytes = [0; MASK_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Decode little-endian words, dropping bits past the last LED
    pub fn from_le_bytes(bytes: [u8; MASK_BYTES]) -> Self {
        let mut words = [0; MASK_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            let mut raw = [0; 4];
            raw.copy_from_slice(chunk);
            *word = u32::from_le_bytes(raw);
        }
        Self::from_words(words)
    }

    /// Mask with only `led` on, empty if `led` is out of range
    pub const fn single(led: u8) -> Self {
        let mut mask = Self::EMPTY;
        if (led as usize) < LED_COUNT {
            mask.words[led as usize / 32] = 1 << (led % 32);
        }
        mask
    }

    /// Check if `led` is on; out of range LEDs are always off
    #[inline]
    pub const fn get(self, led: u8) -> bool {
        if (led as usize) >= LED_COUNT {
            return false;
        }
        self.words[led as usize / 32] & (1 << (led % 32)) != 0
    }

    /// Turn `led` on or off, out of range LEDs are ignored
    #[inline]
    pub fn set(&mut self, led: u8, on: bool) {
        if (led as usize) >= LED_COUNT {
            return;
        }
        let bit = 1 << (led % 32);
        let word = &mut self.words[led as usize / 32];
        if on {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Number of LEDs that are on
    pub const fn count(self) -> u8 {
        // at most 42, always fits
        #[allow(clippy::cast_possible_truncation)]
        {
            (self.words[0].count_ones() + self.words[1].count_ones()) as u8
        }
    }

    /// Check if no LED is on
    pub const fn is_empty(self) -> bool {
        self.words[0] == 0 && self.words[1] == 0
    }

    /// Indexes of the LEDs that are on, ascending
    pub fn indices(self) -> Vec<u8, LED_COUNT> {
        let mut out = Vec::new();
        for led in 0..LED_COUNT as u8 {
            if self.get(led) {
                // capacity equals the LED count
                let _ = out.push(led);
            }
        }
        out
    }
}

impl FromIterator<u8> for LedMask {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for led in iter {
            mask.set(led, true);
        }
        mask
    }
}
