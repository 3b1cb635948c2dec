//! Twinkle pattern
//!
//! Jumps between a handful of precomputed sparse frames, picking one at
//! random every call.

use rand_core::RngCore;

use super::Pattern;
use crate::mask::LedMask;

/// Number of frames in the table
pub const TWINKLE_FRAME_COUNT: usize = 10;

/// Precomputed frames, about eight LEDs each
pub const TWINKLE_FRAMES: [LedMask; TWINKLE_FRAME_COUNT] = [
    LedMask::from_words([0x8404_1021, 0x0000_0121]),
    LedMask::from_words([0x1041_0084, 0x0000_0288]),
    LedMask::from_words([0x4108_8102, 0x0000_0190]),
    LedMask::from_words([0x0410_9208, 0x0000_0141]),
    LedMask::from_words([0x0820_2414, 0x0000_0282]),
    LedMask::from_words([0x2082_0840, 0x0000_0104]),
    LedMask::from_words([0x0410_4082, 0x0000_0222]),
    LedMask::from_words([0x1041_0208, 0x0000_0148]),
    LedMask::from_words([0x4104_1020, 0x0000_0190]),
    LedMask::from_words([0x0820_8104, 0x0000_0102]),
];

/// Random choice from [`TWINKLE_FRAMES`]
#[derive(Debug, Clone)]
pub struct Twinkle<R> {
    rng: R,
    current: usize,
}

impl<R: RngCore> Twinkle<R> {
    pub fn new(mut rng: R) -> Self {
        let current = Self::pick(&mut rng);
        Self { rng, current }
    }

    fn pick(rng: &mut R) -> usize {
        rng.next_u32() as usize % TWINKLE_FRAME_COUNT
    }

    /// Index of the last frame returned
    pub const fn current(&self) -> usize {
        self.current
    }
}

impl<R: RngCore> Pattern for Twinkle<R> {
    fn next_frame(&mut self) -> LedMask {
        self.current = Self::pick(&mut self.rng);
        TWINKLE_FRAMES[self.current]
    }
}
