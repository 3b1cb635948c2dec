//! Breathing brightness ramp
//!
//! Produces brightness levels rather than masks: up from 0 to 255, back down
//! to 1, repeat. Feed the levels to
//! [`Charlieplex::set_brightness`](crate::Charlieplex::set_brightness).

use crate::gamma::{self, LevelAdjuster};

/// Levels in one full up-and-down cycle
pub const BREATHE_CYCLE: u16 = 510;

/// Triangle-wave brightness source
#[derive(Debug, Clone, Default)]
pub struct Breathe {
    phase: u16,
    adjust: Option<LevelAdjuster>,
}

impl Breathe {
    /// Linear ramp
    pub const fn new() -> Self {
        Self {
            phase: 0,
            adjust: None,
        }
    }

    /// Ramp that looks linear to the eye
    pub const fn perceptual() -> Self {
        Self {
            phase: 0,
            adjust: Some(gamma::correct),
        }
    }

    /// Apply a custom level adjustment
    #[must_use]
    pub const fn with_adjuster(mut self, adjust: LevelAdjuster) -> Self {
        self.adjust = Some(adjust);
        self
    }

    /// Next brightness level
    pub fn next_level(&mut self) -> u8 {
        let raw = if self.phase <= 255 {
            self.phase
        } else {
            BREATHE_CYCLE - self.phase
        };
        self.phase = (self.phase + 1) % BREATHE_CYCLE;

        #[allow(clippy::cast_possible_truncation)]
        let level = raw as u8;
        match self.adjust {
            Some(adjust) => adjust(level),
            None => level,
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0;
    }
}

impl Iterator for Breathe {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_level())
    }
}
