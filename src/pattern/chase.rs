//! Chase pattern
//!
//! A single lit LED walking through the matrix in index order. Useful as a
//! wiring check: every LED must light exactly once per lap.

use super::Pattern;
use crate::mask::LedMask;
use crate::pin_map::LED_COUNT;

#[derive(Debug, Clone, Default)]
pub struct Chase {
    position: u8,
}

impl Chase {
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Start the walk at `led`, wrapped into the matrix
    #[allow(clippy::cast_possible_truncation)]
    pub const fn starting_at(led: u8) -> Self {
        Self {
            position: (led as usize % LED_COUNT) as u8,
        }
    }

    /// LED lit by the next frame
    pub const fn position(&self) -> u8 {
        self.position
    }
}

impl Pattern for Chase {
    fn next_frame(&mut self) -> LedMask {
        let frame = LedMask::single(self.position);
        #[allow(clippy::cast_possible_truncation)]
        {
            self.position = ((usize::from(self.position) + 1) % LED_COUNT) as u8;
        }
        frame
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
