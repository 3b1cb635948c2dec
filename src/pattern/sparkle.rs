//! Sparkle pattern
//!
//! Keeps roughly `target_count` random LEDs lit, turning one on or off per
//! frame (with probability `change_probability / 256`) and occasionally
//! swapping a lit LED for a dark one once the target is reached.

use rand_core::RngCore;

use super::Pattern;
use crate::mask::LedMask;
use crate::pin_map::LED_COUNT;

/// Random picks tried per frame before giving up until the next frame
pub const MAX_PROBES: u8 = 10;

/// Result of a bounded search for an LED to flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The LED was flipped
    Flipped(u8),
    /// No suitable LED found within [`MAX_PROBES`] picks
    Exhausted,
}

/// What one sparkle frame did to the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkleStep {
    /// The change roll failed, the mask is untouched
    Skipped,
    /// Below target: tried to light one more LED
    Grew(ProbeOutcome),
    /// Above target: tried to darken one LED
    Shrank(ProbeOutcome),
    /// At target: one LED lit and another darkened
    Swapped { lit: u8, darkened: u8 },
    /// At target and nothing swapped
    Held,
}

/// Twinkling random field
#[derive(Debug, Clone)]
pub struct Sparkle<R> {
    rng: R,
    mask: LedMask,
    target_count: u8,
    change_probability: u8,
    frames: u32,
}

impl<R: RngCore> Sparkle<R> {
    /// Create a sparkle field seeded with `target_count` random LEDs
    ///
    /// `target_count` is clamped to the matrix size. Random picks can
    /// collide, so the initial field may hold fewer LEDs than the target;
    /// later frames fill the gap.
    pub fn new(rng: R, target_count: u8, change_probability: u8) -> Self {
        let mut sparkle = Self {
            rng,
            mask: LedMask::EMPTY,
            target_count: target_count.min(LED_COUNT as u8),
            change_probability,
            frames: 0,
        };
        sparkle.seed();
        sparkle
    }

    fn seed(&mut self) {
        self.mask = LedMask::EMPTY;
        for _ in 0..self.target_count {
            let led = self.random_led();
            self.mask.set(led, true);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn random_led(&mut self) -> u8 {
        (self.rng.next_u32() % LED_COUNT as u32) as u8
    }

    /// Pick random LEDs until one is in state `lit`, at most [`MAX_PROBES`] times
    fn probe(&mut self, lit: bool) -> Option<u8> {
        for _ in 0..MAX_PROBES {
            let led = self.random_led();
            if self.mask.get(led) == lit {
                return Some(led);
            }
        }
        None
    }

    fn flip(&mut self, lit: bool) -> ProbeOutcome {
        match self.probe(lit) {
            Some(led) => {
                self.mask.set(led, !lit);
                ProbeOutcome::Flipped(led)
            }
            None => ProbeOutcome::Exhausted,
        }
    }

    fn swap(&mut self) -> SparkleStep {
        let Some(lit) = self.probe(false) else {
            return SparkleStep::Held;
        };
        let Some(darkened) = self.probe(true) else {
            return SparkleStep::Held;
        };
        self.mask.set(lit, true);
        self.mask.set(darkened, false);
        SparkleStep::Swapped { lit, darkened }
    }

    /// Advance one frame and report what changed
    pub fn step(&mut self) -> SparkleStep {
        self.frames = self.frames.wrapping_add(1);

        #[allow(clippy::cast_possible_truncation)]
        let roll = self.rng.next_u32() as u8;
        if roll >= self.change_probability {
            return SparkleStep::Skipped;
        }

        let count = self.mask.count();
        match count.cmp(&self.target_count) {
            core::cmp::Ordering::Less => SparkleStep::Grew(self.flip(false)),
            core::cmp::Ordering::Greater => SparkleStep::Shrank(self.flip(true)),
            core::cmp::Ordering::Equal => {
                if self.rng.next_u32() & 1 == 1 {
                    self.swap()
                } else {
                    SparkleStep::Held
                }
            }
        }
    }

    /// Change the number of LEDs to converge to
    pub fn set_target_count(&mut self, target_count: u8) {
        self.target_count = target_count.min(LED_COUNT as u8);
    }

    pub const fn target_count(&self) -> u8 {
        self.target_count
    }

    pub const fn mask(&self) -> LedMask {
        self.mask
    }

    /// Frames produced since creation or the last reset
    pub const fn frames(&self) -> u32 {
        self.frames
    }
}

impl<R: RngCore> Pattern for Sparkle<R> {
    fn next_frame(&mut self) -> LedMask {
        self.step();
        self.mask
    }

    fn reset(&mut self) {
        self.frames = 0;
        self.seed();
    }
}
