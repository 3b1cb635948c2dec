//! Pattern producers
//!
//! A pattern yields one [`LedMask`] per call and knows nothing about the
//! scheduler's timing; install its frames with
//! [`Charlieplex::replace_bitmask`](crate::Charlieplex::replace_bitmask) or
//! let an [`Animator`](crate::Animator) pace it.

mod breathe;
mod chase;
mod sparkle;
mod twinkle;

pub use breathe::{BREATHE_CYCLE, Breathe};
pub use chase::Chase;
pub use sparkle::{MAX_PROBES, ProbeOutcome, Sparkle, SparkleStep};
pub use twinkle::{TWINKLE_FRAME_COUNT, TWINKLE_FRAMES, Twinkle};

use rand_core::RngCore;

use crate::mask::LedMask;

const PATTERN_NAME_SOLID: &str = "solid";
const PATTERN_NAME_SPARKLE: &str = "sparkle";
const PATTERN_NAME_TWINKLE: &str = "twinkle";
const PATTERN_NAME_CHASE: &str = "chase";

const PATTERN_ID_SOLID: u8 = 0;
const PATTERN_ID_SPARKLE: u8 = 1;
const PATTERN_ID_TWINKLE: u8 = 2;
const PATTERN_ID_CHASE: u8 = 3;

/// LEDs kept lit by a sparkle created through [`PatternId::to_slot`]
pub const DEFAULT_SPARKLE_COUNT: u8 = 8;

/// Change probability of a sparkle created through [`PatternId::to_slot`]
pub const DEFAULT_SPARKLE_PROBABILITY: u8 = 128;

pub trait Pattern {
    /// Produce the next frame
    fn next_frame(&mut self) -> LedMask;

    /// Reset pattern state
    fn reset(&mut self) {}
}

/// Pattern that always returns the same frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solid(pub LedMask);

impl Pattern for Solid {
    fn next_frame(&mut self) -> LedMask {
        self.0
    }
}

/// Known pattern ids that can be requested
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    Solid = PATTERN_ID_SOLID,
    Sparkle = PATTERN_ID_SPARKLE,
    Twinkle = PATTERN_ID_TWINKLE,
    Chase = PATTERN_ID_CHASE,
}

impl PatternId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_SOLID => Self::Solid,
            PATTERN_ID_SPARKLE => Self::Sparkle,
            PATTERN_ID_TWINKLE => Self::Twinkle,
            PATTERN_ID_CHASE => Self::Chase,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => PATTERN_NAME_SOLID,
            Self::Sparkle => PATTERN_NAME_SPARKLE,
            Self::Twinkle => PATTERN_NAME_TWINKLE,
            Self::Chase => PATTERN_NAME_CHASE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_SOLID => Some(Self::Solid),
            PATTERN_NAME_SPARKLE => Some(Self::Sparkle),
            PATTERN_NAME_TWINKLE => Some(Self::Twinkle),
            PATTERN_NAME_CHASE => Some(Self::Chase),
            _ => None,
        }
    }

    /// Build the pattern with default parameters
    ///
    /// `Solid` lights every LED.
    pub fn to_slot<R: RngCore>(self, rng: R) -> PatternSlot<R> {
        match self {
            Self::Solid => PatternSlot::Solid(Solid(LedMask::FULL)),
            Self::Sparkle => PatternSlot::Sparkle(Sparkle::new(
                rng,
                DEFAULT_SPARKLE_COUNT,
                DEFAULT_SPARKLE_PROBABILITY,
            )),
            Self::Twinkle => PatternSlot::Twinkle(Twinkle::new(rng)),
            Self::Chase => PatternSlot::Chase(Chase::new()),
        }
    }
}

/// Pattern slot - enum containing all built-in patterns
#[derive(Debug, Clone)]
pub enum PatternSlot<R> {
    Solid(Solid),
    Sparkle(Sparkle<R>),
    Twinkle(Twinkle<R>),
    Chase(Chase),
}

impl<R: RngCore> PatternSlot<R> {
    /// Get the pattern ID for external observation
    pub fn id(&self) -> PatternId {
        match self {
            Self::Solid(_) => PatternId::Solid,
            Self::Sparkle(_) => PatternId::Sparkle,
            Self::Twinkle(_) => PatternId::Twinkle,
            Self::Chase(_) => PatternId::Chase,
        }
    }
}

impl<R: RngCore> Pattern for PatternSlot<R> {
    fn next_frame(&mut self) -> LedMask {
        match self {
            Self::Solid(pattern) => pattern.next_frame(),
            Self::Sparkle(pattern) => pattern.next_frame(),
            Self::Twinkle(pattern) => pattern.next_frame(),
            Self::Chase(pattern) => pattern.next_frame(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Solid(pattern) => Pattern::reset(pattern),
            Self::Sparkle(pattern) => Pattern::reset(pattern),
            Self::Twinkle(pattern) => Pattern::reset(pattern),
            Self::Chase(pattern) => Pattern::reset(pattern),
        }
    }
}
