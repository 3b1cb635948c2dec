//! Simulated pin bank
//!
//! Records the level of every matrix pin so host code (tests, the desktop
//! preview) can see what the scheduler does to the hardware.

use crate::driver::MatrixPins;
use crate::pin_map::{PIN_COUNT, Pin, PinPair, find_led};

/// Electrical state of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinLevel {
    /// High impedance
    #[default]
    Floating,
    /// Push-pull high
    High,
    /// Push-pull low
    Low,
}

/// [`MatrixPins`] implementation that only records pin levels
#[derive(Debug, Clone, Default)]
pub struct SimPins {
    levels: [PinLevel; PIN_COUNT],
    drive_count: u32,
    all_off_count: u32,
    max_driven: usize,
}

impl SimPins {
    pub const fn new() -> Self {
        Self {
            levels: [PinLevel::Floating; PIN_COUNT],
            drive_count: 0,
            all_off_count: 0,
            max_driven: 0,
        }
    }

    /// Level of a pin
    pub fn level(&self, pin: Pin) -> PinLevel {
        self.levels[usize::from(pin.index())]
    }

    /// Number of pins currently driven high or low
    pub fn driven_pins(&self) -> usize {
        self.levels
            .iter()
            .filter(|level| **level != PinLevel::Floating)
            .count()
    }

    /// Highest number of pins ever driven at the same time
    pub const fn max_driven(&self) -> usize {
        self.max_driven
    }

    /// Check if every pin floats
    pub fn all_floating(&self) -> bool {
        self.driven_pins() == 0
    }

    /// LED forward-biased by the current levels
    ///
    /// Returns `None` unless exactly one pin is high and one is low.
    pub fn lit_led(&self) -> Option<u8> {
        let mut anode = None;
        let mut cathode = None;
        for (pin, level) in Pin::ALL.iter().zip(self.levels) {
            match level {
                PinLevel::High if anode.is_none() => anode = Some(*pin),
                PinLevel::Low if cathode.is_none() => cathode = Some(*pin),
                PinLevel::Floating => {}
                _ => return None,
            }
        }
        find_led(PinPair {
            anode: anode?,
            cathode: cathode?,
        })
    }

    /// Number of `drive_high`/`drive_low` calls so far
    pub const fn drive_count(&self) -> u32 {
        self.drive_count
    }

    /// Number of `all_off` calls so far
    pub const fn all_off_count(&self) -> u32 {
        self.all_off_count
    }

    fn set(&mut self, pin: Pin, level: PinLevel) {
        self.levels[usize::from(pin.index())] = level;
        self.max_driven = self.max_driven.max(self.driven_pins());
    }
}

impl MatrixPins for SimPins {
    fn drive_high(&mut self, pin: Pin) {
        self.drive_count += 1;
        self.set(pin, PinLevel::High);
    }

    fn drive_low(&mut self, pin: Pin) {
        self.drive_count += 1;
        self.set(pin, PinLevel::Low);
    }

    fn tri_state(&mut self, pin: Pin) {
        self.set(pin, PinLevel::Floating);
    }

    fn all_off(&mut self) {
        self.all_off_count += 1;
        self.levels = [PinLevel::Floating; PIN_COUNT];
    }
}
