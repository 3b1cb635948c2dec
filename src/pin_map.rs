//! LED index to pin pair mapping
//!
//! Seven matrix pins give 7 × 6 = 42 ordered (anode, cathode) pairs, one per
//! LED. The table below follows the board layout: LEDs come in back-to-back
//! pairs that share the same two pins with opposite polarity.

/// Number of bidirectional pins wired to the matrix
pub const PIN_COUNT: usize = 7;

/// Number of LEDs in the matrix
pub const LED_COUNT: usize = PIN_COUNT * (PIN_COUNT - 1);

/// Logical matrix pin (`0..PIN_COUNT`)
///
/// Boards translate logical pins to physical GPIOs in their
/// [`MatrixPins`](crate::MatrixPins) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    /// Create a pin, returns `None` if `index` is not a matrix pin
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PIN_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Logical index of the pin
    pub const fn index(self) -> u8 {
        self.0
    }

    /// All matrix pins in order
    pub const ALL: [Pin; PIN_COUNT] = [Pin(0), Pin(1), Pin(2), Pin(3), Pin(4), Pin(5), Pin(6)];
}

/// The two pins that light one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinPair {
    /// Pin driven high
    pub anode: Pin,
    /// Pin driven low
    pub cathode: Pin,
}

const fn pair(anode: u8, cathode: u8) -> PinPair {
    PinPair {
        anode: Pin(anode),
        cathode: Pin(cathode),
    }
}

/// Pin pair for every LED, indexed by LED number
#[rustfmt::skip]
pub const MATRIX: [PinPair; LED_COUNT] = [
    pair(6, 0), pair(0, 6), pair(5, 0), pair(0, 5), pair(4, 0), pair(0, 4),
    pair(3, 0), pair(0, 3), pair(2, 0), pair(0, 2), pair(1, 0), pair(0, 1),
    pair(6, 1), pair(1, 6), pair(5, 1), pair(1, 5), pair(4, 1), pair(1, 4),
    pair(3, 1), pair(1, 3), pair(2, 1), pair(1, 2), pair(6, 2), pair(2, 6),
    pair(5, 2), pair(2, 5), pair(4, 2), pair(2, 4), pair(3, 2), pair(2, 3),
    pair(6, 3), pair(3, 6), pair(5, 3), pair(3, 5), pair(4, 3), pair(3, 4),
    pair(6, 4), pair(4, 6), pair(5, 4), pair(4, 5), pair(6, 5), pair(5, 6),
];

/// Look up the pins of an LED
///
/// Returns `None` for indexes outside the matrix; callers treat that as a
/// no-op and never touch the pins.
#[inline]
pub const fn lookup(led: u8) -> Option<PinPair> {
    if (led as usize) < LED_COUNT {
        Some(MATRIX[led as usize])
    } else {
        None
    }
}

/// Find the LED lit by a pin pair
pub fn find_led(pins: PinPair) -> Option<u8> {
    MATRIX
        .iter()
        .position(|candidate| *candidate == pins)
        .and_then(|index| u8::try_from(index).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pair_is_bipolar() {
        for led in 0..LED_COUNT as u8 {
            let pins = lookup(led).unwrap();
            assert_ne!(pins.anode, pins.cathode, "LED {led}");
        }
    }

    #[test]
    fn pairs_are_distinct() {
        for (i, a) in MATRIX.iter().enumerate() {
            for b in &MATRIX[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn out_of_range_has_no_pins() {
        assert_eq!(lookup(42), None);
        assert_eq!(lookup(u8::MAX), None);
        assert_eq!(Pin::new(7), None);
    }

    #[test]
    fn reverse_lookup() {
        for led in 0..LED_COUNT as u8 {
            assert_eq!(find_led(lookup(led).unwrap()), Some(led));
        }
        let shorted = PinPair {
            anode: Pin::ALL[3],
            cathode: Pin::ALL[3],
        };
        assert_eq!(find_led(shorted), None);
    }
}
