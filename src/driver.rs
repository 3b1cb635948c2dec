//! Electrical driver for the matrix pins
//!
//! The pins are the only hardware the crate touches. Implement
//! [`MatrixPins`] for a board to plug the scheduler into it.

use crate::pin_map::{Pin, PinPair};

/// Abstract matrix pin bank
///
/// Implementations must be callable from interrupt context: no blocking,
/// no allocation. The scheduler guarantees that at most one pair is driven
/// at a time by calling [`all_off`](MatrixPins::all_off) before switching.
pub trait MatrixPins {
    /// Configure the pin as a push-pull output and drive it high
    fn drive_high(&mut self, pin: Pin);

    /// Configure the pin as a push-pull output and drive it low
    fn drive_low(&mut self, pin: Pin);

    /// Float the pin (high impedance input)
    fn tri_state(&mut self, pin: Pin);

    /// Float every matrix pin
    ///
    /// This is the safe state. The default visits the seven pins in turn;
    /// boards that can reconfigure the whole port with one register write
    /// should override it.
    fn all_off(&mut self) {
        for pin in Pin::ALL {
            self.tri_state(pin);
        }
    }
}

impl<P: MatrixPins + ?Sized> MatrixPins for &mut P {
    fn drive_high(&mut self, pin: Pin) {
        (**self).drive_high(pin);
    }

    fn drive_low(&mut self, pin: Pin) {
        (**self).drive_low(pin);
    }

    fn tri_state(&mut self, pin: Pin) {
        (**self).tri_state(pin);
    }

    fn all_off(&mut self) {
        (**self).all_off();
    }
}

/// Forward-bias one LED: anode high, cathode low
#[inline]
pub(crate) fn light<P: MatrixPins>(pins: &mut P, pair: PinPair) {
    pins.drive_high(pair.anode);
    pins.drive_low(pair.cathode);
}

/// Float every pin
#[inline]
pub(crate) fn extinguish<P: MatrixPins>(pins: &mut P) {
    pins.all_off();
}
