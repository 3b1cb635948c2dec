use crate::mask::LedMask;

/// Mutations that can be queued for the matrix
///
/// Each variant maps onto one [`Charlieplex`](crate::Charlieplex) method;
/// see [`Charlieplex::apply`](crate::Charlieplex::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set PWM brightness
    SetBrightness(u8),
    /// Turn a single LED on or off in the mask
    SetLed { led: u8, on: bool },
    /// Overwrite the whole mask
    ReplaceMask(LedMask),
    /// Turn every LED off in the mask
    ClearAll,
    /// Turn every LED on in the mask
    SetAll,
    /// Install a mask and start multiplexing
    EnableMultiplex(LedMask),
    /// Stop multiplexing and float the pins
    DisableMultiplex,
    /// Drive one LED directly, bypassing the mask
    DirectDrive { led: u8, on: bool },
    /// Switch between the 256 and 64 tick PWM periods
    SetFastPwm(bool),
    /// Float every pin and go idle
    Shutdown,
}
