//! State shared between the timer interrupt and the mutation API
//!
//! The API layer owns a [`MultiplexState`] behind a critical-section mutex;
//! the scheduler receives it by `&mut` on every tick.

use crate::mask::LedMask;
use crate::pin_map::PinPair;

/// PWM period in normal mode, in ticks
pub const NORMAL_PWM_PERIOD: u16 = 256;

/// PWM period in fast mode, in ticks
///
/// A shorter period means the cursor advances four times as often, trading
/// dimming resolution for refresh rate.
pub const FAST_PWM_PERIOD: u16 = 64;

/// Brightness applied at power-on
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Who decides which LED is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// Nothing is selected, every pin floats
    #[default]
    Idle,
    /// The scheduler rotates through the enabled-LED mask
    Multiplex,
    /// One LED chosen by the caller, dimmed by the PWM counter
    Direct,
}

/// The LED currently applied to the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// LED index, always inside the matrix
    pub led: u8,
    /// Pins of `led`
    pub pair: PinPair,
    /// Whether the pins are currently driven
    pub driven: bool,
}

/// Multiplexing state
#[derive(Debug, Clone)]
pub struct MultiplexState {
    pub(crate) mask: LedMask,
    pub(crate) cursor: u8,
    pub(crate) brightness: u8,
    pub(crate) counter: u16,
    pub(crate) mode: DriveMode,
    pub(crate) fast_pwm: bool,
    pub(crate) selection: Option<Selection>,
}

impl Default for MultiplexState {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplexState {
    /// All off, idle, default brightness, normal PWM period
    pub const fn new() -> Self {
        Self {
            mask: LedMask::EMPTY,
            cursor: 0,
            brightness: DEFAULT_BRIGHTNESS,
            counter: 0,
            mode: DriveMode::Idle,
            fast_pwm: false,
            selection: None,
        }
    }

    /// Current PWM period in ticks
    pub const fn period(&self) -> u16 {
        if self.fast_pwm {
            FAST_PWM_PERIOD
        } else {
            NORMAL_PWM_PERIOD
        }
    }

    /// Enabled-LED mask
    pub const fn mask(&self) -> LedMask {
        self.mask
    }

    /// Next LED index the scan will probe
    pub const fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Brightness (0-255)
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// PWM counter, always below [`period`](Self::period) after a tick
    pub const fn counter(&self) -> u16 {
        self.counter
    }

    /// Current drive mode
    pub const fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Whether the short PWM period is active
    pub const fn fast_pwm(&self) -> bool {
        self.fast_pwm
    }

    /// Currently selected LED, if any
    pub const fn selection(&self) -> Option<Selection> {
        self.selection
    }
}
