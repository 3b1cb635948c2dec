//! Timer tick and refresh rate arithmetic
//!
//! All scheduler reasoning is in ticks. These helpers translate ticks into
//! wall-clock figures for a given timer configuration.

use embassy_time::Duration;

use crate::state::{FAST_PWM_PERIOD, NORMAL_PWM_PERIOD};

/// Tick period of the reference board: 48 MHz / 48 prescaler / 20 reload
pub const TICK_PERIOD: Duration = Duration::from_micros(20);

/// Hardware timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Time between two scheduler ticks
    pub tick: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { tick: TICK_PERIOD }
    }
}

impl TimerConfig {
    /// Configuration for a timer with the given input clock, prescaler and reload
    ///
    /// Returns `None` if the divider is zero or the resulting tick is
    /// shorter than the time driver resolution.
    pub fn from_clock(clock_hz: u32, prescaler: u32, reload: u32) -> Option<Self> {
        let divider = u64::from(prescaler).checked_mul(u64::from(reload))?;
        if divider == 0 || clock_hz == 0 {
            return None;
        }
        let tick_hz = u64::from(clock_hz) / divider;
        if tick_hz == 0 {
            return None;
        }
        let micros = 1_000_000 / tick_hz;
        if micros == 0 {
            return None;
        }
        Some(Self {
            tick: Duration::from_micros(micros),
        })
    }

    /// Tick frequency in hertz
    pub fn tick_hz(self) -> u64 {
        1_000_000 / self.tick.as_micros().max(1)
    }

    /// Length of one LED slot (one PWM period)
    pub fn slot_duration(self, fast_pwm: bool) -> Duration {
        self.tick * u32::from(pwm_period(fast_pwm))
    }

    /// LED slots per second
    pub fn slot_rate_hz(self, fast_pwm: bool) -> u64 {
        self.tick_hz() / u64::from(pwm_period(fast_pwm))
    }

    /// How often each of `enabled` LEDs gets its slot, in hertz
    ///
    /// With no LED enabled nothing is refreshed and the result is 0.
    pub fn refresh_rate_hz(self, fast_pwm: bool, enabled: u8) -> u64 {
        if enabled == 0 {
            return 0;
        }
        self.slot_rate_hz(fast_pwm) / u64::from(enabled)
    }
}

const fn pwm_period(fast_pwm: bool) -> u16 {
    if fast_pwm {
        FAST_PWM_PERIOD
    } else {
        NORMAL_PWM_PERIOD
    }
}
