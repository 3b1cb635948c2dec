//! Interrupt-safe matrix handle
//!
//! [`Charlieplex`] owns the multiplexing state and the pins behind one
//! critical-section mutex. The timer interrupt calls
//! [`on_tick`](Charlieplex::on_tick); everything else calls the setters.
//! Each method is a single critical section, so the interrupt never sees a
//! half-applied update.
//!
//! # Usage
//!
//! ```ignore
//! static MATRIX: Charlieplex<BoardPins> = Charlieplex::new(BoardPins::new());
//!
//! #[interrupt]
//! fn TIM2() {
//!     clear_update_flag();
//!     MATRIX.on_tick();
//! }
//!
//! MATRIX.enable_multiplex(sparkle.next_frame());
//! loop {
//!     MATRIX.replace_bitmask(sparkle.next_frame());
//!     delay_ms(40);
//! }
//! ```

use core::cell::RefCell;

use critical_section::{CriticalSection, Mutex};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::Command;
use crate::driver::MatrixPins;
use crate::mask::LedMask;
use crate::pin_map::LED_COUNT;
use crate::scheduler::{self, SlotPhase};
use crate::state::{DEFAULT_BRIGHTNESS, DriveMode, MultiplexState};

/// Initial settings for a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixConfig {
    /// PWM brightness (0-255)
    pub brightness: u8,
    /// Start with the short PWM period
    pub fast_pwm: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            fast_pwm: false,
        }
    }
}

struct Engine<P> {
    state: MultiplexState,
    pins: P,
}

/// Charlieplexed LED matrix shared between the timer interrupt and the
/// main loop
pub struct Charlieplex<P: MatrixPins> {
    inner: Mutex<RefCell<Engine<P>>>,
}

impl<P: MatrixPins> Charlieplex<P> {
    /// Create an idle matrix
    ///
    /// The pins are assumed to be floating already; call
    /// [`shutdown`](Self::shutdown) once at start-up if that is not
    /// guaranteed by reset.
    pub const fn new(pins: P) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Engine {
                state: MultiplexState::new(),
                pins,
            })),
        }
    }

    /// Create an idle matrix with custom settings
    pub fn with_config(pins: P, config: &MatrixConfig) -> Self {
        let mut state = MultiplexState::new();
        state.brightness = config.brightness;
        state.fast_pwm = config.fast_pwm;
        Self {
            inner: Mutex::new(RefCell::new(Engine { state, pins })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Engine<P>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow_ref_mut(cs)))
    }

    /// Timer interrupt entry point, call once per tick
    pub fn on_tick(&self) -> SlotPhase {
        self.with(|engine| scheduler::tick(&mut engine.state, &mut engine.pins))
    }

    /// Same as [`on_tick`](Self::on_tick) for callers already inside a
    /// critical section
    pub fn on_tick_in(&self, cs: CriticalSection<'_>) -> SlotPhase {
        let mut engine = self.inner.borrow_ref_mut(cs);
        let Engine { state, pins } = &mut *engine;
        scheduler::tick(state, pins)
    }

    /// Set PWM brightness, applied from the next tick
    pub fn set_brightness(&self, brightness: u8) {
        self.with(|engine| engine.state.brightness = brightness);
    }

    /// Current PWM brightness
    pub fn brightness(&self) -> u8 {
        self.with(|engine| engine.state.brightness)
    }

    /// Turn one LED on or off in the mask
    ///
    /// Indexes outside the matrix are ignored.
    pub fn set_led(&self, led: u8, on: bool) {
        if usize::from(led) >= LED_COUNT {
            return;
        }
        self.with(|engine| engine.state.mask.set(led, on));
    }

    /// Check if an LED is on in the mask
    pub fn led(&self, led: u8) -> bool {
        self.with(|engine| engine.state.mask.get(led))
    }

    /// Overwrite the whole mask
    ///
    /// Takes effect at the next slot boundary: a deselected LED finishes its
    /// current slot.
    pub fn replace_bitmask(&self, mask: LedMask) {
        self.with(|engine| engine.state.mask = mask);
    }

    /// Copy of the enabled-LED mask
    pub fn bitmask(&self) -> LedMask {
        self.with(|engine| engine.state.mask)
    }

    /// Turn every LED off in the mask
    pub fn clear_all(&self) {
        self.replace_bitmask(LedMask::EMPTY);
    }

    /// Turn every LED on in the mask
    pub fn set_all(&self) {
        self.replace_bitmask(LedMask::FULL);
    }

    /// Install `mask` and start multiplexing from LED 0
    ///
    /// Ends direct drive if it was active. The counter is armed so the next
    /// tick starts a slot.
    pub fn enable_multiplex(&self, mask: LedMask) {
        self.with(|engine| {
            let state = &mut engine.state;
            scheduler::release(state, &mut engine.pins);
            state.mask = mask;
            state.cursor = 0;
            state.mode = DriveMode::Multiplex;
            state.counter = state.period() - 1;
        });
        #[cfg(feature = "esp32-log")]
        println!("[charlie] multiplex on, {} leds", mask.count());
    }

    /// Stop multiplexing and float the pins
    pub fn disable_multiplex(&self) {
        self.with(|engine| {
            scheduler::release(&mut engine.state, &mut engine.pins);
            engine.state.mode = DriveMode::Idle;
        });
        #[cfg(feature = "esp32-log")]
        println!("[charlie] multiplex off");
    }

    /// Light one LED directly, bypassing the mask
    ///
    /// The LED is still dimmed by the PWM counter. Multiplexing is ended if
    /// it was active. `on == false` floats the pins and goes idle. Indexes
    /// outside the matrix are ignored.
    pub fn direct_drive(&self, led: u8, on: bool) {
        if usize::from(led) >= LED_COUNT {
            return;
        }
        self.with(|engine| {
            let state = &mut engine.state;
            scheduler::release(state, &mut engine.pins);
            state.counter = 0;
            if on {
                state.mode = DriveMode::Direct;
                scheduler::select(state, led);
            } else {
                state.mode = DriveMode::Idle;
            }
        });
        #[cfg(feature = "esp32-log")]
        println!("[charlie] direct drive led {} on={}", led, on);
    }

    /// Switch between the 256 (normal) and 64 (fast) tick PWM periods
    ///
    /// The current slot keeps its selection; the new period applies from
    /// the next tick.
    pub fn set_fast_pwm_mode(&self, enable: bool) {
        self.with(|engine| engine.state.fast_pwm = enable);
    }

    /// Whether the 64 tick period is active
    pub fn fast_pwm_mode(&self) -> bool {
        self.with(|engine| engine.state.fast_pwm)
    }

    /// Current drive mode
    pub fn mode(&self) -> DriveMode {
        self.with(|engine| engine.state.mode)
    }

    /// LED selected for the current slot
    pub fn selected_led(&self) -> Option<u8> {
        self.with(|engine| engine.state.selection.map(|selection| selection.led))
    }

    /// Float every pin and go idle, keeping mask and brightness
    pub fn shutdown(&self) {
        self.with(|engine| {
            engine.pins.all_off();
            engine.state.selection = None;
            engine.state.mode = DriveMode::Idle;
        });
    }

    /// Copy of the whole state
    pub fn snapshot(&self) -> MultiplexState {
        self.with(|engine| engine.state.clone())
    }

    /// Run `f` with exclusive access to the pins
    ///
    /// Runs inside the critical section; keep it short.
    pub fn with_pins<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        self.with(|engine| f(&mut engine.pins))
    }

    /// Apply a queued command
    pub fn apply(&self, command: Command) {
        match command {
            Command::SetBrightness(brightness) => self.set_brightness(brightness),
            Command::SetLed { led, on } => self.set_led(led, on),
            Command::ReplaceMask(mask) => self.replace_bitmask(mask),
            Command::ClearAll => self.clear_all(),
            Command::SetAll => self.set_all(),
            Command::EnableMultiplex(mask) => self.enable_multiplex(mask),
            Command::DisableMultiplex => self.disable_multiplex(),
            Command::DirectDrive { led, on } => self.direct_drive(led, on),
            Command::SetFastPwm(enable) => self.set_fast_pwm_mode(enable),
            Command::Shutdown => self.shutdown(),
        }
    }
}
