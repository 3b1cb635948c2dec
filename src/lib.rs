#![no_std]

pub mod animator;
pub mod channel;
pub mod command;
pub mod driver;
pub mod gamma;
pub mod mask;
pub mod matrix;
pub mod pattern;
pub mod pin_map;
pub mod scheduler;
pub mod sim;
pub mod state;
pub mod timing;

pub use animator::{Animator, DEFAULT_FRAME_DURATION, FrameResult};
pub use channel::{
    Channel, CommandChannel, CommandReceiver, CommandSender, TryReceiveError, TrySendError,
};
pub use command::Command;
pub use driver::MatrixPins;
pub use gamma::LevelAdjuster;
pub use mask::LedMask;
pub use matrix::{Charlieplex, MatrixConfig};
pub use pattern::{
    Breathe, Chase, Pattern, PatternId, PatternSlot, ProbeOutcome, Solid, Sparkle, SparkleStep,
    Twinkle,
};
pub use pin_map::{LED_COUNT, MATRIX, PIN_COUNT, Pin, PinPair, find_led, lookup};
pub use scheduler::{ScanOutcome, SlotPhase};
pub use state::{
    DEFAULT_BRIGHTNESS, DriveMode, FAST_PWM_PERIOD, MultiplexState, NORMAL_PWM_PERIOD, Selection,
};
pub use timing::{TICK_PERIOD, TimerConfig};

pub use embassy_time::{Duration, Instant};
