//! Frame pacing for pattern producers
//!
//! Installs one pattern frame per `frame_duration` without async/await or
//! platform timers. The caller sleeps between ticks; the timer interrupt
//! keeps multiplexing whatever mask was installed last.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::CommandReceiver;
use crate::driver::MatrixPins;
use crate::matrix::Charlieplex;
use crate::pattern::Pattern;

/// Default frame duration (25 FPS)
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(40);

/// Result of an animator tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// Whether a new frame was installed on this tick
    pub installed: bool,
    /// Commands applied before the frame
    pub commands: usize,
    /// The deadline for the next frame
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero if behind schedule)
    pub sleep_duration: Duration,
}

/// Drives a [`Pattern`] into a [`Charlieplex`] at a fixed cadence
///
/// # Usage
///
/// ```ignore
/// static MATRIX: Charlieplex<BoardPins> = Charlieplex::new(BoardPins::new());
/// static COMMANDS: CommandChannel<8> = CommandChannel::new();
///
/// let mut animator = Animator::new(&MATRIX, sparkle, COMMANDS.receiver());
/// animator.start(Instant::now());
///
/// loop {
///     let result = animator.tick(Instant::now());
///     delay_us(result.sleep_duration.as_micros());
/// }
/// ```
pub struct Animator<'a, P: MatrixPins, S: Pattern, const COMMAND_CHANNEL_SIZE: usize> {
    matrix: &'a Charlieplex<P>,
    pattern: S,
    commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, P: MatrixPins, S: Pattern, const COMMAND_CHANNEL_SIZE: usize>
    Animator<'a, P, S, COMMAND_CHANNEL_SIZE>
{
    /// Create an animator with [`DEFAULT_FRAME_DURATION`]
    pub fn new(
        matrix: &'a Charlieplex<P>,
        pattern: S,
        commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
    ) -> Self {
        Self::with_frame_duration(matrix, pattern, commands, DEFAULT_FRAME_DURATION)
    }

    /// Create an animator with a custom frame duration
    pub fn with_frame_duration(
        matrix: &'a Charlieplex<P>,
        pattern: S,
        commands: CommandReceiver<'a, COMMAND_CHANNEL_SIZE>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            matrix,
            pattern,
            commands,
            next_frame: Instant::from_ticks(0),
            frame_duration,
        }
    }

    /// Install the first frame and start multiplexing
    pub fn start(&mut self, now: Instant) {
        self.matrix.enable_multiplex(self.pattern.next_frame());
        self.next_frame = now + self.frame_duration;
    }

    /// Apply queued commands, then install the next frame if it is due
    ///
    /// If the caller fell more than two frames behind, the schedule restarts
    /// from `now` instead of replaying the backlog.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let commands = self.apply_pending();

        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            #[cfg(feature = "esp32-log")]
            println!(
                "[animator] drift {} ms, resyncing",
                now.saturating_duration_since(self.next_frame).as_millis()
            );
            self.next_frame = now;
        }

        let installed = now >= self.next_frame;
        if installed {
            self.matrix.replace_bitmask(self.pattern.next_frame());
            self.next_frame += self.frame_duration;
        }

        FrameResult {
            installed,
            commands,
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
        }
    }

    /// Apply every queued command in order and return how many ran
    pub fn apply_pending(&self) -> usize {
        let mut applied = 0;
        for command in self.commands.drain() {
            self.matrix.apply(command);
            applied += 1;
        }
        applied
    }

    /// Swap in another pattern; its first frame shows on the next tick
    pub fn set_pattern(&mut self, pattern: S) -> S {
        #[cfg(feature = "esp32-log")]
        println!("[animator] pattern switched");
        core::mem::replace(&mut self.pattern, pattern)
    }

    pub fn pattern(&self) -> &S {
        &self.pattern
    }

    pub fn pattern_mut(&mut self) -> &mut S {
        &mut self.pattern
    }

    pub fn matrix(&self) -> &'a Charlieplex<P> {
        self.matrix
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}
