//! Perceptual brightness correction
//!
//! The eye responds roughly to the 2.2 power of PWM duty, so a linear ramp
//! of brightness values looks like it rushes through the dark end. Feeding
//! ramp values through [`correct`] evens that out.

/// Exponent of the correction curve
pub const GAMMA: f32 = 2.2;

/// Map a perceived level (0-255) to a PWM brightness (0-255)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn correct(level: u8) -> u8 {
    let normalized = f32::from(level) / 255.0;
    let corrected = libm::powf(normalized, GAMMA) * 255.0;
    libm::roundf(corrected).clamp(0.0, 255.0) as u8
}

/// Type alias for a brightness adjustment function
pub type LevelAdjuster = fn(level: u8) -> u8;
