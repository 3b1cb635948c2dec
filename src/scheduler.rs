//! Multiplex scheduler
//!
//! One call to [`tick`] per hardware timer period. The PWM counter does
//! double duty: every wrap to zero starts a new slot (and, when
//! multiplexing, moves to the next enabled LED), and within the slot the
//! selected LED is driven while `counter < brightness`.
//!
//! Per-tick work is constant except on a wrap, where the scan probes at
//! most [`LED_COUNT`] mask bits.

use crate::driver::{MatrixPins, extinguish, light};
use crate::pin_map::{LED_COUNT, lookup};
use crate::state::{DriveMode, MultiplexState, Selection};

/// Phase of the current slot after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// No LED selected, pins floating
    NoneSelected,
    /// LED selected but not driven (outside its PWM window)
    IdleSelected(u8),
    /// LED electrically lit
    Driving(u8),
}

/// Result of searching the mask for the next enabled LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// First enabled LED at or after the cursor (wrapping)
    Found(u8),
    /// Every probe hit a disabled LED
    Exhausted,
}

/// Advance the PWM counter and update the pins
pub fn tick<P: MatrixPins>(state: &mut MultiplexState, pins: &mut P) -> SlotPhase {
    state.counter = state.counter.wrapping_add(1);
    if state.counter >= state.period() {
        state.counter = 0;
    }

    if state.counter == 0 && state.mode == DriveMode::Multiplex {
        advance(state, pins);
    }

    gate(state, pins);
    phase(state)
}

/// Find the first enabled LED starting at `state.cursor`, wrapping
///
/// Probes exactly [`LED_COUNT`] indexes, so it terminates on an empty mask.
pub fn scan(state: &MultiplexState) -> ScanOutcome {
    let start = usize::from(state.cursor) % LED_COUNT;
    (0..LED_COUNT)
        .map(|offset| (start + offset) % LED_COUNT)
        .find_map(|led| {
            let led = u8::try_from(led).ok()?;
            state.mask.get(led).then_some(led)
        })
        .map_or(ScanOutcome::Exhausted, ScanOutcome::Found)
}

/// Move the selection to the next enabled LED
fn advance<P: MatrixPins>(state: &mut MultiplexState, pins: &mut P) {
    let outcome = scan(state);
    release(state, pins);

    if let ScanOutcome::Found(led) = outcome {
        select(state, led);
        #[allow(clippy::cast_possible_truncation)]
        {
            state.cursor = ((usize::from(led) + 1) % LED_COUNT) as u8;
        }
    }
}

/// Apply brightness gating to the current selection
fn gate<P: MatrixPins>(state: &mut MultiplexState, pins: &mut P) {
    let in_window = state.brightness > 0 && state.counter < u16::from(state.brightness);
    let Some(selection) = state.selection.as_mut() else {
        return;
    };

    if in_window {
        if !selection.driven {
            light(pins, selection.pair);
            selection.driven = true;
        }
    } else if selection.driven {
        extinguish(pins);
        selection.driven = false;
    }
}

/// Select `led` without driving it
///
/// Out of range indexes leave the selection empty.
pub(crate) fn select(state: &mut MultiplexState, led: u8) {
    state.selection = lookup(led).map(|pair| Selection {
        led,
        pair,
        driven: false,
    });
}

/// Float every pin if an LED is driven, then drop the selection
pub(crate) fn release<P: MatrixPins>(state: &mut MultiplexState, pins: &mut P) {
    if state.selection.is_some_and(|selection| selection.driven) {
        extinguish(pins);
    }
    state.selection = None;
}

/// Phase of the current slot without ticking
pub fn phase(state: &MultiplexState) -> SlotPhase {
    match state.selection {
        None => SlotPhase::NoneSelected,
        Some(Selection {
            led, driven: true, ..
        }) => SlotPhase::Driving(led),
        Some(Selection { led, .. }) => SlotPhase::IdleSelected(led),
    }
}
