//! Pure state machines
//!
//! Each machine is a value type with a transition function
//! `step(self, trigger) -> Transition`. Side effects are returned as
//! outputs and applied by the caller, so the transition logic runs on the
//! host without any hardware.

pub mod countdown;
pub mod traffic;

use heapless::Vec;

pub use countdown::{Countdown, CountdownOutput, CountdownTrigger, TimerState};
pub use traffic::{Lamps, Phase, TrafficLight, TrafficOutput, TrafficTrigger};

/// Maximum outputs a single transition can produce
pub const MAX_OUTPUTS: usize = 2;

/// Result of feeding one trigger to a machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, O> {
    /// State after the trigger
    pub state: S,
    /// Side effects to apply, in order
    pub outputs: Vec<O, MAX_OUTPUTS>,
}

impl<S, O> Transition<S, O> {
    /// No side effects
    pub fn quiet(state: S) -> Self {
        Self {
            state,
            outputs: Vec::new(),
        }
    }

    /// One side effect
    pub fn emit(state: S, output: O) -> Self {
        let mut outputs = Vec::new();
        // Capacity is at least one
        let _ = outputs.push(output);
        Self { state, outputs }
    }

    /// Whether anything needs to be applied
    pub fn has_outputs(&self) -> bool {
        !self.outputs.is_empty()
    }
}
