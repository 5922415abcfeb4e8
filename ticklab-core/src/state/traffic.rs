//! Two-button traffic light
//!
//! ```text
//!        go-green                 yellow elapsed
//!   Red ─────────► RedToGreen ─────────────────► Green
//!    ▲                                              │
//!    │  yellow elapsed                   go-red     │
//!    └──────────────── GreenToRed ◄─────────────────┘
//! ```
//!
//! Yellow phases are entered only on request from a stable phase and are
//! left only when their time runs out; further requests are discarded.
//! A request is honoured only once the stable phase's dwell time has run
//! down to zero.

use super::Transition;
use crate::config::TrafficTimings;

/// Traffic light phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Red,
    /// Yellow, heading to green
    RedToGreen,
    Green,
    /// Yellow, heading to red
    GreenToRed,
}

impl Phase {
    /// Lamps lit in this phase (yellow is shown as red and green together)
    pub fn lamps(self) -> Lamps {
        match self {
            Phase::Red => Lamps::RED,
            Phase::Green => Lamps::GREEN,
            Phase::RedToGreen | Phase::GreenToRed => Lamps::YELLOW,
        }
    }

    pub fn is_transitional(self) -> bool {
        matches!(self, Phase::RedToGreen | Phase::GreenToRed)
    }
}

/// Lamp bit pattern: bit 0 red, bit 1 green
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lamps(pub u8);

impl Lamps {
    pub const RED: Self = Self(0b01);
    pub const GREEN: Self = Self(0b10);
    pub const YELLOW: Self = Self(0b11);

    pub fn mask(self) -> u8 {
        self.0
    }
}

/// Inputs to the traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrafficTrigger {
    /// One tick elapsed
    Tick,
    /// Go-green button confirmed
    RequestGreen,
    /// Go-red button confirmed
    RequestRed,
}

/// Side effects of a phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrafficOutput {
    Lamps(Lamps),
}

/// Traffic light state: current phase plus remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrafficLight {
    phase: Phase,
    remaining_ms: u32,
    timings: TrafficTimings,
}

impl TrafficLight {
    /// Start in red, ready to accept a go-green request
    pub fn new(timings: TrafficTimings) -> Self {
        Self {
            phase: Phase::Red,
            remaining_ms: 0,
            timings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn lamps(&self) -> Lamps {
        self.phase.lamps()
    }

    /// Apply one trigger
    pub fn step(self, trigger: TrafficTrigger) -> Transition<Self, TrafficOutput> {
        use Phase::*;
        use TrafficTrigger::*;

        match (self.phase, trigger) {
            (Red, RequestGreen) if self.remaining_ms == 0 => self.enter(RedToGreen),
            (Green, RequestRed) if self.remaining_ms == 0 => self.enter(GreenToRed),

            (phase, Tick) => {
                let mut next = self;
                next.remaining_ms = self.remaining_ms.saturating_sub(1);
                match phase {
                    RedToGreen if next.remaining_ms == 0 => next.enter(Green),
                    GreenToRed if next.remaining_ms == 0 => next.enter(Red),
                    _ => Transition::quiet(next),
                }
            }

            // Wrong phase, or dwell time not yet over
            _ => Transition::quiet(self),
        }
    }

    fn enter(mut self, phase: Phase) -> Transition<Self, TrafficOutput> {
        self.phase = phase;
        self.remaining_ms = match phase {
            Phase::Red => self.timings.red_ms,
            Phase::Green => self.timings.green_ms,
            Phase::RedToGreen | Phase::GreenToRed => self.timings.yellow_ms,
        };
        Transition::emit(self, TrafficOutput::Lamps(phase.lamps()))
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new(TrafficTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(mut light: TrafficLight, count: u32) -> TrafficLight {
        for _ in 0..count {
            light = light.step(TrafficTrigger::Tick).state;
        }
        light
    }

    #[test]
    fn test_full_cycle() {
        let timings = TrafficTimings::default();
        let light = TrafficLight::new(timings);
        assert_eq!(light.phase(), Phase::Red);
        assert_eq!(light.remaining_ms(), 0);

        let t = light.step(TrafficTrigger::RequestGreen);
        assert_eq!(t.state.phase(), Phase::RedToGreen);
        assert_eq!(t.state.remaining_ms(), timings.yellow_ms);
        assert_eq!(t.outputs.as_slice(), &[TrafficOutput::Lamps(Lamps::YELLOW)]);

        let light = ticks(t.state, timings.yellow_ms - 1);
        assert_eq!(light.phase(), Phase::RedToGreen);
        assert_eq!(light.remaining_ms(), 1);

        let t = light.step(TrafficTrigger::Tick);
        assert_eq!(t.state.phase(), Phase::Green);
        assert_eq!(t.state.remaining_ms(), timings.green_ms);
        assert_eq!(t.outputs.as_slice(), &[TrafficOutput::Lamps(Lamps::GREEN)]);

        let light = ticks(t.state, timings.green_ms);
        let t = light.step(TrafficTrigger::RequestRed);
        assert_eq!(t.state.phase(), Phase::GreenToRed);

        let light = ticks(t.state, timings.yellow_ms);
        assert_eq!(light.phase(), Phase::Red);
        assert_eq!(light.remaining_ms(), timings.red_ms);
        assert_eq!(light.lamps(), Lamps::RED);
    }

    #[test]
    fn test_requests_ignored_during_yellow() {
        let light = TrafficLight::default()
            .step(TrafficTrigger::RequestGreen)
            .state;

        for trigger in [TrafficTrigger::RequestGreen, TrafficTrigger::RequestRed] {
            let t = light.step(trigger);
            assert_eq!(t.state, light);
            assert!(!t.has_outputs());
        }

        let light = ticks(light, 2000).step(TrafficTrigger::RequestRed).state;
        assert_eq!(light.phase(), Phase::Green);
        let light = ticks(light, 3000).step(TrafficTrigger::RequestRed).state;
        assert_eq!(light.phase(), Phase::GreenToRed);
        let t = light.step(TrafficTrigger::RequestGreen);
        assert_eq!(t.state.phase(), Phase::GreenToRed);
    }

    #[test]
    fn test_request_waits_for_dwell_time() {
        let light = ticks(TrafficLight::default().step(TrafficTrigger::RequestGreen).state, 2000);
        assert_eq!(light.phase(), Phase::Green);

        // Green still has time left
        let t = light.step(TrafficTrigger::RequestRed);
        assert_eq!(t.state.phase(), Phase::Green);
        assert!(!t.has_outputs());

        let light = ticks(light, 2999);
        assert_eq!(light.step(TrafficTrigger::RequestRed).state.phase(), Phase::Green);
        let light = ticks(light, 1);
        assert_eq!(light.step(TrafficTrigger::RequestRed).state.phase(), Phase::GreenToRed);
    }

    #[test]
    fn test_wrong_request_in_stable_phase() {
        let light = TrafficLight::default();
        let t = light.step(TrafficTrigger::RequestRed);
        assert_eq!(t.state, light);
    }

    #[test]
    fn test_stable_phase_tick_saturates() {
        let light = ticks(TrafficLight::default(), 10);
        assert_eq!(light.phase(), Phase::Red);
        assert_eq!(light.remaining_ms(), 0);
    }
}
