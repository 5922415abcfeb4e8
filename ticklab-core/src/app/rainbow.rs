//! Slow hue cycle on an RGB LED
//!
//! Every tick (50 ms) moves `step` counts of brightness from one channel
//! to the next: red to green, green to blue, blue back to red.

use ticklab_hal::PwmOutput;

use super::Rgb8;
use crate::bridge::RequestFlag;
use crate::config::HueConfig;
use crate::tick::TickHandler;

/// Three-phase colour wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueWheel {
    colour: Rgb8,
    /// 0: red to green, 1: green to blue, 2: blue to red
    phase: u8,
    step: u8,
}

impl HueWheel {
    /// Start at full red
    pub fn new(config: HueConfig) -> Self {
        Self {
            colour: Rgb8::new(u8::MAX, 0, 0),
            phase: 0,
            step: config.step.max(1),
        }
    }

    pub fn colour(&self) -> Rgb8 {
        self.colour
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Advance one step and return the new colour
    ///
    /// When the falling channel cannot give up another full step the
    /// wheel moves to the next phase and the colour holds for that call.
    pub fn advance(&mut self) -> Rgb8 {
        let Rgb8 { red, green, blue } = &mut self.colour;
        let (falling, rising) = match self.phase {
            0 => (red, green),
            1 => (green, blue),
            _ => (blue, red),
        };

        if *rising < u8::MAX && *falling >= self.step {
            *rising = rising.saturating_add(self.step);
            *falling -= self.step;
        } else {
            self.phase = (self.phase + 1) % 3;
        }
        self.colour
    }
}

impl Default for HueWheel {
    fn default() -> Self {
        Self::new(HueConfig::default())
    }
}

pub struct RainbowShared {
    step_due: RequestFlag,
}

impl RainbowShared {
    pub const fn new() -> Self {
        Self {
            step_due: RequestFlag::new(),
        }
    }
}

impl Default for RainbowShared {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick-context half: one step request per 50 ms tick
pub struct RainbowTick<'a> {
    shared: &'a RainbowShared,
}

impl<'a> RainbowTick<'a> {
    pub fn new(shared: &'a RainbowShared) -> Self {
        Self { shared }
    }
}

impl TickHandler for RainbowTick<'_> {
    fn on_tick(&mut self) {
        self.shared.step_due.raise();
    }
}

pub struct RainbowMain<'a, P> {
    shared: &'a RainbowShared,
    wheel: HueWheel,
    pwm: [P; 3],
}

impl<'a, P: PwmOutput> RainbowMain<'a, P> {
    pub fn new(shared: &'a RainbowShared, mut pwm: [P; 3], config: HueConfig) -> Self {
        let wheel = HueWheel::new(config);
        wheel.colour().apply(&mut pwm);
        Self { shared, wheel, pwm }
    }

    pub fn poll(&mut self) -> Option<Rgb8> {
        if !self.shared.step_due.take() {
            return None;
        }
        let colour = self.wheel.advance();
        colour.apply(&mut self.pwm);
        Some(colour)
    }

    pub fn pwm(&self) -> &[P; 3] {
        &self.pwm
    }
}
