//! Two-button traffic light
//!
//! The tick half debounces the go-green and go-red buttons and counts
//! down the current phase; a timed phase change raises `repaint`. The
//! main half consumes button requests, applies them to the shared light
//! and drives the lamps.

use ticklab_hal::gpio::drive_mask;
use ticklab_hal::{InputPin, OutputPin};

use crate::bridge::{RequestFlag, Shared};
use crate::config::{DebounceConfig, TrafficTimings};
use crate::debounce::{DebounceCell, Edge};
use crate::state::{Phase, TrafficLight, TrafficOutput, TrafficTrigger};
use crate::tick::TickHandler;

/// State touched by both contexts
pub struct TrafficShared {
    light: Shared<TrafficLight>,
    go_green: RequestFlag,
    go_red: RequestFlag,
    repaint: RequestFlag,
}

impl TrafficShared {
    pub fn new(timings: TrafficTimings) -> Self {
        Self {
            light: Shared::new(TrafficLight::new(timings)),
            go_green: RequestFlag::new(),
            go_red: RequestFlag::new(),
            repaint: RequestFlag::new(),
        }
    }

    /// Copy of the current light state
    pub fn snapshot(&self) -> TrafficLight {
        self.light.get()
    }

    /// Button edges lost because the previous one was still pending
    pub fn overruns(&self) -> u32 {
        u32::from(self.go_green.overruns()) + u32::from(self.go_red.overruns())
    }

    fn apply(&self, trigger: TrafficTrigger) -> Option<TrafficOutput> {
        self.light.with(|light| {
            let transition = light.step(trigger);
            *light = transition.state;
            transition.outputs.first().copied()
        })
    }
}

/// Tick-context half: buttons and phase countdown
pub struct TrafficTick<'a, I> {
    shared: &'a TrafficShared,
    green_button: I,
    red_button: I,
    green_cell: DebounceCell,
    red_cell: DebounceCell,
}

impl<'a, I: InputPin> TrafficTick<'a, I> {
    pub fn new(
        shared: &'a TrafficShared,
        green_button: I,
        red_button: I,
        debounce: DebounceConfig,
    ) -> Self {
        Self {
            shared,
            green_button,
            red_button,
            green_cell: DebounceCell::new(false, debounce.threshold_ticks),
            red_cell: DebounceCell::new(false, debounce.threshold_ticks),
        }
    }
}

impl<I: InputPin> TickHandler for TrafficTick<'_, I> {
    fn on_tick(&mut self) {
        // Sample both buttons before touching the light
        let green = self.green_cell.update(self.green_button.is_high());
        let red = self.red_cell.update(self.red_button.is_high());

        if green == Some(Edge::Rising) {
            self.shared.go_green.raise();
        }
        if red == Some(Edge::Rising) {
            self.shared.go_red.raise();
        }

        if self.shared.apply(TrafficTrigger::Tick).is_some() {
            self.shared.repaint.raise();
        }
    }
}

/// Main-loop half: requests and lamps
///
/// `lamps[0]` is the red lamp and `lamps[1]` the green lamp.
pub struct TrafficMain<'a, P> {
    shared: &'a TrafficShared,
    lamps: [P; 2],
}

impl<'a, P: OutputPin> TrafficMain<'a, P> {
    /// Take the lamp pins and show the initial phase
    pub fn new(shared: &'a TrafficShared, lamps: [P; 2]) -> Self {
        let mut main = Self { shared, lamps };
        main.paint(shared.snapshot().lamps().mask());
        main
    }

    /// Handle pending requests and repaints
    ///
    /// Returns the phase that was painted, if any.
    pub fn poll(&mut self) -> Option<Phase> {
        let mut painted = None;

        if self.shared.go_green.take() {
            painted = self.request(TrafficTrigger::RequestGreen).or(painted);
        }
        if self.shared.go_red.take() {
            painted = self.request(TrafficTrigger::RequestRed).or(painted);
        }

        if self.shared.repaint.take() {
            let light = self.shared.snapshot();
            self.paint(light.lamps().mask());
            painted = Some(light.phase());
        }

        painted
    }

    pub fn lamps(&self) -> &[P; 2] {
        &self.lamps
    }

    fn request(&mut self, trigger: TrafficTrigger) -> Option<Phase> {
        let TrafficOutput::Lamps(lamps) = self.shared.apply(trigger)?;
        self.paint(lamps.mask());
        Some(self.shared.snapshot().phase())
    }

    fn paint(&mut self, mask: u8) {
        drive_mask(&mut self.lamps, mask);
    }
}
