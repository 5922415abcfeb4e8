//! Seconds counter on the LCD

use crate::bridge::{RequestFlag, Shared};
use crate::text::format_line;
use crate::tick::{Prescaler, TickHandler};
use crate::traits::{FrameCache, TextDisplay};

/// Ticks per second at a 1 ms tick
pub const TICKS_PER_SECOND: u32 = 1000;

/// Row the count is written to
pub const CLOCK_ROW: usize = 1;

pub struct ClockShared {
    seconds: Shared<u32>,
    new_second: RequestFlag,
}

impl ClockShared {
    pub const fn new() -> Self {
        Self {
            seconds: Shared::new(0),
            new_second: RequestFlag::new(),
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds.get()
    }
}

impl Default for ClockShared {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick-context half: millisecond accumulator
pub struct ClockTick<'a> {
    shared: &'a ClockShared,
    prescaler: Prescaler,
}

impl<'a> ClockTick<'a> {
    pub fn new(shared: &'a ClockShared) -> Self {
        Self {
            shared,
            prescaler: Prescaler::new(TICKS_PER_SECOND),
        }
    }
}

impl TickHandler for ClockTick<'_> {
    fn on_tick(&mut self) {
        if self.prescaler.tick() {
            self.shared.seconds.with(|s| *s = s.wrapping_add(1));
            self.shared.new_second.raise();
        }
    }
}

/// Main-loop half: writes the count when a new second is flagged
pub struct ClockMain<'a, D> {
    shared: &'a ClockShared,
    display: D,
    frame: FrameCache<16, 2>,
}

impl<'a, D: TextDisplay> ClockMain<'a, D> {
    pub fn new(shared: &'a ClockShared, display: D) -> Self {
        Self {
            shared,
            display,
            frame: FrameCache::new(),
        }
    }

    pub fn init(&mut self) -> Result<(), D::Error> {
        self.frame.clear(&mut self.display)?;
        self.show(self.shared.seconds())
    }

    /// Returns the second shown, if a new one was flagged
    pub fn poll(&mut self) -> Result<Option<u32>, D::Error> {
        if !self.shared.new_second.take() {
            return Ok(None);
        }
        let seconds = self.shared.seconds();
        self.show(seconds)?;
        Ok(Some(seconds))
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn show(&mut self, seconds: u32) -> Result<(), D::Error> {
        let line = format_line(format_args!("{}", seconds));
        self.frame.write_row(&mut self.display, CLOCK_ROW, &line)?;
        Ok(())
    }
}
