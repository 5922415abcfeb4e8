//! Periodic tick callback and time-division helpers
//!
//! A tick is one invocation of the board's fixed-period timer. Everything
//! that runs in tick context implements [`TickHandler`]; the handler must
//! finish well inside one period and never wait on anything.

/// Work done once per timer tick
pub trait TickHandler {
    /// Called once per tick, in tick (interrupt) context
    fn on_tick(&mut self);
}

impl<H: TickHandler + ?Sized> TickHandler for &mut H {
    fn on_tick(&mut self) {
        (**self).on_tick();
    }
}

/// Drive a handler for `count` ticks
///
/// Used by host tests and simulations in place of the hardware timer.
pub fn run_ticks<H: TickHandler + ?Sized>(handler: &mut H, count: u32) {
    for _ in 0..count {
        handler.on_tick();
    }
}

/// Tick period in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickPeriod(pub u32);

impl TickPeriod {
    /// Buttons, timers and clocks
    pub const MS_1: Self = Self(1);
    /// Servo PWM frame
    pub const MS_20: Self = Self(20);
    /// Slow colour ramp
    pub const MS_50: Self = Self(50);

    /// Period in milliseconds
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Ticks needed to cover `ms` milliseconds, rounding up
    pub const fn ticks_for(self, ms: u32) -> u32 {
        if self.0 == 0 {
            return 0;
        }
        ms.div_ceil(self.0)
    }
}

/// Divides the tick into a slower periodic event
///
/// `tick()` returns `true` once every `divisor` calls, e.g. once a second
/// with a 1 ms tick and a divisor of 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Prescaler {
    count: u32,
    divisor: u32,
}

impl Prescaler {
    /// Create a prescaler; a divisor of zero behaves like one
    pub const fn new(divisor: u32) -> Self {
        Self {
            count: 0,
            divisor: if divisor == 0 { 1 } else { divisor },
        }
    }

    /// Advance by one tick; `true` when the slower event is due
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.divisor {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Restart the current period
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Ticks accumulated in the current period
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescaler_fires_every_divisor_ticks() {
        let mut prescaler = Prescaler::new(1000);
        let mut fired = 0;
        for tick in 1..=3000u32 {
            if prescaler.tick() {
                fired += 1;
                assert_eq!(tick % 1000, 0);
            }
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_prescaler_reset() {
        let mut prescaler = Prescaler::new(4);
        prescaler.tick();
        prescaler.tick();
        prescaler.reset();
        assert_eq!(prescaler.count(), 0);
        assert!(!prescaler.tick());
        assert!(!prescaler.tick());
        assert!(!prescaler.tick());
        assert!(prescaler.tick());
    }

    #[test]
    fn test_zero_divisor_fires_every_tick() {
        let mut prescaler = Prescaler::new(0);
        assert!(prescaler.tick());
        assert!(prescaler.tick());
    }

    #[test]
    fn test_ticks_for() {
        assert_eq!(TickPeriod::MS_1.ticks_for(1000), 1000);
        assert_eq!(TickPeriod::MS_20.ticks_for(1000), 50);
        assert_eq!(TickPeriod::MS_50.ticks_for(120), 3);
    }

    struct Counter(u32);

    impl TickHandler for Counter {
        fn on_tick(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_run_ticks() {
        let mut counter = Counter(0);
        run_ticks(&mut counter, 25);
        assert_eq!(counter.0, 25);
    }
}
