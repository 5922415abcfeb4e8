//! Fatal start-up failure indication

use ticklab_hal::OutputPin;

use crate::tick::{Prescaler, TickHandler};

/// Blink period used when a peripheral fails to initialise (ticks per toggle)
pub const FAILURE_BLINK_TICKS: u32 = 250;

/// Toggles an indicator pin forever
///
/// Entered when a peripheral does not answer during start-up (LCD or
/// colour sensor NACK). There is no recovery; the board must be reset.
pub struct FailureBlinker<P> {
    pin: P,
    prescaler: Prescaler,
}

impl<P: OutputPin> FailureBlinker<P> {
    pub fn new(pin: P) -> Self {
        Self::with_period(pin, FAILURE_BLINK_TICKS)
    }

    pub fn with_period(pin: P, ticks_per_toggle: u32) -> Self {
        Self {
            pin,
            prescaler: Prescaler::new(ticks_per_toggle),
        }
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> TickHandler for FailureBlinker<P> {
    fn on_tick(&mut self) {
        if self.prescaler.tick() {
            self.pin.toggle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick::run_ticks;
    use crate::traits::mock::MockPin;

    #[test]
    fn test_blinks_at_period() {
        let mut blinker = FailureBlinker::with_period(MockPin::default(), 10);
        run_ticks(&mut blinker, 9);
        assert!(!blinker.pin().is_set_high());
        run_ticks(&mut blinker, 1);
        assert!(blinker.pin().is_set_high());
        run_ticks(&mut blinker, 10);
        assert!(!blinker.pin().is_set_high());
        assert_eq!(blinker.pin().toggles, 2);
    }
}
