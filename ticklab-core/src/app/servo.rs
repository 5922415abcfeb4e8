//! Hobby servo swept back and forth
//!
//! The tick half runs once per 20 ms PWM frame: it loads the published
//! pulse width into the PWM channel and flags the frame. The main half
//! advances the sweep once per frame and publishes the new width.

use ticklab_hal::pwm::pulse_to_duty;
use ticklab_hal::PwmOutput;

use crate::bridge::{RequestFlag, Shared};
use crate::config::SweepConfig;
use crate::tick::TickHandler;

/// Back-and-forth pulse width sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepState {
    pulse_us: u16,
    rising: bool,
    config: SweepConfig,
}

impl SweepState {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            pulse_us: config.start_us.clamp(config.min_us, config.max_us),
            rising: true,
            config,
        }
    }

    pub fn pulse_us(&self) -> u16 {
        self.pulse_us
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Move one step, reversing at either limit
    pub fn advance(&mut self) -> u16 {
        let SweepConfig {
            min_us,
            max_us,
            step_us,
            ..
        } = self.config;

        if self.rising {
            self.pulse_us = self.pulse_us.saturating_add(step_us);
            if self.pulse_us >= max_us {
                self.pulse_us = max_us;
                self.rising = false;
            }
        } else {
            self.pulse_us = self.pulse_us.saturating_sub(step_us);
            if self.pulse_us <= min_us {
                self.pulse_us = min_us;
                self.rising = true;
            }
        }
        self.pulse_us
    }
}

pub struct ServoShared {
    pulse_us: Shared<u16>,
    frame: RequestFlag,
}

impl ServoShared {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            pulse_us: Shared::new(SweepState::new(config).pulse_us()),
            frame: RequestFlag::new(),
        }
    }

    /// Pulse width the next frame will use
    pub fn pulse_us(&self) -> u16 {
        self.pulse_us.get()
    }
}

/// Tick-context half: owns the PWM channel
pub struct ServoTick<'a, P> {
    shared: &'a ServoShared,
    pwm: P,
    frame_us: u32,
}

impl<'a, P: PwmOutput> ServoTick<'a, P> {
    pub fn new(shared: &'a ServoShared, pwm: P, config: SweepConfig) -> Self {
        Self {
            shared,
            pwm,
            frame_us: config.frame_us,
        }
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}

impl<P: PwmOutput> TickHandler for ServoTick<'_, P> {
    fn on_tick(&mut self) {
        let pulse_us = self.shared.pulse_us.get();
        let duty = pulse_to_duty(pulse_us, self.frame_us, self.pwm.max_duty());
        self.pwm.set_duty(duty);
        self.shared.frame.raise();
    }
}

/// Main-loop half: advances the sweep once per frame
pub struct ServoMain<'a> {
    shared: &'a ServoShared,
    sweep: SweepState,
}

impl<'a> ServoMain<'a> {
    pub fn new(shared: &'a ServoShared, config: SweepConfig) -> Self {
        Self {
            shared,
            sweep: SweepState::new(config),
        }
    }

    /// Returns the newly published pulse width
    pub fn poll(&mut self) -> Option<u16> {
        if !self.shared.frame.take() {
            return None;
        }
        let pulse_us = self.sweep.advance();
        self.shared.pulse_us.set(pulse_us);
        Some(pulse_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockPwm;

    #[test]
    fn test_sweep_reverses_at_limits() {
        let mut sweep = SweepState::new(SweepConfig::default());
        assert_eq!(sweep.pulse_us(), 1500);

        for _ in 0..50 {
            sweep.advance();
        }
        assert_eq!(sweep.pulse_us(), 2000);
        assert!(!sweep.is_rising());

        assert_eq!(sweep.advance(), 1990);
        for _ in 0..99 {
            sweep.advance();
        }
        assert_eq!(sweep.pulse_us(), 1000);
        assert!(sweep.is_rising());
        assert_eq!(sweep.advance(), 1010);
    }

    #[test]
    fn test_frame_loads_published_pulse() {
        let config = SweepConfig::default();
        let shared = ServoShared::new(config);
        let mut tick = ServoTick::new(&shared, MockPwm::with_top(20_000), config);
        let mut main = ServoMain::new(&shared, config);

        assert_eq!(main.poll(), None);

        tick.on_tick();
        assert_eq!(tick.pwm().duty, 1500);
        assert_eq!(main.poll(), Some(1510));

        tick.on_tick();
        assert_eq!(tick.pwm().duty, 1510);
    }
}
