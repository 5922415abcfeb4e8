//! PWM adapters
//!
//! embassy-rp splits a slice into two [`embassy_rp::pwm::PwmOutput`]
//! channels implementing `embedded_hal::pwm::SetDutyCycle`; [`DutyChannel`]
//! lifts any such channel onto [`ticklab_hal::PwmOutput`].

use embassy_rp::pwm::Config;
use embedded_hal::pwm::SetDutyCycle;
use fixed::types::U12F4;
use ticklab_hal::PwmOutput;

use crate::SYS_CLOCK_HZ;

/// Counter top for 8-bit LED dimming
pub const LED_TOP: u16 = 255;

/// Clock divider used for servo frames
pub const SERVO_DIVIDER: u8 = 64;

/// Slice configuration for 8-bit LED brightness
pub fn led_config() -> Config {
    let mut config = Config::default();
    config.top = LED_TOP;
    config
}

/// Slice configuration for a servo frame of `frame_us`
///
/// The counter runs at `SYS_CLOCK_HZ / SERVO_DIVIDER`; the top value is
/// saturated to the 16-bit counter.
pub fn servo_config(frame_us: u32) -> Config {
    let mut config = Config::default();
    config.divider = U12F4::from_num(SERVO_DIVIDER);
    config.top = servo_top(frame_us);
    config
}

/// Counter top giving a period of `frame_us`
pub const fn servo_top(frame_us: u32) -> u16 {
    let counts_per_ms = SYS_CLOCK_HZ / SERVO_DIVIDER as u32 / 1000;
    let counts = (frame_us as u64 * counts_per_ms as u64) / 1000;
    if counts == 0 {
        0
    } else if counts > u16::MAX as u64 + 1 {
        u16::MAX
    } else {
        (counts - 1) as u16
    }
}

/// One PWM channel
pub struct DutyChannel<C> {
    channel: C,
    failures: u32,
}

impl<C: SetDutyCycle> DutyChannel<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            failures: 0,
        }
    }

    /// Number of rejected duty updates
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl<C: SetDutyCycle> PwmOutput for DutyChannel<C> {
    fn set_duty(&mut self, duty: u16) {
        if self.channel.set_duty_cycle(duty).is_err() {
            self.failures = self.failures.saturating_add(1);
        }
    }

    fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }
}
