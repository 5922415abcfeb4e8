//! Fixed-brightness LED

use ticklab_hal::PwmOutput;

use crate::convert::brightness_to_compare;

pub struct Dimmer<P> {
    pwm: P,
    percent: u8,
}

impl<P: PwmOutput> Dimmer<P> {
    /// Take the channel and switch it off
    pub fn new(mut pwm: P) -> Self {
        pwm.set_duty(0);
        Self { pwm, percent: 0 }
    }

    /// Set brightness in percent (clamped to 100); returns the 8-bit compare value
    pub fn set_percent(&mut self, percent: u8) -> u8 {
        self.percent = percent.min(100);
        let compare = brightness_to_compare(self.percent);
        self.pwm.set_duty_u8(compare);
        compare
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockPwm;

    #[test]
    fn test_percent_to_duty() {
        let mut dimmer = Dimmer::new(MockPwm::with_top(255));
        assert_eq!(dimmer.set_percent(25), 63);
        assert_eq!(dimmer.pwm().duty, 63);

        assert_eq!(dimmer.set_percent(0), 0);
        assert_eq!(dimmer.set_percent(180), 255);
        assert_eq!(dimmer.percent(), 100);
    }

    #[test]
    fn test_scales_to_wider_counter() {
        let mut dimmer = Dimmer::new(MockPwm::with_top(1000));
        dimmer.set_percent(100);
        assert_eq!(dimmer.pwm().duty, 1000);
    }
}
