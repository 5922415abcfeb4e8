//! PWM output abstractions

/// Duty-cycle output channel
///
/// `duty` is expressed in counts of the channel's period; `max_duty()`
/// is the value for 100 %.
pub trait PwmOutput {
    /// Set the compare value
    fn set_duty(&mut self, duty: u16);

    /// Compare value corresponding to a fully-on output
    fn max_duty(&self) -> u16;

    /// Set an 8-bit duty (0-255) scaled onto the channel's period
    fn set_duty_u8(&mut self, duty: u8) {
        let scaled = (duty as u32 * self.max_duty() as u32) / 255;
        self.set_duty(scaled as u16);
    }
}

/// Scale a pulse width onto a frame period
///
/// Returns the compare value for a pulse of `pulse_us` inside a frame of
/// `frame_us` on a channel whose full period is `top` counts. A zero
/// frame yields zero.
pub fn pulse_to_duty(pulse_us: u16, frame_us: u32, top: u16) -> u16 {
    if frame_us == 0 {
        return 0;
    }
    let duty = (pulse_us as u32 * top as u32) / frame_us;
    duty.min(top as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPwm {
        duty: u16,
        top: u16,
    }

    impl PwmOutput for MockPwm {
        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }

        fn max_duty(&self) -> u16 {
            self.top
        }
    }

    #[test]
    fn test_set_duty_u8_scales() {
        let mut pwm = MockPwm { duty: 0, top: 1000 };
        pwm.set_duty_u8(255);
        assert_eq!(pwm.duty, 1000);
        pwm.set_duty_u8(0);
        assert_eq!(pwm.duty, 0);
    }

    #[test]
    fn test_pulse_to_duty() {
        // 1.5 ms in a 20 ms frame with 20000 counts
        assert_eq!(pulse_to_duty(1500, 20_000, 20_000), 1500);
        // Half the frame
        assert_eq!(pulse_to_duty(10_000, 20_000, 1000), 500);
        assert_eq!(pulse_to_duty(1500, 0, 1000), 0);
    }
}
