//! GPIO pin abstractions
//!
//! Digital inputs are sampled once per tick by the tick context; digital
//! outputs are driven by whichever context owns them (normally the main
//! loop).

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Implementations return the raw, undebounced level.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Drive a group of output pins from a bit mask
///
/// Bit `n` of `mask` drives `pins[n]`. All pins are written, so clearing
/// and setting happen in one pass (the "all off, then set" pattern of
/// an RGB LED).
pub fn drive_mask<P: OutputPin>(pins: &mut [P], mask: u8) {
    for (bit, pin) in pins.iter_mut().enumerate().take(8) {
        pin.set_state(mask & (1 << bit) != 0);
    }
}

/// Read a group of output pins back into a bit mask
pub fn read_mask<P: OutputPin>(pins: &[P]) -> u8 {
    pins.iter()
        .enumerate()
        .take(8)
        .fold(0, |mask, (bit, pin)| {
            if pin.is_set_high() {
                mask | (1 << bit)
            } else {
                mask
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_drive_mask() {
        let mut pins: [MockPin; 3] = Default::default();

        drive_mask(&mut pins, 0b101);
        assert!(pins[0].high);
        assert!(!pins[1].high);
        assert!(pins[2].high);
        assert_eq!(read_mask(&pins), 0b101);

        // Previous bits are cleared
        drive_mask(&mut pins, 0b010);
        assert_eq!(read_mask(&pins), 0b010);
    }

    #[test]
    fn test_toggle() {
        let mut pin = MockPin::default();
        pin.toggle();
        assert!(pin.is_set_high());
        pin.toggle();
        assert!(!pin.is_set_high());
    }
}
