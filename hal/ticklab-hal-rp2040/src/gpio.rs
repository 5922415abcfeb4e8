//! GPIO adapters
//!
//! The exercise boards wire buttons between the pin and ground with the
//! internal pull-up enabled, so a pressed button reads low. The core
//! treats "high" as "pressed"; [`Button`] does the inversion.

use embassy_rp::gpio::{Input, Output};
use ticklab_hal::{InputPin, OutputPin};

/// Push button input
pub struct Button<'d> {
    input: Input<'d>,
    active_low: bool,
}

impl<'d> Button<'d> {
    /// Button pulling the pin to ground when pressed
    pub fn active_low(input: Input<'d>) -> Self {
        Self {
            input,
            active_low: true,
        }
    }

    /// Button driving the pin high when pressed
    pub fn active_high(input: Input<'d>) -> Self {
        Self {
            input,
            active_low: false,
        }
    }
}

impl InputPin for Button<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high() != self.active_low
    }
}

/// LED (or any push-pull output)
pub struct Led<'d>(Output<'d>);

impl<'d> Led<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for Led<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
