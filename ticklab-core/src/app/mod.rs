//! The exercises
//!
//! Each exercise is split the same way:
//!
//! - a `…Shared` struct of bridge primitives, placed in a `static` by the
//!   firmware and borrowed by both halves
//! - a `…Tick` half that owns the inputs and debounce cells and
//!   implements [`TickHandler`](crate::tick::TickHandler)
//! - a `…Main` half that owns outputs and the display and is polled from
//!   the main loop; it never blocks
//!
//! Exercises without a periodic input (meter, dimmer, colour sensor,
//! hex colour receiver) have only the main half.

pub mod announce;
pub mod clock;
pub mod colour_sensor;
pub mod countdown;
pub mod dimmer;
pub mod hex_colour;
pub mod meter;
pub mod rainbow;
pub mod random_colour;
pub mod servo;
pub mod thermometer;
pub mod traffic;

/// Index of the red channel in an RGB pin triple
pub const RGB_RED: usize = 0;
/// Index of the green channel in an RGB pin triple
pub const RGB_GREEN: usize = 1;
/// Index of the blue channel in an RGB pin triple
pub const RGB_BLUE: usize = 2;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb8 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb8 {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Write the three channels to PWM outputs in red, green, blue order
    pub fn apply<P: ticklab_hal::PwmOutput>(self, pwm: &mut [P; 3]) {
        pwm[RGB_RED].set_duty_u8(self.red);
        pwm[RGB_GREEN].set_duty_u8(self.green);
        pwm[RGB_BLUE].set_duty_u8(self.blue);
    }
}
