//! RP2040 adapters for the Ticklab HAL
//!
//! Each module wraps an embassy-rp (or plain embedded-hal) peripheral so it
//! satisfies one of the `ticklab-hal` traits:
//!
//! - GPIO buttons and LEDs
//! - PWM slices for LED dimming and servo pulses
//! - Buffered UART transmit, paced by a "ready" signal
//! - ADC conversion triggers
//! - Blocking I2C master

#![no_std]

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod uart;

pub use adc::AdcTrigger;
pub use gpio::{Button, Led};
pub use i2c::{I2cAdapter, I2cBusError};
pub use pwm::DutyChannel;
pub use uart::SignalledTx;

/// System clock the PWM dividers are computed against
pub const SYS_CLOCK_HZ: u32 = 125_000_000;
