//! Ticklab Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the exercise logic is written
//! against. Chip-specific adapters (`ticklab-hal-rp2040`) and the host-test
//! mocks implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Exercise binaries (ticklab-firmware)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ticklab-core / ticklab-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ticklab-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmOutput`] - Duty-cycle outputs (LED dimming, servo pulses)
//! - [`uart::ByteTransport`] - Interrupt-paced byte transmitter
//! - [`adc::AnalogSource`] - Conversion trigger for an ADC channel
//! - [`i2c::I2cBus`] - Two-wire register bus

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::AnalogSource;
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use pwm::PwmOutput;
pub use uart::ByteTransport;
