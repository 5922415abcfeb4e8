//! Device drivers for the Ticklab exercises
//!
//! Both devices sit on the two-wire bus described by
//! [`ticklab_hal::I2cBus`] and implement the collaborator traits from
//! `ticklab_core::traits`:
//!
//! - [`lcd::Hd44780`] - 16x2 character LCD behind a PCF8574 backpack
//! - [`sensor::Tcs34725`] - RGB colour sensor

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;
pub mod sensor;

#[cfg(test)]
pub(crate) mod mock;
