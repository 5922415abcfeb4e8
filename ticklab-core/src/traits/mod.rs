//! Collaborator traits implemented by leaf drivers
//!
//! The HAL traits cover raw peripherals; these cover devices built on
//! top of them (a character display, a colour sensor).

pub mod display;
pub mod sensor;

#[cfg(test)]
pub(crate) mod mock;

pub use display::{FrameCache, TextDisplay};
pub use sensor::{ColourSensor, Rgb16};
