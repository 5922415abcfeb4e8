//! Analog-to-digital converter abstractions
//!
//! Conversions are split-phase: the main loop starts one, and the
//! completion context (ADC interrupt or task) posts the raw result into
//! a mailbox.

/// ADC channel that can be triggered
pub trait AnalogSource {
    /// Start a single conversion; the result arrives asynchronously
    fn start_conversion(&mut self);
}

/// Converter resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    Bits10,
    Bits12,
}

impl Resolution {
    /// Largest raw value the converter can return
    pub const fn full_scale(self) -> u16 {
        match self {
            Resolution::Bits10 => 1023,
            Resolution::Bits12 => 4095,
        }
    }
}
