//! Colour sensor abstraction

/// Raw 16-bit red/green/blue channel counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb16 {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// A sensor that reports RGB light intensity
pub trait ColourSensor {
    type Error;

    /// Read the latest integrated red/green/blue counts
    fn read_rgb(&mut self) -> Result<Rgb16, Self::Error>;
}
