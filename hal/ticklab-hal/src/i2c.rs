//! Two-wire (I2C) bus abstractions
//!
//! Only leaf drivers (LCD, colour sensor) talk to the bus; the tick and
//! state-machine code never does.

/// I2C bus master
pub trait I2cBus {
    /// Error type for bus operations (NACK, arbitration loss, ...)
    type Error;

    /// Write bytes to a device
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read bytes from a device
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write one register (`reg`, `value`)
    fn write_register(&mut self, address: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[reg, value])
    }

    /// Read one register
    fn read_register(&mut self, address: u8, reg: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[reg], &mut buf)?;
        Ok(buf[0])
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast-mode plus, the fastest clock accepted
    pub const MAX_FREQUENCY: u32 = 1_000_000;

    /// Reject a clock of zero or above fast-mode plus
    pub const fn validate(&self) -> Result<(), I2cConfigError> {
        if self.frequency == 0 || self.frequency > Self::MAX_FREQUENCY {
            return Err(I2cConfigError::InvalidFrequency);
        }
        Ok(())
    }
}

/// Invalid [`I2cConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cConfigError {
    /// Bus clock of zero or above 1 MHz
    InvalidFrequency,
}
