//! I2C adapter
//!
//! Wraps any blocking `embedded_hal::i2c::I2c` master (embassy-rp's
//! `I2c<'_, _, Blocking>` on the exercise boards) and flattens its error
//! into [`I2cBusError`] so drivers stay generic over one error type.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use ticklab_hal::I2cBus;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// Device did not acknowledge its address
    AddressNack,
    /// Device did not acknowledge a data byte
    DataNack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => I2cBusError::DataNack,
            ErrorKind::NoAcknowledge(_) => I2cBusError::AddressNack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// [`I2cBus`] over an embedded-hal I2C master
pub struct I2cAdapter<T> {
    bus: T,
}

impl<T: I2c> I2cAdapter<T> {
    pub fn new(bus: T) -> Self {
        Self { bus }
    }

    pub fn release(self) -> T {
        self.bus
    }
}

impl<T: I2c> I2cBus for I2cAdapter<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data).map_err(|e| e.kind().into())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(address, buf).map_err(|e| e.kind().into())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus
            .write_read(address, write_data, read_buf)
            .map_err(|e| e.kind().into())
    }
}
