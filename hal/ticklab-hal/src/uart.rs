//! UART abstractions
//!
//! The transmit side is modelled after a "data register empty" interrupt:
//! the hardware asks for the next byte while the ready interrupt is
//! enabled, and the driver disables it once there is nothing left to send.
//!
//! Transports never wait. A byte the hardware cannot take yet is refused
//! with [`WouldBlock`] and offered again on the next ready event.

/// The transmitter has no room for another byte right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WouldBlock;

/// Interrupt-paced byte transmitter
pub trait ByteTransport {
    /// Hand one byte to the hardware without waiting
    ///
    /// Called from the ready event, usually inside a critical section.
    fn try_write_byte(&mut self, byte: u8) -> Result<(), WouldBlock>;

    /// Enable or disable the "ready for next byte" event
    fn set_ready_interrupt(&mut self, enabled: bool);

    /// Whether the ready event is currently enabled
    fn ready_interrupt_enabled(&self) -> bool;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Reject settings no UART can run with
    pub const fn validate(&self) -> Result<(), UartConfigError> {
        if self.baudrate == 0 {
            return Err(UartConfigError::ZeroBaudrate);
        }
        Ok(())
    }
}

/// Invalid [`UartConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartConfigError {
    /// Baud rate of zero
    ZeroBaudrate,
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
