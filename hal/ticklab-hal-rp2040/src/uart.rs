//! UART transmit adapter
//!
//! The RP2040 UART has no ready callback we can hook, so the "ready for
//! the next byte" event is emulated: arming the transport raises a
//! [`Signal`] that a drain task waits on, and the task keeps asking the
//! queue for bytes until it disarms. While the UART FIFO is full the
//! byte stays queued and the task backs off.

use embassy_rp::uart::{
    Config, DataBits as RpDataBits, Parity as RpParity, StopBits as RpStopBits,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_nb::nb;
use embedded_hal_nb::serial;
use ticklab_hal::uart::{DataBits, Parity, StopBits, UartConfig, WouldBlock};
use ticklab_hal::ByteTransport;

/// Wake-up signal shared between a [`SignalledTx`] and its drain task
pub type ReadySignal = Signal<CriticalSectionRawMutex, ()>;

/// Translate a Ticklab UART configuration into embassy-rp's
pub fn uart_config(config: &UartConfig) -> Config {
    let mut rp = Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight => RpDataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    rp
}

/// Byte transport over any non-blocking serial writer
///
/// `embedded_hal_nb` writers answer `WouldBlock` while their FIFO is full,
/// so the ready event never waits on the UART.
pub struct SignalledTx<'a, W> {
    writer: W,
    ready: &'a ReadySignal,
    armed: bool,
    write_errors: u32,
}

impl<'a, W: serial::Write<u8>> SignalledTx<'a, W> {
    pub fn new(writer: W, ready: &'a ReadySignal) -> Self {
        Self {
            writer,
            ready,
            armed: false,
            write_errors: 0,
        }
    }

    /// Bytes the writer failed on (discarded)
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }
}

impl<W: serial::Write<u8>> ByteTransport for SignalledTx<'_, W> {
    fn try_write_byte(&mut self, byte: u8) -> Result<(), WouldBlock> {
        match self.writer.write(byte) {
            Ok(()) => Ok(()),
            Err(nb::Error::WouldBlock) => Err(WouldBlock),
            Err(nb::Error::Other(_)) => {
                // Retrying a failed byte would hold the queue forever
                self.write_errors = self.write_errors.saturating_add(1);
                Ok(())
            }
        }
    }

    fn set_ready_interrupt(&mut self, enabled: bool) {
        self.armed = enabled;
        if enabled {
            self.ready.signal(());
        }
    }

    fn ready_interrupt_enabled(&self) -> bool {
        self.armed
    }
}
