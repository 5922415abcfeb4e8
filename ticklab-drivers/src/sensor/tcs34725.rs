//! TCS34725 RGB colour sensor
//!
//! Register access always goes through the command byte (bit 7 set).
//! With the auto-increment protocol a single six-byte read starting at
//! RDATAL returns red, green and blue as little-endian 16-bit counts.

use embedded_hal::delay::DelayNs;
use ticklab_core::traits::{ColourSensor, Rgb16};
use ticklab_hal::I2cBus;

/// Fixed bus address
pub const TCS34725_ADDRESS: u8 = 0x29;

/// Register map
pub mod reg {
    pub const ENABLE: u8 = 0x00;
    pub const ATIME: u8 = 0x01;
    pub const CONTROL: u8 = 0x0F;
    pub const ID: u8 = 0x12;
    pub const CDATAL: u8 = 0x14;
    pub const RDATAL: u8 = 0x16;
    pub const GDATAL: u8 = 0x18;
    pub const BDATAL: u8 = 0x1A;
}

const COMMAND_BIT: u8 = 0x80;
const AUTO_INCREMENT: u8 = 0x20;

/// ENABLE bits
const PON: u8 = 0x01;
const AEN: u8 = 0x02;

/// ID register values of the TCS3472x family
const KNOWN_IDS: [u8; 2] = [0x44, 0x4D];

/// Colour sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// The sensor did not acknowledge
    Bus(E),
    /// Something answered at 0x29 that is not a TCS3472x
    UnexpectedId(u8),
}

pub struct Tcs34725<B, D> {
    bus: B,
    delay: D,
}

impl<B: I2cBus, D: DelayNs> Tcs34725<B, D> {
    pub fn new(bus: B, delay: D) -> Self {
        Self { bus, delay }
    }

    /// Check the part, power it on and start integrating
    pub fn init(&mut self) -> Result<(), SensorError<B::Error>> {
        let id = self
            .bus
            .read_register(TCS34725_ADDRESS, COMMAND_BIT | reg::ID)
            .map_err(SensorError::Bus)?;
        if !KNOWN_IDS.contains(&id) {
            return Err(SensorError::UnexpectedId(id));
        }

        self.write(reg::ENABLE, PON)?;
        // Oscillator start-up takes 2.4 ms
        self.delay.delay_ms(3);
        self.write(reg::ENABLE, PON | AEN)?;
        // First integration cycle
        self.delay.delay_ms(10);
        Ok(())
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), SensorError<B::Error>> {
        self.bus
            .write_register(TCS34725_ADDRESS, COMMAND_BIT | reg, value)
            .map_err(SensorError::Bus)
    }
}

impl<B: I2cBus, D: DelayNs> ColourSensor for Tcs34725<B, D> {
    type Error = SensorError<B::Error>;

    fn read_rgb(&mut self) -> Result<Rgb16, Self::Error> {
        let mut buf = [0u8; 6];
        self.bus
            .write_read(
                TCS34725_ADDRESS,
                &[COMMAND_BIT | AUTO_INCREMENT | reg::RDATAL],
                &mut buf,
            )
            .map_err(SensorError::Bus)?;

        Ok(Rgb16 {
            red: u16::from_le_bytes([buf[0], buf[1]]),
            green: u16::from_le_bytes([buf[2], buf[3]]),
            blue: u16::from_le_bytes([buf[4], buf[5]]),
        })
    }
}
