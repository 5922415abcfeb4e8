//! HD44780 16x2 character LCD behind a PCF8574 I2C backpack
//!
//! The PCF8574 drives the LCD in 4-bit mode. Each byte written to the
//! expander sets all eight lines at once:
//!
//! | bit | line |
//! |-----|------|
//! | P0  | RS (0 = command, 1 = data) |
//! | P1  | RW (always 0, write only) |
//! | P2  | EN (latched on the falling edge) |
//! | P3  | backlight |
//! | P4-P7 | D4-D7 |

use embedded_hal::delay::DelayNs;
use ticklab_core::traits::TextDisplay;
use ticklab_hal::I2cBus;

/// Default address of PCF8574 backpacks (A0-A2 high)
pub const PCF8574_ADDRESS: u8 = 0x27;

/// Visible columns
pub const COLS: u8 = 16;
/// Visible rows
pub const ROWS: u8 = 2;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

mod pin {
    pub const RS: u8 = 1 << 0;
    pub const EN: u8 = 1 << 2;
    pub const BACKLIGHT: u8 = 1 << 3;
}

/// HD44780 instructions
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    /// Entry mode: increment, no shift
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, 2 lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// LCD errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError<E> {
    /// The expander did not acknowledge
    Bus(E),
    /// Cursor position outside the 16x2 area
    OutOfRange,
}

/// 16x2 LCD driver
pub struct Hd44780<B, D> {
    bus: B,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<B: I2cBus, D: DelayNs> Hd44780<B, D> {
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_address(bus, delay, PCF8574_ADDRESS)
    }

    pub fn with_address(bus: B, delay: D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address,
            backlight: true,
        }
    }

    /// Run the 4-bit initialisation sequence and clear the screen
    ///
    /// Fails if the backpack does not answer; the caller is expected to
    /// treat that as fatal.
    pub fn init(&mut self) -> Result<(), LcdError<B::Error>> {
        // Power-on wait, then check the expander answers with all lines low
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, 0)?;

        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_ON)?;
        self.clear_screen()?;
        self.command(cmd::ENTRY_MODE)?;
        Ok(())
    }

    /// Clear the screen and home the cursor
    pub fn clear_screen(&mut self) -> Result<(), LcdError<B::Error>> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn home(&mut self) -> Result<(), LcdError<B::Error>> {
        self.command(cmd::HOME)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor to a column and row
    pub fn move_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError<B::Error>> {
        if col >= COLS || row >= ROWS {
            return Err(LcdError::OutOfRange);
        }
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write text at the cursor
    ///
    /// Non-ASCII characters are shown as `?`.
    pub fn put_str(&mut self, text: &str) -> Result<(), LcdError<B::Error>> {
        for c in text.chars() {
            let byte = if c.is_ascii() { c as u8 } else { b'?' };
            self.data(byte)?;
        }
        Ok(())
    }

    /// Switch the backlight; takes effect with the next expander write
    pub fn set_backlight(&mut self, on: bool) -> Result<(), LcdError<B::Error>> {
        self.backlight = on;
        self.expander_write(0)
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn command(&mut self, value: u8) -> Result<(), LcdError<B::Error>> {
        self.send(value, 0)
    }

    fn data(&mut self, value: u8) -> Result<(), LcdError<B::Error>> {
        self.send(value, pin::RS)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), LcdError<B::Error>> {
        self.write_nibble(value & 0xF0, mode)?;
        self.write_nibble((value << 4) & 0xF0, mode)
    }

    /// Latch the high four bits of `nibble` with an EN pulse
    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), LcdError<B::Error>> {
        let lines = nibble | mode;
        self.expander_write(lines | pin::EN)?;
        self.delay.delay_us(1);
        self.expander_write(lines)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, lines: u8) -> Result<(), LcdError<B::Error>> {
        let backlight = if self.backlight { pin::BACKLIGHT } else { 0 };
        self.bus
            .write(self.address, &[lines | backlight])
            .map_err(LcdError::Bus)
    }
}

impl<B: I2cBus, D: DelayNs> TextDisplay for Hd44780<B, D> {
    type Error = LcdError<B::Error>;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.clear_screen()
    }

    fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), Self::Error> {
        self.move_cursor(col, row)?;
        self.put_str(text)
    }
}
