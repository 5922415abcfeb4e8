//! RGB LED colour set from six hex digits received on the UART
//!
//! The receive interrupt pushes bytes into a ring; the main loop drains
//! it through a [`HexColourParser`]. Any non-hex byte resets the parser,
//! which lets a sender resynchronise with a newline.

use ticklab_hal::PwmOutput;

use super::Rgb8;
use crate::bridge::{RingBuffer, RingFull};
use crate::convert::hex_digit;

/// Receive ring size
pub const RX_CAPACITY: usize = 32;

/// Accumulates "RRGGBB"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexColourParser {
    value: u32,
    digits: u8,
}

impl HexColourParser {
    pub const fn new() -> Self {
        Self {
            value: 0,
            digits: 0,
        }
    }

    /// Feed one received byte; returns a colour after the sixth digit
    pub fn feed(&mut self, byte: u8) -> Option<Rgb8> {
        let Some(nibble) = hex_digit(byte) else {
            self.reset();
            return None;
        };

        self.value = (self.value << 4) | u32::from(nibble);
        self.digits += 1;
        if self.digits < 6 {
            return None;
        }

        let [_, red, green, blue] = self.value.to_be_bytes();
        self.reset();
        Some(Rgb8::new(red, green, blue))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Digits collected towards the next colour
    pub fn pending_digits(&self) -> u8 {
        self.digits
    }
}

pub struct HexColourShared {
    rx: RingBuffer<RX_CAPACITY>,
}

impl HexColourShared {
    pub const fn new() -> Self {
        Self {
            rx: RingBuffer::new(),
        }
    }

    /// Byte received (receive interrupt)
    pub fn on_rx(&self, byte: u8) -> Result<(), RingFull> {
        self.rx.push(byte)
    }

    pub fn dropped(&self) -> u32 {
        self.rx.dropped()
    }
}

impl Default for HexColourShared {
    fn default() -> Self {
        Self::new()
    }
}

pub struct HexColourMain<'a, P> {
    shared: &'a HexColourShared,
    parser: HexColourParser,
    pwm: [P; 3],
}

impl<'a, P: PwmOutput> HexColourMain<'a, P> {
    /// Take the PWM channels (red, green, blue) and switch the LED off
    pub fn new(shared: &'a HexColourShared, mut pwm: [P; 3]) -> Self {
        Rgb8::default().apply(&mut pwm);
        Self {
            shared,
            parser: HexColourParser::new(),
            pwm,
        }
    }

    /// Drain received bytes; returns the last colour applied
    pub fn poll(&mut self) -> Option<Rgb8> {
        let mut applied = None;
        while let Some(byte) = self.shared.rx.pop() {
            if let Some(colour) = self.parser.feed(byte) {
                colour.apply(&mut self.pwm);
                applied = Some(colour);
            }
        }
        applied
    }

    pub fn pwm(&self) -> &[P; 3] {
        &self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockPwm;

    fn feed_all(parser: &mut HexColourParser, bytes: &[u8]) -> Option<Rgb8> {
        bytes.iter().filter_map(|&b| parser.feed(b)).last()
    }

    #[test]
    fn test_parses_six_digits() {
        let mut parser = HexColourParser::new();
        assert_eq!(feed_all(&mut parser, b"FF8000"), Some(Rgb8::new(0xFF, 0x80, 0x00)));
        assert_eq!(parser.pending_digits(), 0);
        assert_eq!(feed_all(&mut parser, b"00a0Ff"), Some(Rgb8::new(0x00, 0xA0, 0xFF)));
    }

    #[test]
    fn test_non_hex_resets() {
        let mut parser = HexColourParser::new();
        assert_eq!(feed_all(&mut parser, b"FF80"), None);
        assert_eq!(parser.pending_digits(), 4);
        assert_eq!(parser.feed(b'\n'), None);
        assert_eq!(parser.pending_digits(), 0);
        assert_eq!(feed_all(&mut parser, b"#123456"), Some(Rgb8::new(0x12, 0x34, 0x56)));
    }

    #[test]
    fn test_received_bytes_drive_pwm() {
        let shared = HexColourShared::new();
        let mut main = HexColourMain::new(
            &shared,
            [MockPwm::with_top(255), MockPwm::with_top(255), MockPwm::with_top(255)],
        );

        for &byte in b"10203\n0A0B0C" {
            shared.on_rx(byte).unwrap();
        }
        assert_eq!(main.poll(), Some(Rgb8::new(0x0A, 0x0B, 0x0C)));
        let duties: [u16; 3] = [main.pwm()[0].duty, main.pwm()[1].duty, main.pwm()[2].duty];
        assert_eq!(duties, [0x0A, 0x0B, 0x0C]);
        assert_eq!(main.poll(), None);
    }
}
