//! Test doubles for pins, transports and displays

use core::cell::Cell;

use heapless::String;
use ticklab_hal::{InputPin, OutputPin, PwmOutput};

use super::display::TextDisplay;

/// Output pin that remembers its level and counts toggles
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub toggles: u32,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn toggle(&mut self) {
        self.high = !self.high;
        self.toggles += 1;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin whose level the test changes through a shared cell
pub struct LevelInput<'a>(pub &'a Cell<bool>);

impl InputPin for LevelInput<'_> {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

/// PWM channel with an 8-bit top
#[derive(Debug, Default)]
pub struct MockPwm {
    pub duty: u16,
    pub top: u16,
}

impl MockPwm {
    pub fn with_top(top: u16) -> Self {
        Self { duty: 0, top }
    }
}

impl PwmOutput for MockPwm {
    fn set_duty(&mut self, duty: u16) {
        self.duty = duty.min(self.top);
    }

    fn max_duty(&self) -> u16 {
        self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDisplayError;

/// Two-row display that keeps the text of each row
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub rows: [String<16>; 2],
    pub writes: u32,
    pub clears: u32,
    pub fail: bool,
}

impl MockDisplay {
    pub fn row(&self, row: usize) -> &str {
        self.rows[row].as_str()
    }
}

impl TextDisplay for MockDisplay {
    type Error = MockDisplayError;

    fn clear(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockDisplayError);
        }
        for row in self.rows.iter_mut() {
            row.clear();
        }
        self.clears += 1;
        Ok(())
    }

    fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockDisplayError);
        }
        let line = &mut self.rows[row as usize];
        line.clear();
        for _ in 0..col {
            let _ = line.push(' ');
        }
        let _ = line.push_str(text);
        self.writes += 1;
        Ok(())
    }
}
