//! Fixed-width text lines for 16x2 character displays

use core::fmt::{self, Write};

use heapless::String;

/// Columns of the character LCDs used by the exercises
pub const LCD_COLS: usize = 16;

/// One display row
pub type LcdLine = String<LCD_COLS>;

/// `fmt::Write` adapter that silently drops characters past capacity
///
/// `heapless::String` rejects a whole `write_str` that would overflow;
/// display text should be cut at the edge of the screen instead.
pub struct Truncating<'a, const N: usize> {
    buf: &'a mut String<N>,
}

impl<'a, const N: usize> Truncating<'a, N> {
    pub fn new(buf: &'a mut String<N>) -> Self {
        Self { buf }
    }
}

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into a line, truncating at the display width
pub fn format_line(args: fmt::Arguments<'_>) -> LcdLine {
    let mut line = LcdLine::new();
    // Truncating never reports an error
    let _ = Truncating::new(&mut line).write_fmt(args);
    line
}

/// Copy `text` into a line padded with spaces to the full width
pub fn fit_line(text: &str) -> LcdLine {
    let mut line = LcdLine::new();
    let _ = Truncating::new(&mut line).write_str(text);
    pad(&mut line);
    line
}

/// Pad a line with trailing spaces to its capacity
pub fn pad<const N: usize>(line: &mut String<N>) {
    while line.push(' ').is_ok() {}
}
