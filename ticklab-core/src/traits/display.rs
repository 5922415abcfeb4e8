//! Character display sink

use heapless::String;

/// Character display addressed by column and row
pub trait TextDisplay {
    type Error;

    /// Blank the whole screen and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Write ASCII text starting at a position
    ///
    /// Text running past the last column is the caller's problem; the
    /// exercises always write whole rows.
    fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), Self::Error>;
}

/// Last content written to each row of a display
///
/// Rows are padded to `COLS` and only forwarded to the display when they
/// differ from what is already shown, so a main loop can "draw" every
/// iteration without flooding a slow bus.
pub struct FrameCache<const COLS: usize, const ROWS: usize> {
    rows: [Option<String<COLS>>; ROWS],
}

impl<const COLS: usize, const ROWS: usize> FrameCache<COLS, ROWS> {
    pub const fn new() -> Self {
        Self {
            rows: [const { None }; ROWS],
        }
    }

    /// Write `text` to `row` if it differs from the cached content
    ///
    /// Returns `Ok(true)` if the display was written. The cache is only
    /// updated after a successful write, so a failed row is retried on
    /// the next call.
    pub fn write_row<D: TextDisplay>(
        &mut self,
        display: &mut D,
        row: usize,
        text: &str,
    ) -> Result<bool, D::Error> {
        let Some(slot) = self.rows.get_mut(row) else {
            return Ok(false);
        };

        let mut line: String<COLS> = String::new();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        crate::text::pad(&mut line);

        if slot.as_ref() == Some(&line) {
            return Ok(false);
        }

        display.write_at(0, row as u8, &line)?;
        *slot = Some(line);
        Ok(true)
    }

    /// Forget cached content (after the display was cleared externally)
    pub fn invalidate(&mut self) {
        for row in self.rows.iter_mut() {
            *row = None;
        }
    }

    /// Clear the display and the cache
    pub fn clear<D: TextDisplay>(&mut self, display: &mut D) -> Result<(), D::Error> {
        display.clear()?;
        self.invalidate();
        Ok(())
    }

    pub fn row(&self, row: usize) -> Option<&str> {
        self.rows.get(row)?.as_ref().map(|line| line.as_str())
    }
}

impl<const COLS: usize, const ROWS: usize> Default for FrameCache<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockDisplay;

    #[test]
    fn test_unchanged_row_is_not_rewritten() {
        let mut display = MockDisplay::default();
        let mut cache: FrameCache<16, 2> = FrameCache::new();

        assert_eq!(cache.write_row(&mut display, 0, "hello"), Ok(true));
        assert_eq!(cache.write_row(&mut display, 0, "hello"), Ok(false));
        assert_eq!(display.writes, 1);
        assert_eq!(display.row(0), "hello           ");

        assert_eq!(cache.write_row(&mut display, 0, "world"), Ok(true));
        assert_eq!(display.writes, 2);
    }

    #[test]
    fn test_failed_write_is_retried() {
        let mut display = MockDisplay::default();
        let mut cache: FrameCache<16, 2> = FrameCache::new();

        display.fail = true;
        assert!(cache.write_row(&mut display, 1, "x").is_err());
        assert_eq!(cache.row(1), None);

        display.fail = false;
        assert_eq!(cache.write_row(&mut display, 1, "x"), Ok(true));
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut display = MockDisplay::default();
        let mut cache: FrameCache<16, 2> = FrameCache::new();
        assert_eq!(cache.write_row(&mut display, 5, "x"), Ok(false));
        assert_eq!(display.writes, 0);
    }

    #[test]
    fn test_clear_invalidates() {
        let mut display = MockDisplay::default();
        let mut cache: FrameCache<16, 2> = FrameCache::new();
        cache.write_row(&mut display, 0, "a").unwrap();
        cache.clear(&mut display).unwrap();
        assert_eq!(cache.write_row(&mut display, 0, "a"), Ok(true));
    }
}
