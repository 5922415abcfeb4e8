//! Colour sensor readings on the LCD

use crate::text::{format_line, LcdLine};
use crate::traits::{ColourSensor, FrameCache, Rgb16, TextDisplay};

/// Failure of one monitor pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorError<S, D> {
    Sensor(S),
    Display(D),
}

/// The two display rows for one reading
pub fn reading_lines(rgb: Rgb16) -> [LcdLine; 2] {
    [
        format_line(format_args!("R:{:04X} G:{:04X}", rgb.red, rgb.green)),
        format_line(format_args!("B:{:04X}", rgb.blue)),
    ]
}

/// Polls the sensor and shows changed readings
pub struct ColourMonitor<S, D> {
    sensor: S,
    display: D,
    frame: FrameCache<16, 2>,
    last: Option<Rgb16>,
}

impl<S: ColourSensor, D: TextDisplay> ColourMonitor<S, D> {
    pub fn new(sensor: S, display: D) -> Self {
        Self {
            sensor,
            display,
            frame: FrameCache::new(),
            last: None,
        }
    }

    pub fn init(&mut self) -> Result<(), D::Error> {
        self.frame.clear(&mut self.display)
    }

    /// Read once; returns the reading if the display was updated
    pub fn poll(&mut self) -> Result<Option<Rgb16>, MonitorError<S::Error, D::Error>> {
        let rgb = self.sensor.read_rgb().map_err(MonitorError::Sensor)?;
        if self.last == Some(rgb) {
            return Ok(None);
        }

        let [top, bottom] = reading_lines(rgb);
        self.frame
            .write_row(&mut self.display, 0, &top)
            .map_err(MonitorError::Display)?;
        self.frame
            .write_row(&mut self.display, 1, &bottom)
            .map_err(MonitorError::Display)?;
        self.last = Some(rgb);
        Ok(Some(rgb))
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
