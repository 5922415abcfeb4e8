//! Potentiometer / photoresistor voltage meter on the LCD
//!
//! The ADC completion posts each result to a mailbox. The main loop
//! rewrites the display only when the sample changed and then starts the
//! next conversion, so conversions are paced by the main loop.

use ticklab_hal::AnalogSource;

use crate::bridge::Mailbox;
use crate::config::MeterConfig;
use crate::convert::{millivolts, percent, volts_and_tenths};
use crate::text::{format_line, LcdLine};
use crate::traits::{FrameCache, TextDisplay};

/// Shared between the ADC completion and the main loop
pub struct MeterShared {
    sample: Mailbox<u16>,
}

impl MeterShared {
    pub const fn new() -> Self {
        Self {
            sample: Mailbox::new(0),
        }
    }

    /// ADC conversion complete
    pub fn on_conversion(&self, raw: u16) {
        self.sample.post(raw);
    }
}

impl Default for MeterShared {
    fn default() -> Self {
        Self::new()
    }
}

/// The two display rows for one sample
pub fn meter_lines(raw: u16, config: &MeterConfig) -> Option<[LcdLine; 2]> {
    let mv = millivolts(raw, config.adc_full_scale, config.vref_mv)?;
    let pct = percent(raw, config.percent_full_scale)?;
    let (volts, tenths) = volts_and_tenths(mv);
    Some([
        format_line(format_args!("Volt: {}.{} V", volts, tenths)),
        format_line(format_args!("Perc: {} %", pct)),
    ])
}

pub struct MeterMain<'a, A, D> {
    shared: &'a MeterShared,
    adc: A,
    display: D,
    frame: FrameCache<16, 2>,
    config: MeterConfig,
    last: Option<u16>,
}

impl<'a, A: AnalogSource, D: TextDisplay> MeterMain<'a, A, D> {
    pub fn new(shared: &'a MeterShared, adc: A, display: D, config: MeterConfig) -> Self {
        Self {
            shared,
            adc,
            display,
            frame: FrameCache::new(),
            config,
            last: None,
        }
    }

    /// Clear the display and start the first conversion
    pub fn init(&mut self) -> Result<(), D::Error> {
        self.frame.clear(&mut self.display)?;
        self.adc.start_conversion();
        Ok(())
    }

    /// Handle a completed conversion
    ///
    /// Returns the sample if the display was updated.
    pub fn poll(&mut self) -> Result<Option<u16>, D::Error> {
        let Some(raw) = self.shared.sample.take() else {
            return Ok(None);
        };

        let mut shown = None;
        if self.last != Some(raw) {
            if let Some([volts, pct]) = meter_lines(raw, &self.config) {
                self.frame.write_row(&mut self.display, 0, &volts)?;
                self.frame.write_row(&mut self.display, 1, &pct)?;
                shown = Some(raw);
            }
            self.last = Some(raw);
        }

        self.adc.start_conversion();
        Ok(shown)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockDisplay;

    #[derive(Default)]
    struct MockAdc {
        started: u32,
    }

    impl AnalogSource for MockAdc {
        fn start_conversion(&mut self) {
            self.started += 1;
        }
    }

    #[test]
    fn test_lines() {
        let [volts, pct] = meter_lines(2048, &MeterConfig::POTENTIOMETER).unwrap();
        assert_eq!(volts.as_str(), "Volt: 1.6 V");
        assert_eq!(pct.as_str(), "Perc: 50 %");

        let [_, pct] = meter_lines(4095, &MeterConfig::PHOTORESISTOR).unwrap();
        assert_eq!(pct.as_str(), "Perc: 113 %");
    }

    #[test]
    fn test_redraws_only_on_change() {
        let shared = MeterShared::new();
        let mut main = MeterMain::new(
            &shared,
            MockAdc::default(),
            MockDisplay::default(),
            MeterConfig::POTENTIOMETER,
        );
        main.init().unwrap();
        assert_eq!(main.adc().started, 1);

        assert_eq!(main.poll().unwrap(), None);
        assert_eq!(main.adc().started, 1);

        shared.on_conversion(4095);
        assert_eq!(main.poll().unwrap(), Some(4095));
        assert_eq!(main.display().row(0), "Volt: 3.3 V     ");
        assert_eq!(main.display().row(1), "Perc: 100 %     ");
        assert_eq!(main.adc().started, 2);
        let writes = main.display().writes;

        shared.on_conversion(4095);
        assert_eq!(main.poll().unwrap(), None);
        assert_eq!(main.display().writes, writes);
        assert_eq!(main.adc().started, 3);
    }
}
