//! Configuration type definitions

use super::{ConfigError, Validate};
use crate::convert::{FULL_SCALE_12BIT, VREF_MV};
use crate::debounce::DEFAULT_THRESHOLD_TICKS;

/// Button debounce settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Consecutive ticks a new level must hold before it is accepted
    pub threshold_ticks: u8,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            threshold_ticks: DEFAULT_THRESHOLD_TICKS,
        }
    }
}

impl Validate for DebounceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_ticks == 0 {
            return Err(ConfigError::ZeroDebounceThreshold);
        }
        Ok(())
    }
}

/// Traffic light phase durations in ticks (milliseconds at a 1 ms tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrafficTimings {
    /// Minimum time red is held before a go-green request is honoured
    pub red_ms: u32,
    /// Length of either yellow phase
    pub yellow_ms: u32,
    /// Minimum time green is held before a go-red request is honoured
    pub green_ms: u32,
}

impl Default for TrafficTimings {
    fn default() -> Self {
        Self {
            red_ms: 4000,
            yellow_ms: 2000,
            green_ms: 3000,
        }
    }
}

impl Validate for TrafficTimings {
    fn validate(&self) -> Result<(), ConfigError> {
        // A zero yellow would let a request skip straight through
        if self.yellow_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Programmable countdown settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownConfig {
    /// Seconds added per press of the add button
    pub add_seconds: u32,
    /// Ticks per counted second
    pub ticks_per_second: u32,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            add_seconds: 5,
            ticks_per_second: 1000,
        }
    }
}

impl Validate for CountdownConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.add_seconds == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Servo sweep settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepConfig {
    pub min_us: u16,
    pub max_us: u16,
    pub start_us: u16,
    /// Pulse change per frame
    pub step_us: u16,
    /// PWM frame length
    pub frame_us: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_us: 1000,
            max_us: 2000,
            start_us: 1500,
            step_us: 10,
            frame_us: 20_000,
        }
    }
}

impl Validate for SweepConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_us >= self.max_us {
            return Err(ConfigError::InvertedLimits);
        }
        if self.start_us < self.min_us || self.start_us > self.max_us {
            return Err(ConfigError::StartOutOfRange);
        }
        if self.step_us == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.frame_us == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if u32::from(self.max_us) > self.frame_us {
            return Err(ConfigError::PulseExceedsFrame);
        }
        Ok(())
    }
}

/// Rainbow hue wheel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HueConfig {
    /// Duty change per tick
    pub step: u8,
}

impl Default for HueConfig {
    fn default() -> Self {
        Self { step: 5 }
    }
}

impl Validate for HueConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        Ok(())
    }
}

/// Internal temperature report settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermometerConfig {
    /// Ticks between conversions
    pub sample_period_ticks: u32,
}

impl Default for ThermometerConfig {
    fn default() -> Self {
        Self {
            sample_period_ticks: 1000,
        }
    }
}

impl Validate for ThermometerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_period_ticks == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Analog meter scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterConfig {
    /// ADC reference voltage
    pub vref_mv: u32,
    /// Count corresponding to the reference voltage
    pub adc_full_scale: u16,
    /// Count shown as 100 %
    pub percent_full_scale: u16,
}

impl MeterConfig {
    /// Potentiometer across the full supply range
    pub const POTENTIOMETER: Self = Self {
        vref_mv: VREF_MV,
        adc_full_scale: FULL_SCALE_12BIT,
        percent_full_scale: FULL_SCALE_12BIT,
    };

    /// Photoresistor divider, which never reaches the rail in practice
    pub const PHOTORESISTOR: Self = Self {
        vref_mv: VREF_MV,
        adc_full_scale: FULL_SCALE_12BIT,
        percent_full_scale: 3600,
    };
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self::POTENTIOMETER
    }
}

impl Validate for MeterConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.vref_mv == 0 || self.adc_full_scale == 0 || self.percent_full_scale == 0 {
            return Err(ConfigError::ZeroFullScale);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DebounceConfig::default().validate().is_ok());
        assert!(TrafficTimings::default().validate().is_ok());
        assert!(CountdownConfig::default().validate().is_ok());
        assert!(SweepConfig::default().validate().is_ok());
        assert!(HueConfig::default().validate().is_ok());
        assert!(ThermometerConfig::default().validate().is_ok());
        assert!(MeterConfig::POTENTIOMETER.validate().is_ok());
        assert!(MeterConfig::PHOTORESISTOR.validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = DebounceConfig { threshold_ticks: 0 };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounceThreshold));
    }

    #[test]
    fn test_zero_yellow_rejected() {
        let config = TrafficTimings {
            yellow_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn test_sweep_limits() {
        let inverted = SweepConfig {
            min_us: 2000,
            max_us: 1000,
            ..Default::default()
        };
        assert_eq!(inverted.validate(), Err(ConfigError::InvertedLimits));

        let outside = SweepConfig {
            start_us: 900,
            ..Default::default()
        };
        assert_eq!(outside.validate(), Err(ConfigError::StartOutOfRange));

        let long = SweepConfig {
            frame_us: 1500,
            ..Default::default()
        };
        assert_eq!(long.validate(), Err(ConfigError::PulseExceedsFrame));
    }

    #[test]
    fn test_zero_full_scale_rejected() {
        let config = MeterConfig {
            percent_full_scale: 0,
            ..MeterConfig::POTENTIOMETER
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFullScale));
    }
}
