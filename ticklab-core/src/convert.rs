//! Integer conversions used by the analog and PWM exercises
//!
//! All arithmetic is done in `u32`/`i32` without floating point. Divisors
//! that come from configuration or calibration are checked; a zero
//! divisor yields `None` so the caller can skip that cycle.

/// ADC reference voltage of the analog exercises, in millivolts
pub const VREF_MV: u32 = 3300;

/// Full-scale count of a 12-bit conversion
pub const FULL_SCALE_12BIT: u16 = 4095;

/// Scale factor of the internal temperature sensor calibration
pub const TEMP_SCALE: u32 = 358;

/// Offset between kelvin and degrees Celsius, rounded to whole degrees
pub const KELVIN_OFFSET: i32 = 273;

/// Convert a raw sample to millivolts
pub fn millivolts(raw: u16, full_scale: u16, vref_mv: u32) -> Option<u32> {
    if full_scale == 0 {
        return None;
    }
    Some(u32::from(raw) * vref_mv / u32::from(full_scale))
}

/// Split millivolts into whole volts and tenths for "x.y V" display
pub fn volts_and_tenths(mv: u32) -> (u32, u32) {
    (mv / 1000, (mv % 1000) / 100)
}

/// Percentage of `full_scale`
///
/// Not clamped: a photoresistor reading above its nominal maximum shows
/// more than 100 %.
pub fn percent(raw: u16, full_scale: u16) -> Option<u32> {
    if full_scale == 0 {
        return None;
    }
    Some(u32::from(raw) * 100 / u32::from(full_scale))
}

/// One converted temperature sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    pub kelvin: u32,
    pub celsius: i32,
}

/// Convert a raw internal temperature sample using the factory calibration
///
/// `kelvin = raw * 358 / cal`. Returns `None` when `cal` is zero (missing
/// calibration).
pub fn temperature_from_raw(raw: u16, cal: u16) -> Option<TemperatureReading> {
    if cal == 0 {
        return None;
    }
    let kelvin = u32::from(raw) * TEMP_SCALE / u32::from(cal);
    Some(TemperatureReading {
        kelvin,
        celsius: kelvin as i32 - KELVIN_OFFSET,
    })
}

/// Map a brightness percentage to an 8-bit PWM compare value
///
/// 0 % gives 0 (off), 100 % gives 255. Values above 100 are clamped.
pub fn brightness_to_compare(pct: u8) -> u8 {
    let pct = u16::from(pct.min(100));
    if pct == 0 {
        return 0;
    }
    let compare = pct * 256 / 100;
    compare.saturating_sub(1) as u8
}

/// Value of one ASCII hex digit, either case
pub fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
