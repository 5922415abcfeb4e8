//! Configuration types
//!
//! Every exercise runs from compile-time constants. The structs here carry
//! those constants with their defaults and a `validate()` that rejects
//! values the runtime logic cannot work with.

pub mod types;

pub use types::*;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce threshold of zero ticks
    ZeroDebounceThreshold,
    /// A timed phase or period with zero length
    ZeroDuration,
    /// Lower limit is not below the upper limit
    InvertedLimits,
    /// Start value outside the configured limits
    StartOutOfRange,
    /// Step size of zero
    ZeroStep,
    /// Full-scale or reference value of zero
    ZeroFullScale,
    /// Servo pulse longer than the PWM frame
    PulseExceedsFrame,
}

/// Validation shared by all configuration structs
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}
