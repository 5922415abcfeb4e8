//! Input debouncing
//!
//! A [`DebounceCell`] accepts a new level only after the raw input has
//! disagreed with the confirmed level for `threshold` consecutive ticks.
//! Any agreeing sample in between resets the run.

/// Default number of ticks a change must persist (10 ms at a 1 ms tick)
pub const DEFAULT_THRESHOLD_TICKS: u8 = 10;

/// Confirmed transition of a debounced input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Input became active (pressed)
    Rising,
    /// Input became inactive (released)
    Falling,
}

/// Debounce state for one digital input
///
/// Mutated only from the tick context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceCell {
    confirmed: bool,
    run: u8,
    threshold: u8,
}

impl DebounceCell {
    /// Create a cell with the given initial level and threshold
    ///
    /// A threshold of 0 is treated as 1 (accept on the first dissenting
    /// sample).
    pub const fn new(initial: bool, threshold: u8) -> Self {
        Self {
            confirmed: initial,
            run: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Create a cell starting released (low) with the default threshold
    pub const fn released() -> Self {
        Self::new(false, DEFAULT_THRESHOLD_TICKS)
    }

    /// Feed one raw sample; call exactly once per tick
    pub fn update(&mut self, raw: bool) -> Option<Edge> {
        if raw == self.confirmed {
            self.run = 0;
            return None;
        }

        if self.run < self.threshold {
            self.run += 1;
        }

        if self.run < self.threshold {
            return None;
        }

        self.confirmed = raw;
        self.run = 0;
        Some(if raw { Edge::Rising } else { Edge::Falling })
    }

    /// Last confirmed level
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// Consecutive dissenting samples seen so far
    pub fn run_length(&self) -> u8 {
        self.run
    }

    /// Ticks a change must persist before it is accepted
    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for DebounceCell {
    fn default() -> Self {
        Self::released()
    }
}
