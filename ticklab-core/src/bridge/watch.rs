//! Change detection for drop and overrun counters
//!
//! The bridge types only count lost data. The main loop polls those
//! counters through a [`CounterWatch`] and logs when they move, so nothing
//! is ever logged from tick context.

/// Last observed value of a monotonically increasing counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterWatch {
    last: u32,
}

impl CounterWatch {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Events counted since the previous call, `None` if nothing changed
    pub fn delta(&mut self, now: u32) -> Option<u32> {
        let delta = now.wrapping_sub(self.last);
        self.last = now;
        (delta != 0).then_some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_only_changes() {
        let mut watch = CounterWatch::new();
        assert_eq!(watch.delta(0), None);
        assert_eq!(watch.delta(3), Some(3));
        assert_eq!(watch.delta(3), None);
        assert_eq!(watch.delta(5), Some(2));
    }

    #[test]
    fn test_counter_wraparound() {
        let mut watch = CounterWatch::new();
        watch.delta(u32::MAX);
        assert_eq!(watch.delta(1), Some(2));
    }
}
