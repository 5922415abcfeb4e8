//! Edge request flags

use portable_atomic::{AtomicBool, AtomicU16, Ordering};

/// Single pending request raised by the tick context
///
/// At most one request is outstanding. Raising a flag that has not been
/// taken yet does not queue a second request; it bumps the overrun
/// counter instead, so lost edges can be observed without changing the
/// one-pending behaviour.
pub struct RequestFlag {
    pending: AtomicBool,
    overruns: AtomicU16,
}

impl RequestFlag {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            overruns: AtomicU16::new(0),
        }
    }

    /// Mark a request pending
    ///
    /// Returns `false` if a request was already pending (the new one
    /// merged into it).
    pub fn raise(&self) -> bool {
        let was_pending = self.pending.swap(true, Ordering::AcqRel);
        if was_pending {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
        !was_pending
    }

    /// Consume the pending request, if any
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Check without consuming
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Number of requests merged into an already pending one (wrapping)
    pub fn overruns(&self) -> u16 {
        self.overruns.load(Ordering::Relaxed)
    }
}

impl Default for RequestFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_and_take() {
        let flag = RequestFlag::new();
        assert!(!flag.take());

        assert!(flag.raise());
        assert!(flag.is_pending());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_second_raise_is_merged() {
        let flag = RequestFlag::new();
        assert!(flag.raise());
        assert!(!flag.raise());
        assert_eq!(flag.overruns(), 1);

        // Still only one request to consume
        assert!(flag.take());
        assert!(!flag.take());
    }
}
