//! Lock-free byte ring buffer

use portable_atomic::{AtomicU32, AtomicU8, AtomicUsize, Ordering};

/// Error returned when the ring has no free slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingFull;

/// Fixed-capacity circular byte FIFO
///
/// One producer and one consumer, which may run in different contexts
/// (main loop and interrupt). `N` must be a power of two in `2..=256`;
/// indices wrap with a mask. One slot always stays empty so that
/// `head == tail` unambiguously means empty, giving a usable capacity
/// of `N - 1`.
///
/// Bytes that do not fit are dropped, never waited for. The number of
/// dropped bytes is kept in [`RingBuffer::dropped`].
pub struct RingBuffer<const N: usize> {
    slots: [AtomicU8; N],
    /// Next slot to write (owned by the producer)
    head: AtomicUsize,
    /// Next slot to read (owned by the consumer)
    tail: AtomicUsize,
    dropped: AtomicU32,
}

impl<const N: usize> RingBuffer<N> {
    const MASK: usize = N - 1;

    const VALID_SIZE: () = assert!(
        N.is_power_of_two() && N >= 2 && N <= 256,
        "ring size must be a power of two between 2 and 256"
    );

    /// Create an empty ring
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_SIZE;
        Self {
            slots: [const { AtomicU8::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Number of bytes the ring can hold
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Append one byte (producer side)
    pub fn push(&self, byte: u8) -> Result<(), RingFull> {
        let result = self.try_push(byte);
        if result.is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    /// Append as many bytes as fit (producer side)
    ///
    /// Returns how many leading bytes were stored. Everything after the
    /// first byte that did not fit is dropped, so a message is truncated
    /// rather than interleaved with holes.
    pub fn push_slice(&self, bytes: &[u8]) -> usize {
        for (stored, &byte) in bytes.iter().enumerate() {
            if self.try_push(byte).is_err() {
                let rest = (bytes.len() - stored) as u32;
                self.dropped.fetch_add(rest, Ordering::Relaxed);
                return stored;
            }
        }
        bytes.len()
    }

    /// Remove the oldest byte (consumer side)
    pub fn pop(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        let byte = self.slots[tail].load(Ordering::Relaxed);
        self.tail.store((tail + 1) & Self::MASK, Ordering::Release);
        Some(byte)
    }

    /// Oldest byte without removing it (consumer side)
    pub fn peek(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }
        Some(self.slots[tail].load(Ordering::Relaxed))
    }

    /// Number of bytes waiting
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail) & Self::MASK
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Whether the next push would be dropped
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Total bytes dropped on overflow since creation (wrapping)
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn try_push(&self, byte: u8) -> Result<(), RingFull> {
        let head = self.head.load(Ordering::Relaxed);
        let next = (head + 1) & Self::MASK;
        if next == self.tail.load(Ordering::Acquire) {
            return Err(RingFull);
        }

        self.slots[head].store(byte, Ordering::Relaxed);
        self.head.store(next, Ordering::Release);
        Ok(())
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::VecDeque;

    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn push_slice_keeps_prefix(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
            let ring: RingBuffer<64> = RingBuffer::new();
            let accepted = ring.push_slice(&bytes);

            prop_assert_eq!(accepted, bytes.len().min(63));
            prop_assert_eq!(ring.dropped() as usize, bytes.len() - accepted);

            let drained: Vec<u8> = core::iter::from_fn(|| ring.pop()).collect();
            prop_assert_eq!(&drained[..], &bytes[..accepted]);
        }

        #[test]
        fn interleaved_ops_match_fifo(ops in proptest::collection::vec(any::<Option<u8>>(), 0..500)) {
            let ring: RingBuffer<16> = RingBuffer::new();
            let mut model = VecDeque::new();

            for op in ops {
                match op {
                    Some(byte) => {
                        let result = ring.push(byte);
                        if model.len() < 15 {
                            prop_assert_eq!(result, Ok(()));
                            model.push_back(byte);
                        } else {
                            prop_assert_eq!(result, Err(RingFull));
                        }
                    }
                    None => prop_assert_eq!(ring.pop(), model.pop_front()),
                }
                prop_assert_eq!(ring.len(), model.len());
                prop_assert_eq!(ring.is_empty(), model.is_empty());
            }
        }
    }
}
