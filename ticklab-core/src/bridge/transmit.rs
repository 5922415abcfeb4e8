//! Interrupt-driven transmit queue

use ticklab_hal::ByteTransport;

use super::ring::RingBuffer;
use super::shared::Shared;

/// Outcome of queueing one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendReport {
    /// Bytes placed in the queue
    pub accepted: usize,
    /// Trailing bytes dropped because the queue was full
    pub dropped: usize,
}

impl SendReport {
    /// Whether the whole message was queued
    pub fn is_complete(&self) -> bool {
        self.dropped == 0
    }
}

/// Byte queue drained by the transport's "ready" event
///
/// The main loop calls [`TxQueue::send`]; the ready interrupt calls
/// [`TxQueue::on_ready`]. When the queue is full the rest of the message
/// is dropped (the main loop never waits for the UART). When the queue
/// runs empty the ready event is disabled so it does not keep firing.
pub struct TxQueue<T, const N: usize> {
    ring: RingBuffer<N>,
    port: Shared<T>,
}

impl<T: ByteTransport, const N: usize> TxQueue<T, N> {
    /// Create an empty queue in front of `port`
    pub const fn new(port: T) -> Self {
        Self {
            ring: RingBuffer::new(),
            port: Shared::new(port),
        }
    }

    /// Queue a message and arm the transport (main loop)
    pub fn send(&self, message: &[u8]) -> SendReport {
        let accepted = self.ring.push_slice(message);
        self.port.with(|port| port.set_ready_interrupt(true));
        SendReport {
            accepted,
            dropped: message.len() - accepted,
        }
    }

    /// Feed the next byte to the transport (ready interrupt)
    ///
    /// Returns `true` if a byte went out. A byte the transport refuses
    /// stays at the head of the queue and the event stays armed.
    ///
    /// The empty check and disarm happen under the same critical section
    /// as the arm in [`TxQueue::send`], so a message queued concurrently
    /// is never stranded with the event disabled.
    pub fn on_ready(&self) -> bool {
        self.port.with(|port| match self.ring.peek() {
            Some(byte) => {
                if port.try_write_byte(byte).is_err() {
                    return false;
                }
                self.ring.pop();
                true
            }
            None => {
                port.set_ready_interrupt(false);
                false
            }
        })
    }

    /// Whether everything queued so far has been handed to the transport
    pub fn is_idle(&self) -> bool {
        self.ring.is_empty()
    }

    /// Bytes still waiting
    pub fn pending(&self) -> usize {
        self.ring.len()
    }

    /// Total bytes dropped on overflow
    pub fn dropped(&self) -> u32 {
        self.ring.dropped()
    }

    /// Whether the transport's ready event is currently enabled
    pub fn is_armed(&self) -> bool {
        self.port.with(|port| port.ready_interrupt_enabled())
    }

    /// Access the transport directly
    pub fn with_port<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.port.with(f)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use heapless::Vec;
    use ticklab_hal::uart::WouldBlock;

    /// Transport that records written bytes
    #[derive(Default)]
    pub(crate) struct MockPort {
        pub(crate) written: Vec<u8, 256>,
        pub(crate) armed: bool,
        /// Refuse every byte while set
        pub(crate) full: bool,
    }

    impl ByteTransport for MockPort {
        fn try_write_byte(&mut self, byte: u8) -> Result<(), WouldBlock> {
            if self.full {
                return Err(WouldBlock);
            }
            let _ = self.written.push(byte);
            Ok(())
        }

        fn set_ready_interrupt(&mut self, enabled: bool) {
            self.armed = enabled;
        }

        fn ready_interrupt_enabled(&self) -> bool {
            self.armed
        }
    }

    impl MockPort {
        pub(crate) const fn new() -> Self {
            Self {
                written: Vec::new(),
                armed: false,
                full: false,
            }
        }
    }

    /// Fire the ready event until the transport disarms itself
    pub(crate) fn drain<const N: usize>(queue: &TxQueue<MockPort, N>) {
        let mut guard = 0;
        while queue.is_armed() && guard < 1024 {
            queue.on_ready();
            guard += 1;
        }
    }

    #[test]
    fn test_send_arms_and_drains() {
        let queue: TxQueue<MockPort, 16> = TxQueue::new(MockPort::new());
        let report = queue.send(b"hello");
        assert!(report.is_complete());
        assert!(queue.is_armed());

        drain(&queue);
        assert!(!queue.is_armed());
        assert!(queue.is_idle());
        queue.with_port(|port| assert_eq!(port.written.as_slice(), b"hello"));
    }

    #[test]
    fn test_overflow_truncates_message() {
        let queue: TxQueue<MockPort, 8> = TxQueue::new(MockPort::new());
        let report = queue.send(b"0123456789");
        assert_eq!(report.accepted, 7);
        assert_eq!(report.dropped, 3);
        assert_eq!(queue.dropped(), 3);

        drain(&queue);
        queue.with_port(|port| assert_eq!(port.written.as_slice(), b"0123456"));
    }

    #[test]
    fn test_refused_byte_is_kept() {
        let queue: TxQueue<MockPort, 8> = TxQueue::new(MockPort::new());
        queue.send(b"ab");
        queue.with_port(|port| port.full = true);

        assert!(!queue.on_ready());
        assert!(!queue.on_ready());
        assert!(queue.is_armed());
        assert_eq!(queue.pending(), 2);
        queue.with_port(|port| assert!(port.written.is_empty()));

        queue.with_port(|port| port.full = false);
        assert!(queue.on_ready());
        assert_eq!(queue.pending(), 1);
        drain(&queue);
        queue.with_port(|port| assert_eq!(port.written.as_slice(), b"ab"));
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn test_ready_on_empty_disarms() {
        let queue: TxQueue<MockPort, 8> = TxQueue::new(MockPort::new());
        queue.with_port(|port| port.armed = true);
        queue.on_ready();
        assert!(!queue.is_armed());
        queue.with_port(|port| assert!(port.written.is_empty()));
    }
}
