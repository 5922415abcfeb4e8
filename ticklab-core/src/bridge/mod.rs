//! Interrupt-to-main-loop handoff
//!
//! The tick callback (interrupt context) and the main loop share state
//! only through the types in this module:
//!
//! - [`Shared`] - any multi-field value, accessed inside a critical section
//! - [`RequestFlag`] - "an edge happened" bit, raised by the tick, taken by main
//! - [`Mailbox`] - latest-wins single slot with a freshness flag
//! - [`RingBuffer`] - lock-free single-producer/single-consumer byte FIFO
//! - [`TxQueue`] - ring buffer feeding an interrupt-paced transmitter
//! - [`CounterWatch`] - main-loop view of the drop and overrun counters
//!
//! Nothing here blocks. Producers that find no room drop data and count it.

pub mod flag;
pub mod mailbox;
pub mod ring;
pub mod shared;
pub mod transmit;
pub mod watch;

pub use flag::RequestFlag;
pub use mailbox::Mailbox;
pub use ring::{RingBuffer, RingFull};
pub use shared::Shared;
pub use transmit::{SendReport, TxQueue};
pub use watch::CounterWatch;
