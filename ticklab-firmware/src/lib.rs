//! Shared plumbing for the Ticklab exercise binaries
//!
//! Every binary under `src/bin/` follows the same shape:
//!
//! 1. Build the exercise's `…Shared` struct in a `StaticCell`
//! 2. Spawn a tick task that drives the tick half from an embassy `Ticker`
//! 3. Spawn completion tasks (UART ready, ADC, UART RX) where needed
//! 4. Run the main half's `poll()` in the `main` task, yielding between
//!    passes so the other tasks get the CPU
//!
//! [`board`] holds the pin map and peripheral constructors, [`runtime`]
//! the loops the tasks are built from.

#![no_std]

pub mod board;
pub mod runtime;
