//! Board-agnostic core logic for the Ticklab exercises
//!
//! Every exercise is built from the same pieces:
//!
//! - [`debounce::DebounceCell`] - per-input debounce and edge detection
//! - [`tick`] - the periodic tick callback and time-division helpers
//! - [`bridge`] - interrupt-to-main-loop handoff (flags, mailboxes,
//!   ring buffers) guarded by critical sections
//! - [`state`] - pure state machines for the traffic light and countdown
//! - [`app`] - each exercise split into a tick-context half and a
//!   main-loop half
//! - [`config`] - compile-time configuration with validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod app;
pub mod bridge;
pub mod config;
pub mod convert;
pub mod debounce;
pub mod fault;
pub mod state;
pub mod text;
pub mod tick;
pub mod traits;
