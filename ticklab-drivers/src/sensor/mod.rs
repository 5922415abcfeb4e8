//! Sensor drivers

pub mod tcs34725;

pub use tcs34725::{SensorError, Tcs34725, TCS34725_ADDRESS};
