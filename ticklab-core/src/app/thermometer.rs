//! Internal temperature reported over the UART once a second
//!
//! Three contexts take part: the tick raises a start request every
//! sample period, the ADC completion posts the raw result, and the main
//! loop starts conversions, converts results and queues report lines.

use core::fmt::Write;

use heapless::String;
use ticklab_hal::{AnalogSource, ByteTransport};

use crate::bridge::{Mailbox, RequestFlag, SendReport, Shared, TxQueue};
use crate::config::ThermometerConfig;
use crate::convert::{temperature_from_raw, TemperatureReading};
use crate::tick::{Prescaler, TickHandler};

/// Transmit queue size
pub const TX_CAPACITY: usize = 64;

/// State touched by the tick, ADC and main contexts
pub struct ThermometerShared<T> {
    start: RequestFlag,
    elapsed_s: Shared<u32>,
    sample: Mailbox<u16>,
    tx: TxQueue<T, TX_CAPACITY>,
}

impl<T: ByteTransport> ThermometerShared<T> {
    pub const fn new(port: T) -> Self {
        Self {
            start: RequestFlag::new(),
            elapsed_s: Shared::new(0),
            sample: Mailbox::new(0),
            tx: TxQueue::new(port),
        }
    }

    /// ADC conversion complete
    pub fn on_conversion(&self, raw: u16) {
        self.sample.post(raw);
    }

    /// Transmitter ready event
    pub fn on_uart_ready(&self) {
        self.tx.on_ready();
    }

    pub fn elapsed_s(&self) -> u32 {
        self.elapsed_s.get()
    }

    pub fn tx(&self) -> &TxQueue<T, TX_CAPACITY> {
        &self.tx
    }
}

/// Tick-context half: paces conversions and counts seconds
pub struct ThermometerTick<'a, T> {
    shared: &'a ThermometerShared<T>,
    prescaler: Prescaler,
}

impl<'a, T: ByteTransport> ThermometerTick<'a, T> {
    pub fn new(shared: &'a ThermometerShared<T>, config: ThermometerConfig) -> Self {
        Self {
            shared,
            prescaler: Prescaler::new(config.sample_period_ticks),
        }
    }
}

impl<T: ByteTransport> TickHandler for ThermometerTick<'_, T> {
    fn on_tick(&mut self) {
        if self.prescaler.tick() {
            self.shared.elapsed_s.with(|s| *s = s.wrapping_add(1));
            self.shared.start.raise();
        }
    }
}

/// One report line
pub fn report_line(elapsed_s: u32, reading: TemperatureReading) -> String<48> {
    let mut line = String::new();
    let _ = write!(
        line,
        "T: {} s | {} K | {} C\r\n",
        elapsed_s, reading.kelvin, reading.celsius
    );
    line
}

/// What one main-loop pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermometerEvent {
    /// A conversion was started
    Started,
    /// No factory calibration; the cycle was skipped
    Uncalibrated,
    /// A reading was queued for transmission
    Sent(TemperatureReading, SendReport),
    /// A reading arrived while the previous line was still going out
    Busy(TemperatureReading),
}

/// Main-loop half: owns the ADC channel and the calibration value
pub struct ThermometerMain<'a, T, A> {
    shared: &'a ThermometerShared<T>,
    adc: A,
    calibration: u16,
}

impl<'a, T: ByteTransport, A: AnalogSource> ThermometerMain<'a, T, A> {
    pub fn new(shared: &'a ThermometerShared<T>, adc: A, calibration: u16) -> Self {
        Self {
            shared,
            adc,
            calibration,
        }
    }

    pub fn poll(&mut self) -> Option<ThermometerEvent> {
        if self.shared.start.take() {
            // A zero calibration would divide by zero; skip the whole cycle
            if self.calibration == 0 {
                return Some(ThermometerEvent::Uncalibrated);
            }
            self.adc.start_conversion();
            return Some(ThermometerEvent::Started);
        }

        let raw = self.shared.sample.take()?;
        let reading = temperature_from_raw(raw, self.calibration)?;
        if !self.shared.tx.is_idle() {
            return Some(ThermometerEvent::Busy(reading));
        }

        let line = report_line(self.shared.elapsed_s(), reading);
        let report = self.shared.tx.send(line.as_bytes());
        Some(ThermometerEvent::Sent(reading, report))
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }
}
