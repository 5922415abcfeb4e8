//! ADC conversion trigger
//!
//! embassy-rp conversions are async, so starting one just wakes the task
//! that owns the `Adc` and channel. That task posts the raw result to the
//! exercise's shared mailbox when the conversion completes.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use ticklab_hal::AnalogSource;

/// Signal carrying conversion requests to the ADC task
pub type StartSignal = Signal<CriticalSectionRawMutex, ()>;

/// [`AnalogSource`] that forwards start requests over a [`StartSignal`]
pub struct AdcTrigger<'a> {
    start: &'a StartSignal,
    requests: u32,
}

impl<'a> AdcTrigger<'a> {
    pub const fn new(start: &'a StartSignal) -> Self {
        Self {
            start,
            requests: 0,
        }
    }

    /// Conversions requested so far
    pub fn requests(&self) -> u32 {
        self.requests
    }
}

impl AnalogSource for AdcTrigger<'_> {
    fn start_conversion(&mut self) {
        self.requests = self.requests.wrapping_add(1);
        self.start.signal(());
    }
}
