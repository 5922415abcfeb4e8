//! Task loops
//!
//! embassy tasks cannot be generic, so each binary declares thin
//! `#[embassy_executor::task]` wrappers around these.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker, Timer};

use ticklab_core::bridge::TxQueue;
use ticklab_core::fault::FailureBlinker;
use ticklab_core::tick::{TickHandler, TickPeriod};
use ticklab_hal::{ByteTransport, OutputPin};
use ticklab_hal_rp2040::adc::StartSignal;
use ticklab_hal_rp2040::uart::ReadySignal;

/// Call `handler.on_tick()` once per `period`, forever
///
/// Missed deadlines are not replayed; the ticker resynchronises.
pub async fn tick_forever<H: TickHandler>(period: TickPeriod, mut handler: H) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period.as_millis())));
    loop {
        ticker.next().await;
        handler.on_tick();
    }
}

/// Poll interval while the transport refuses bytes
const TX_BACKOFF: Duration = Duration::from_millis(1);

/// Feed a transmit queue to its transport whenever the transport is armed
///
/// Stands in for the "transmit register empty" interrupt: one byte per
/// pass until the queue disarms the transport. A refused byte is retried
/// after [`TX_BACKOFF`] so the UART interrupt can make room.
pub async fn drain_forever<T: ByteTransport, const N: usize>(
    queue: &TxQueue<T, N>,
    ready: &ReadySignal,
) -> ! {
    loop {
        ready.wait().await;
        while queue.is_armed() {
            if queue.on_ready() {
                yield_now().await;
            } else {
                Timer::after(TX_BACKOFF).await;
            }
        }
    }
}

/// Run one conversion per start request and hand the raw result over
pub async fn convert_forever(
    mut adc: Adc<'static, Async>,
    mut channel: Channel<'static>,
    start: &StartSignal,
    mut on_sample: impl FnMut(u16),
) -> ! {
    loop {
        start.wait().await;
        match adc.read(&mut channel).await {
            Ok(raw) => on_sample(raw),
            Err(e) => warn!("ADC conversion failed: {:?}", e),
        }
    }
}

/// Fatal start-up failure: toggle `pin` forever
pub async fn blink_forever<P: OutputPin>(pin: P) -> ! {
    error!("Start-up failed, halting");
    tick_forever(TickPeriod::MS_1, FailureBlinker::new(pin)).await
}
