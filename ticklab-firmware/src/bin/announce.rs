//! Button announcer
//!
//! Four buttons; each confirmed press queues "Button C<n> Pressed!" on the
//! UART. The transmit ring is drained one byte per ready event.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::uart::{Blocking, UartTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::announce::{AnnounceMain, AnnounceShared, AnnounceTick};
use ticklab_core::bridge::CounterWatch;
use ticklab_core::config::{DebounceConfig, Validate};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, drain_forever, tick_forever};
use ticklab_hal_rp2040::uart::{ReadySignal, SignalledTx};
use ticklab_hal_rp2040::Button;

type Port = SignalledTx<'static, UartTx<'static, Blocking>>;

static UART_READY: ReadySignal = ReadySignal::new();
static SHARED: StaticCell<AnnounceShared<Port>> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: AnnounceTick<'static, Port, Button<'static>>) {
    tick_forever(TickPeriod::MS_1, tick).await
}

#[embassy_executor::task]
async fn uart_ready_task(shared: &'static AnnounceShared<Port>) {
    drain_forever(shared.tx(), &UART_READY).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Button announcer starting");
    let p = embassy_rp::init(Default::default());

    let debounce = DebounceConfig::default();
    if let Err(e) = debounce.validate() {
        error!("Invalid configuration: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let tx = board::uart0_tx(p.UART0, p.PIN_0);
    let shared: &'static AnnounceShared<Port> =
        SHARED.init(AnnounceShared::new(SignalledTx::new(tx, &UART_READY)));

    let buttons = [
        board::button(p.PIN_6),
        board::button(p.PIN_7),
        board::button(p.PIN_8),
        board::button(p.PIN_9),
    ];
    spawner.spawn(tick_task(AnnounceTick::new(shared, buttons, debounce))).unwrap();
    spawner.spawn(uart_ready_task(shared)).unwrap();

    let mut app = AnnounceMain::new(shared);
    let mut write_errors = CounterWatch::new();
    let mut lost_presses = CounterWatch::new();
    loop {
        if let Some((id, report)) = app.poll() {
            info!("Button C{} announced", id);
            if !report.is_complete() {
                warn!("Transmit ring full, {} bytes dropped", report.dropped);
            }
        }
        if let Some(lost) = lost_presses.delta(shared.lost_presses()) {
            warn!("{} presses replaced before they were announced", lost);
        }
        let errors = shared.tx().with_port(|port| port.write_errors());
        if let Some(failed) = write_errors.delta(errors) {
            warn!("UART refused {} bytes", failed);
        }
        yield_now().await;
    }
}
