//! Two-button traffic light
//!
//! Button A asks for green, button B for red. A request only takes effect
//! once the current phase has run its full time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::traffic::{TrafficMain, TrafficShared, TrafficTick};
use ticklab_core::bridge::CounterWatch;
use ticklab_core::config::{DebounceConfig, TrafficTimings, Validate};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, tick_forever};
use ticklab_hal_rp2040::Button;

static SHARED: StaticCell<TrafficShared> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: TrafficTick<'static, Button<'static>>) {
    tick_forever(TickPeriod::MS_1, tick).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Traffic light starting");
    let p = embassy_rp::init(Default::default());

    let timings = TrafficTimings::default();
    let debounce = DebounceConfig::default();
    if let Err(e) = timings.validate().and(debounce.validate()) {
        error!("Invalid configuration: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let shared: &'static TrafficShared = SHARED.init(TrafficShared::new(timings));

    let tick = TrafficTick::new(
        shared,
        board::button(p.PIN_2),
        board::button(p.PIN_3),
        debounce,
    );
    spawner.spawn(tick_task(tick)).unwrap();

    let lamps = [board::led(p.PIN_14), board::led(p.PIN_15)];
    let mut app = TrafficMain::new(shared, lamps);
    let mut overruns = CounterWatch::new();

    info!("Tick running, entering main loop");
    loop {
        if let Some(phase) = app.poll() {
            info!("Phase {}", phase);
        }
        if let Some(lost) = overruns.delta(shared.overruns()) {
            warn!("{} button presses merged into a pending request", lost);
        }
        yield_now().await;
    }
}
