//! Programmable countdown timer
//!
//! Button A adds time, button B starts or pauses. The LCD shows the state
//! and remaining seconds; the RGB LED shows red (paused), green (running)
//! or blue (expired).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::countdown::{CountdownMain, CountdownShared, CountdownTick};
use ticklab_core::bridge::CounterWatch;
use ticklab_core::config::{CountdownConfig, DebounceConfig, Validate};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, tick_forever};
use ticklab_hal_rp2040::Button;

static SHARED: StaticCell<CountdownShared> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: CountdownTick<'static, Button<'static>>) {
    tick_forever(TickPeriod::MS_1, tick).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Countdown starting");
    let p = embassy_rp::init(Default::default());

    let config = CountdownConfig::default();
    let debounce = DebounceConfig::default();
    if let Err(e) = config.validate().and(debounce.validate()) {
        error!("Invalid configuration: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let lcd = match board::lcd(p.I2C0, p.PIN_4, p.PIN_5) {
        Ok(lcd) => lcd,
        Err(e) => {
            error!("LCD init failed: {}", e);
            blink_forever(board::status_led(p.PIN_25)).await;
        }
    };

    let shared: &'static CountdownShared = SHARED.init(CountdownShared::new(config));
    let mut app = CountdownMain::new(shared, board::rgb_leds(p.PIN_16, p.PIN_17, p.PIN_18), lcd);
    if let Err(e) = app.init() {
        error!("LCD write failed: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let tick = CountdownTick::new(
        shared,
        board::button(p.PIN_2),
        board::button(p.PIN_3),
        debounce,
    );
    spawner.spawn(tick_task(tick)).unwrap();

    let mut overruns = CounterWatch::new();
    loop {
        match app.poll() {
            Ok(Some(state)) => info!("Timer {}", state),
            Ok(None) => {}
            Err(e) => warn!("LCD write failed: {}", e),
        }
        if let Some(lost) = overruns.delta(shared.overruns()) {
            warn!("{} button presses merged into a pending request", lost);
        }
        yield_now().await;
    }
}
