//! Seconds counter on the LCD

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::clock::{ClockMain, ClockShared, ClockTick};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, tick_forever};

static SHARED: StaticCell<ClockShared> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: ClockTick<'static>) {
    tick_forever(TickPeriod::MS_1, tick).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Clock starting");
    let p = embassy_rp::init(Default::default());

    let lcd = match board::lcd(p.I2C0, p.PIN_4, p.PIN_5) {
        Ok(lcd) => lcd,
        Err(e) => {
            error!("LCD init failed: {}", e);
            blink_forever(board::status_led(p.PIN_25)).await;
        }
    };

    let shared: &'static ClockShared = SHARED.init(ClockShared::new());
    let mut app = ClockMain::new(shared, lcd);
    if let Err(e) = app.init() {
        error!("LCD write failed: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    spawner.spawn(tick_task(ClockTick::new(shared))).unwrap();

    loop {
        match app.poll() {
            Ok(Some(seconds)) => trace!("{} s", seconds),
            Ok(None) => {}
            Err(e) => warn!("LCD write failed: {}", e),
        }
        yield_now().await;
    }
}
