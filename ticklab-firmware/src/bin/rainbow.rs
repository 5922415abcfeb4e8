//! Colour wheel on the RGB LED
//!
//! Every 50 ms the hue moves one step around red, green and blue.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::rainbow::{RainbowMain, RainbowShared, RainbowTick};
use ticklab_core::config::{HueConfig, Validate};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, tick_forever};

static SHARED: StaticCell<RainbowShared> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: RainbowTick<'static>) {
    tick_forever(TickPeriod::MS_50, tick).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Rainbow starting");
    let p = embassy_rp::init(Default::default());

    let config = HueConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let shared: &'static RainbowShared = SHARED.init(RainbowShared::new());
    let pwm = board::rgb_pwm(p.PWM_SLICE0, p.PWM_SLICE1, p.PIN_16, p.PIN_17, p.PIN_18);
    let mut app = RainbowMain::new(shared, pwm, config);

    spawner.spawn(tick_task(RainbowTick::new(shared))).unwrap();

    loop {
        if let Some(colour) = app.poll() {
            trace!("Colour {}", colour);
        }
        yield_now().await;
    }
}
