//! Random colour on each button press
//!
//! Every confirmed press draws a xorshift32 value and shows its low three
//! bits on the RGB LED. An all-off result is shown as red.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::random_colour::{
    RandomColourMain, RandomColourShared, RandomColourTick, Xorshift32, DEFAULT_SEED,
};
use ticklab_core::config::{DebounceConfig, Validate};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, tick_forever};
use ticklab_hal_rp2040::Button;

static SHARED: StaticCell<RandomColourShared> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: RandomColourTick<'static, Button<'static>>) {
    tick_forever(TickPeriod::MS_1, tick).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Random colour starting");
    let p = embassy_rp::init(Default::default());

    let debounce = DebounceConfig::default();
    if let Err(e) = debounce.validate() {
        error!("Invalid configuration: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let shared: &'static RandomColourShared = SHARED.init(RandomColourShared::new());
    let tick = RandomColourTick::new(shared, board::button(p.PIN_2), debounce);
    spawner.spawn(tick_task(tick)).unwrap();

    let led = board::rgb_leds(p.PIN_16, p.PIN_17, p.PIN_18);
    let mut app = RandomColourMain::new(shared, led, Xorshift32::new(DEFAULT_SEED));
    loop {
        if let Some(mask) = app.poll() {
            info!("Colour mask {=u8:b}", mask);
        }
        yield_now().await;
    }
}
