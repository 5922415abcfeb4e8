//! Servo sweep
//!
//! The pulse width walks between 1 ms and 2 ms in 10 us steps, one step
//! per 20 ms frame, reversing at either end.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::pwm::{Pwm, PwmOutput};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::servo::{ServoMain, ServoShared, ServoTick};
use ticklab_core::config::{SweepConfig, Validate};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, tick_forever};
use ticklab_hal_rp2040::pwm::servo_config;
use ticklab_hal_rp2040::DutyChannel;

static SHARED: StaticCell<ServoShared> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: ServoTick<'static, DutyChannel<PwmOutput<'static>>>) {
    tick_forever(TickPeriod::MS_20, tick).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Servo sweep starting");
    let p = embassy_rp::init(Default::default());

    let config = SweepConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let slice = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, servo_config(config.frame_us));
    let (_, signal) = slice.split();
    let pwm = DutyChannel::new(unwrap!(signal));

    let shared: &'static ServoShared = SHARED.init(ServoShared::new(config));
    spawner.spawn(tick_task(ServoTick::new(shared, pwm, config))).unwrap();

    let mut app = ServoMain::new(shared, config);
    loop {
        if let Some(pulse_us) = app.poll() {
            trace!("Pulse {} us", pulse_us);
        }
        yield_now().await;
    }
}
