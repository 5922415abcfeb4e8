//! LED at a fixed brightness

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::pwm::Pwm;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::dimmer::Dimmer;
use ticklab_hal_rp2040::pwm::led_config;
use ticklab_hal_rp2040::DutyChannel;

/// Brightness in percent
const BRIGHTNESS: u8 = 25;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Dimmer starting");
    let p = embassy_rp::init(Default::default());

    let (channel, _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, led_config()).split();
    let mut dimmer = Dimmer::new(DutyChannel::new(unwrap!(channel)));
    let compare = dimmer.set_percent(BRIGHTNESS);
    info!("Brightness {}% (compare {})", dimmer.percent(), compare);

    loop {
        Timer::after_secs(60).await;
        trace!("Heartbeat");
    }
}
