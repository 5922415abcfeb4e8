//! Colour sensor readings on the LCD
//!
//! Polls the TCS34725 every 100 ms and shows the raw red, green and blue
//! counts in hex whenever one of them changes.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::colour_sensor::{ColourMonitor, MonitorError};
use ticklab_firmware::board;
use ticklab_firmware::runtime::blink_forever;

const POLL_INTERVAL_MS: u64 = 100;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Colour sensor starting");
    let p = embassy_rp::init(Default::default());

    let lcd = match board::lcd(p.I2C0, p.PIN_4, p.PIN_5) {
        Ok(lcd) => lcd,
        Err(e) => {
            error!("LCD init failed: {}", e);
            blink_forever(board::status_led(p.PIN_25)).await;
        }
    };

    let sensor = match board::colour_sensor(p.I2C1, p.PIN_10, p.PIN_11) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("Colour sensor init failed: {}", e);
            blink_forever(board::status_led(p.PIN_25)).await;
        }
    };

    let mut monitor = ColourMonitor::new(sensor, lcd);
    if let Err(e) = monitor.init() {
        error!("LCD write failed: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        match monitor.poll() {
            Ok(Some(rgb)) => debug!("Colour {}", rgb),
            Ok(None) => {}
            Err(MonitorError::Sensor(e)) => warn!("Sensor read failed: {}", e),
            Err(MonitorError::Display(e)) => warn!("LCD write failed: {}", e),
        }
        ticker.next().await;
    }
}
