//! Analog meter on the LCD
//!
//! Shows the ADC0 input as volts and as a percentage of the sensor's
//! usable range. Switch `SENSOR` to [`MeterConfig::PHOTORESISTOR`] for the
//! light-dependent resistor divider.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::adc::{self, Adc, Async, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::meter::{MeterMain, MeterShared};
use ticklab_core::config::{MeterConfig, Validate};
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, convert_forever};
use ticklab_hal_rp2040::adc::StartSignal;
use ticklab_hal_rp2040::AdcTrigger;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

const SENSOR: MeterConfig = MeterConfig::POTENTIOMETER;

static ADC_START: StartSignal = StartSignal::new();
static SHARED: StaticCell<MeterShared> = StaticCell::new();

#[embassy_executor::task]
async fn adc_task(
    adc: Adc<'static, Async>,
    channel: Channel<'static>,
    shared: &'static MeterShared,
) {
    convert_forever(adc, channel, &ADC_START, |raw| shared.on_conversion(raw)).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Meter starting");
    let p = embassy_rp::init(Default::default());

    if let Err(e) = SENSOR.validate() {
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

    let shared: &'static MeterShared = SHARED.init(MeterShared::new());
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let channel = Channel::new_pin(p.PIN_26, Pull::None);
    spawner.spawn(adc_task(adc, channel, shared)).unwrap();

    let mut app = MeterMain::new(shared, AdcTrigger::new(&ADC_START), lcd, SENSOR);
    if let Err(e) = app.init() {
        error!("LCD write failed: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    loop {
        match app.poll() {
            Ok(Some(raw)) => debug!("Sample {}", raw),
            Ok(None) => {}
            Err(e) => warn!("LCD write failed: {}", e),
        }
        yield_now().await;
    }
}
