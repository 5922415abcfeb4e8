//! Die temperature over UART
//!
//! Once a second the tick requests a conversion of the internal
//! temperature sensor; the result goes out as
//! "T: <s> s | <K> K | <C> C".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::adc::{self, Adc, Async, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::uart::{Blocking, UartTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::thermometer::{
    ThermometerEvent, ThermometerMain, ThermometerShared, ThermometerTick,
};
use ticklab_core::config::{ThermometerConfig, Validate};
use ticklab_core::tick::TickPeriod;
use ticklab_firmware::board;
use ticklab_firmware::runtime::{blink_forever, convert_forever, drain_forever, tick_forever};
use ticklab_hal_rp2040::adc::StartSignal;
use ticklab_hal_rp2040::uart::{ReadySignal, SignalledTx};
use ticklab_hal_rp2040::AdcTrigger;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

/// Divisor for `K = raw * 358 / cal`
///
/// The RP2040 has no factory temperature calibration. 1045 puts the
/// datasheet's 0.706 V at 27 C (raw ~876) onto the same scale.
const TEMP_CALIBRATION: u16 = 1045;

type Port = SignalledTx<'static, UartTx<'static, Blocking>>;

static UART_READY: ReadySignal = ReadySignal::new();
static ADC_START: StartSignal = StartSignal::new();
static SHARED: StaticCell<ThermometerShared<Port>> = StaticCell::new();

#[embassy_executor::task]
async fn tick_task(tick: ThermometerTick<'static, Port>) {
    tick_forever(TickPeriod::MS_1, tick).await
}

#[embassy_executor::task]
async fn uart_ready_task(shared: &'static ThermometerShared<Port>) {
    drain_forever(shared.tx(), &UART_READY).await
}

#[embassy_executor::task]
async fn adc_task(
    adc: Adc<'static, Async>,
    channel: Channel<'static>,
    shared: &'static ThermometerShared<Port>,
) {
    convert_forever(adc, channel, &ADC_START, |raw| shared.on_conversion(raw)).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermometer starting");
    let p = embassy_rp::init(Default::default());

    let config = ThermometerConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        blink_forever(board::status_led(p.PIN_25)).await;
    }

    let tx = board::uart0_tx(p.UART0, p.PIN_0);
    let shared: &'static ThermometerShared<Port> =
        SHARED.init(ThermometerShared::new(SignalledTx::new(tx, &UART_READY)));

    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let channel = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);

    spawner.spawn(adc_task(adc, channel, shared)).unwrap();
    spawner.spawn(uart_ready_task(shared)).unwrap();
    spawner.spawn(tick_task(ThermometerTick::new(shared, config))).unwrap();

    let mut app = ThermometerMain::new(shared, AdcTrigger::new(&ADC_START), TEMP_CALIBRATION);
    loop {
        match app.poll() {
            Some(ThermometerEvent::Started) => trace!("Conversion started"),
            Some(ThermometerEvent::Uncalibrated) => warn!("No calibration value, sample skipped"),
            Some(ThermometerEvent::Sent(reading, report)) => {
                info!("{} K / {} C", reading.kelvin, reading.celsius);
                if !report.is_complete() {
                    warn!("Transmit ring full, {} bytes dropped", report.dropped);
                }
            }
            Some(ThermometerEvent::Busy(reading)) => {
                warn!("Previous report still sending, {} K not sent", reading.kelvin)
            }
            None => {}
        }
        yield_now().await;
    }
}
