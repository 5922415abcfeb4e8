//! Board wiring for the exercise kit
//!
//! | signal                 | pin        | peripheral         |
//! |------------------------|------------|--------------------|
//! | UART TX / RX           | GP0 / GP1  | UART0 (9600 8N1)   |
//! | button A / B           | GP2 / GP3  | GPIO, pull-up      |
//! | LCD SDA / SCL          | GP4 / GP5  | I2C0, PCF8574 0x27 |
//! | announcer buttons C4-C7| GP6 - GP9  | GPIO, pull-up      |
//! | colour sensor SDA / SCL| GP10 / GP11| I2C1, TCS34725 0x29|
//! | red / green lamp       | GP14 / GP15| GPIO               |
//! | servo signal           | GP15       | PWM slice 7 B      |
//! | RGB LED R / G / B      | GP16 - GP18| PWM slices 0 A/B, 1 A, or GPIO |
//! | status LED             | GP25       | GPIO               |
//! | analog input           | GP26       | ADC0               |
//!
//! Buttons short the pin to ground, so they are read active-low.

use defmt::*;
use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt::typelevel::{Binding, UART0_IRQ};
use embassy_rp::peripherals::{
    I2C0, I2C1, PIN_0, PIN_1, PIN_10, PIN_11, PIN_16, PIN_17, PIN_18, PIN_25, PIN_4, PIN_5,
    PWM_SLICE0, PWM_SLICE1, UART0,
};
use embassy_rp::pwm::{Pwm, PwmOutput};
use embassy_rp::uart::{
    Blocking, BufferedInterruptHandler, BufferedUartRx, BufferedUartTx, Uart, UartTx,
};
use embassy_rp::Peri;
use embassy_time::Delay;
use static_cell::StaticCell;

use ticklab_drivers::lcd::{Hd44780, LcdError};
use ticklab_drivers::sensor::{SensorError, Tcs34725};
use ticklab_hal::i2c::I2cConfig;
use ticklab_hal::uart::UartConfig;
use ticklab_hal_rp2040::pwm::led_config;
use ticklab_hal_rp2040::uart::uart_config;
use ticklab_hal_rp2040::{Button, DutyChannel, I2cAdapter, I2cBusError, Led};

/// Character LCD on I2C0
pub type Lcd = Hd44780<I2cAdapter<I2c<'static, I2C0, i2c::Blocking>>, Delay>;

/// Colour sensor on I2C1
pub type ColourSensor = Tcs34725<I2cAdapter<I2c<'static, I2C1, i2c::Blocking>>, Delay>;

/// Three dimmable LED channels, red first
pub type RgbPwm = [DutyChannel<PwmOutput<'static>>; 3];

const UART_TX_BUF: usize = 64;
const UART_RX_BUF: usize = 64;

/// Push button to ground
pub fn button(pin: Peri<'static, impl Pin>) -> Button<'static> {
    Button::active_low(Input::new(pin, Pull::Up))
}

/// LED, initially off
pub fn led(pin: Peri<'static, impl Pin>) -> Led<'static> {
    Led::new(Output::new(pin, Level::Low))
}

/// On-board LED used for the failure blink
pub fn status_led(pin: Peri<'static, PIN_25>) -> Led<'static> {
    led(pin)
}

/// RGB LED driven as three on/off outputs
pub fn rgb_leds(
    red: Peri<'static, PIN_16>,
    green: Peri<'static, PIN_17>,
    blue: Peri<'static, PIN_18>,
) -> [Led<'static>; 3] {
    [led(red), led(green), led(blue)]
}

/// RGB LED driven as three 8-bit PWM channels
pub fn rgb_pwm(
    slice0: Peri<'static, PWM_SLICE0>,
    slice1: Peri<'static, PWM_SLICE1>,
    red: Peri<'static, PIN_16>,
    green: Peri<'static, PIN_17>,
    blue: Peri<'static, PIN_18>,
) -> RgbPwm {
    let (red, green) = Pwm::new_output_ab(slice0, red, green, led_config()).split();
    let (blue, _) = Pwm::new_output_a(slice1, blue, led_config()).split();
    [
        DutyChannel::new(unwrap!(red)),
        DutyChannel::new(unwrap!(green)),
        DutyChannel::new(unwrap!(blue)),
    ]
}

fn i2c_config(config: I2cConfig) -> i2c::Config {
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("I2C settings rejected ({}), using standard mode", e);
            I2cConfig::STANDARD
        }
    };
    let mut rp = i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}

fn uart_settings() -> UartConfig {
    let config = UartConfig::default();
    if let Err(e) = config.validate() {
        warn!("UART settings rejected ({}), using 9600 8N1", e);
        return UartConfig {
            baudrate: 9600,
            ..config
        };
    }
    config
}

/// Bring up the LCD; a missing backpack is reported as a bus error
pub fn lcd(
    i2c: Peri<'static, I2C0>,
    sda: Peri<'static, PIN_4>,
    scl: Peri<'static, PIN_5>,
) -> Result<Lcd, LcdError<I2cBusError>> {
    let bus = I2c::new_blocking(i2c, scl, sda, i2c_config(I2cConfig::STANDARD));
    let mut lcd = Hd44780::new(I2cAdapter::new(bus), Delay);
    lcd.init()?;
    info!("LCD initialised");
    Ok(lcd)
}

/// Bring up the colour sensor and enable its integrator
pub fn colour_sensor(
    i2c: Peri<'static, I2C1>,
    sda: Peri<'static, PIN_10>,
    scl: Peri<'static, PIN_11>,
) -> Result<ColourSensor, SensorError<I2cBusError>> {
    let bus = I2c::new_blocking(i2c, scl, sda, i2c_config(I2cConfig::STANDARD));
    let mut sensor = Tcs34725::new(I2cAdapter::new(bus), Delay);
    sensor.init()?;
    info!("Colour sensor initialised");
    Ok(sensor)
}

/// UART0 at the exercise settings, split into buffered halves
pub fn uart0(
    uart: Peri<'static, UART0>,
    tx: Peri<'static, PIN_0>,
    rx: Peri<'static, PIN_1>,
    irqs: impl Binding<UART0_IRQ, BufferedInterruptHandler<UART0>>,
) -> (BufferedUartTx, BufferedUartRx) {
    static TX_BUF: StaticCell<[u8; UART_TX_BUF]> = StaticCell::new();
    static RX_BUF: StaticCell<[u8; UART_RX_BUF]> = StaticCell::new();

    let tx_buf = TX_BUF.init([0u8; UART_TX_BUF]);
    let rx_buf = RX_BUF.init([0u8; UART_RX_BUF]);

    let config = uart_settings();
    let uart = Uart::new_blocking(uart, tx, rx, uart_config(&config));
    let uart = uart.into_buffered(irqs, tx_buf, rx_buf);
    info!("UART0 at {} baud", config.baudrate);
    uart.split()
}

/// UART0 transmit half only, unbuffered
///
/// Writes go straight to the 32-byte hardware FIFO, which reports when it
/// is full instead of waiting.
pub fn uart0_tx(
    uart: Peri<'static, UART0>,
    tx: Peri<'static, PIN_0>,
) -> UartTx<'static, Blocking> {
    let config = uart_settings();
    let tx = UartTx::new_blocking(uart, tx, uart_config(&config));
    info!("UART0 TX at {} baud", config.baudrate);
    tx
}
