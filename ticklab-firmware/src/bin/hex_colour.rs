//! RGB LED colour from hex digits received on the UART
//!
//! Send six hex digits (e.g. `ff8000`) to set red, green and blue. Any
//! other character discards the digits collected so far.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx};
use embedded_io_async::Read;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ticklab_core::app::hex_colour::{HexColourMain, HexColourShared};
use ticklab_core::bridge::CounterWatch;
use ticklab_firmware::board;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static SHARED: StaticCell<HexColourShared> = StaticCell::new();

/// Moves received bytes into the shared ring
#[embassy_executor::task]
async fn uart_rx_task(mut rx: BufferedUartRx, shared: &'static HexColourShared) {
    let mut buf = [0u8; 16];
    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    // Counted in the ring; reported by the main loop
                    let _ = shared.on_rx(byte);
                }
            }
            Err(e) => warn!("UART receive error: {:?}", e),
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hex colour receiver starting");
    let p = embassy_rp::init(Default::default());

    let (_tx, rx) = board::uart0(p.UART0, p.PIN_0, p.PIN_1, Irqs);
    let shared: &'static HexColourShared = SHARED.init(HexColourShared::new());
    spawner.spawn(uart_rx_task(rx, shared)).unwrap();

    let pwm = board::rgb_pwm(p.PWM_SLICE0, p.PWM_SLICE1, p.PIN_16, p.PIN_17, p.PIN_18);
    let mut app = HexColourMain::new(shared, pwm);
    let mut dropped = CounterWatch::new();
    loop {
        if let Some(colour) = app.poll() {
            info!("Colour {}", colour);
        }
        if let Some(lost) = dropped.delta(shared.dropped()) {
            warn!("Receive ring full, {} bytes dropped", lost);
        }
        yield_now().await;
    }
}
