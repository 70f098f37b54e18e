//! Pluvio - Rain Sensor LoRa Bridge Firmware
//!
//! Bridge-side binary for RP2040-based boards: drives the E32 modem link,
//! counts rain gauge pulses, and reports peer telemetry on the console.
//!
//! Named after the Latin "pluvia" (rain) - the sensor end of the link
//! counts rain gauge bucket tips and reports them over the radio.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::e32::E32Link;

mod channels;
mod e32;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pluvio firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART for the E32 modem: 9600 8N1, its transparent-mode rate
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = 9600;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_12, p.PIN_13, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    // E32 mode pins: M0/M1 select the operating mode, AUX reports ready
    let m0 = Output::new(p.PIN_10, Level::Low);
    let m1 = Output::new(p.PIN_11, Level::Low);
    let aux = Input::new(p.PIN_14, Pull::Up);

    let mut link = E32Link::new(tx, rx, aux, m0, m1);
    link.enter_normal_mode().await;
    info!("E32 modem in transparent mode");

    // Rain gauge hall sensor input
    let pulse_pin = Input::new(p.PIN_8, Pull::Up);

    // Spawn tasks
    spawner.spawn(tasks::pulse_task(pulse_pin)).unwrap();
    spawner.spawn(tasks::link_task(link)).unwrap();
    spawner.spawn(tasks::report_task()).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
