//! EBYTE E32 radio-serial modem wrapper
//!
//! The modem runs in transparent transmission mode: application bytes pass
//! through unmodified, so the link is a raw half-duplex byte pipe at the
//! UART. This wrapper only covers mode pin handling and burst-oriented
//! UART I/O; all protocol logic lives in pluvio-core.

use embassy_rp::gpio::{Input, Output};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx, Error as UartError};
use embassy_time::{with_timeout, Duration, Timer};
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};

use pluvio_core::Transport;

/// Gap that terminates one inbound burst
const INTERBYTE_TIMEOUT: Duration = Duration::from_millis(20);

/// Settling time after a mode switch, per the E32 datasheet
const MODE_SWITCH_DELAY: Duration = Duration::from_millis(50);

pub struct E32Link {
    tx: BufferedUartTx,
    rx: BufferedUartRx,
    aux: Input<'static>,
    m0: Output<'static>,
    m1: Output<'static>,
}

impl E32Link {
    pub fn new(
        tx: BufferedUartTx,
        rx: BufferedUartRx,
        aux: Input<'static>,
        m0: Output<'static>,
        m1: Output<'static>,
    ) -> Self {
        Self { tx, rx, aux, m0, m1 }
    }

    /// Drive M0/M1 low for transparent (normal) mode and wait for the modem
    /// to signal ready on AUX.
    pub async fn enter_normal_mode(&mut self) {
        self.m0.set_low();
        self.m1.set_low();
        if self.aux.is_low() {
            self.aux.wait_for_high().await;
        }
        Timer::after(MODE_SWITCH_DELAY).await;
    }
}

impl Transport for E32Link {
    type Error = UartError;

    fn poll_ready(&mut self) -> Result<bool, UartError> {
        self.rx.read_ready()
    }

    async fn send(&mut self, frame: &[u8]) -> Result<(), UartError> {
        self.tx.write_all(frame).await?;
        self.tx.flush().await
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
        // poll_ready gated this call, so the first read returns promptly;
        // the burst ends at the first interbyte gap or a full buffer.
        let mut filled = self.rx.read(buf).await?;
        while filled < buf.len() {
            match with_timeout(INTERBYTE_TIMEOUT, self.rx.read(&mut buf[filled..])).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => filled += n,
                Ok(Err(e)) => return Err(e),
                Err(_) => break,
            }
        }
        Ok(filled)
    }
}
