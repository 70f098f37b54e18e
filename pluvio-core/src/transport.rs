//! Radio-serial transport seam
//!
//! The link hardware (an E32 class modem in transparent transmission mode)
//! is a raw half-duplex byte pipe. The core only needs an availability
//! query, a one-burst receive, and a send; everything else about the modem
//! stays in the board crate.

/// Byte-pipe transport over the half-duplex radio link.
///
/// Implementations own their timeout policy. The core never retries a
/// failed send or receive and never cancels one in flight; an operation
/// runs to completion or reports its error.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Error;

    /// Availability query: inbound bytes are waiting to be read.
    fn poll_ready(&mut self) -> Result<bool, Self::Error>;

    /// Send one complete wire frame.
    async fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Receive one inbound burst into `buf`, blocking until a full frame
    /// has arrived or the transport's own timeout elapses.
    ///
    /// Returns the number of bytes read.
    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
