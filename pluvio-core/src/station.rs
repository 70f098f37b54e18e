//! Link station: one endpoint's protocol state and loop unit
//!
//! Earlier firmware revisions grew separate, near-duplicate loops for
//! telemetry-only, config-command, and receive-then-send operation. The
//! station consolidates them: one `poll` services the receive side and the
//! telemetry send side in a single cooperative iteration, driven by the
//! active configuration.

use embassy_sync::blocking_mutex::raw::RawMutex;

use pluvio_protocol::{ConfigFrame, EventCode, TelemetryFrame, MAX_WIRE_SIZE};

use crate::config::ConfigSnapshot;
use crate::counter::PulseCounter;
use crate::cycler::EventCycler;
use crate::dispatch::{DispatchError, Inbound};
use crate::transport::Transport;

/// Station construction parameters
pub struct StationConfig<'a> {
    /// Event codes cycled through outgoing telemetry
    pub cycle_events: &'a [EventCode],
    /// Seconds between event cycle advances
    pub event_switch_interval_s: u32,
    /// Configuration active until a command replaces it
    pub initial: ConfigSnapshot,
}

/// Per-iteration link error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// Underlying transport failed; propagated, never retried here
    Transport(E),
    /// The received frame was rejected; the station stays usable
    Dispatch(DispatchError),
}

/// Protocol endpoint state: event cycle, active configuration, message-id
/// counter, and the telemetry send clock.
pub struct Station {
    cycler: EventCycler,
    active: ConfigSnapshot,
    message_id: u16,
    last_telemetry_ms: Option<u64>,
}

impl Station {
    pub fn new(config: StationConfig<'_>) -> Self {
        Self {
            cycler: EventCycler::new(config.cycle_events, config.event_switch_interval_s),
            active: config.initial,
            message_id: 0,
            last_telemetry_ms: None,
        }
    }

    /// Configuration currently installed on this endpoint.
    pub fn active_config(&self) -> ConfigSnapshot {
        self.active
    }

    fn next_message_id(&mut self) -> u16 {
        self.message_id = self.message_id.wrapping_add(1);
        self.message_id
    }

    fn telemetry_due(&self, now_ms: u64) -> bool {
        match self.last_telemetry_ms {
            None => true,
            Some(last) => {
                now_ms.saturating_sub(last) >= u64::from(self.active.wakeup_interval_sec) * 1000
            }
        }
    }

    /// One cooperative link iteration: service the receive side, then send
    /// telemetry when the report interval has elapsed.
    ///
    /// Each unit of work runs to completion; pacing between calls is the
    /// caller's concern. A dispatch error drops that one frame and leaves
    /// the station usable for the next iteration.
    pub async fn poll<T: Transport, M: RawMutex>(
        &mut self,
        link: &mut T,
        pulses: &PulseCounter<M>,
        now_ms: u64,
    ) -> Result<Option<Inbound>, LinkError<T::Error>> {
        let mut inbound = None;
        if link.poll_ready().map_err(LinkError::Transport)? {
            let mut buf = [0u8; MAX_WIRE_SIZE];
            let n = link.recv(&mut buf).await.map_err(LinkError::Transport)?;
            let message = Inbound::from_wire(&buf[..n]).map_err(LinkError::Dispatch)?;
            if let Inbound::ConfigApplied(snapshot) | Inbound::ConfigReset(snapshot) = message {
                self.active = snapshot;
                self.send_config_ack(link).await?;
            }
            inbound = Some(message);
        }

        if self.telemetry_due(now_ms) {
            self.send_telemetry(link, pulses, now_ms).await?;
        }
        Ok(inbound)
    }

    /// Build and send one telemetry frame from the cycled event code and
    /// the drained pulse count.
    pub async fn send_telemetry<T: Transport, M: RawMutex>(
        &mut self,
        link: &mut T,
        pulses: &PulseCounter<M>,
        now_ms: u64,
    ) -> Result<TelemetryFrame, LinkError<T::Error>> {
        let event = self.cycler.poll(now_ms);
        let frame = TelemetryFrame::new(
            self.next_message_id(),
            event.to_raw(),
            now_ms as u32,
            pulses.read_and_reset(),
        );
        link.send(&frame.to_wire())
            .await
            .map_err(LinkError::Transport)?;
        self.last_telemetry_ms = Some(now_ms);
        Ok(frame)
    }

    /// Issue SET_CONFIG carrying `settings` to the peer.
    pub async fn send_config_request<T: Transport>(
        &mut self,
        link: &mut T,
        settings: &ConfigSnapshot,
    ) -> Result<ConfigFrame, LinkError<T::Error>> {
        let frame = settings.to_frame(self.next_message_id(), EventCode::SetConfig);
        link.send(&frame.to_wire())
            .await
            .map_err(LinkError::Transport)?;
        Ok(frame)
    }

    /// Issue RESET_CONFIG. Parameter fields ride along zeroed; only the
    /// event code is meaningful to the responder.
    pub async fn send_config_reset<T: Transport>(
        &mut self,
        link: &mut T,
    ) -> Result<ConfigFrame, LinkError<T::Error>> {
        let frame = ConfigFrame::new(
            self.next_message_id(),
            EventCode::ResetConfig.to_raw(),
            0,
            0,
            0,
            0,
        );
        link.send(&frame.to_wire())
            .await
            .map_err(LinkError::Transport)?;
        Ok(frame)
    }

    /// Answer an applied command with the values actually installed.
    async fn send_config_ack<T: Transport>(
        &mut self,
        link: &mut T,
    ) -> Result<(), LinkError<T::Error>> {
        let message_id = self.next_message_id();
        let frame = self
            .active
            .to_frame(message_id, EventCode::SetConfigResponse);
        link.send(&frame.to_wire())
            .await
            .map_err(LinkError::Transport)
    }
}
