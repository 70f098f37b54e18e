//! Event codes carried in the `event_id` field of both frame kinds

/// Enumerated link events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventCode {
    /// Resume normal sleep mode (deep sleep allowed)
    ResumeSleep,
    /// Disable sleep mode (stay awake)
    DisableSleep,
    /// Request a dump of the radio parameters
    SendLoraParams,
    /// Request a dump of the program parameters
    SendProgParams,
    /// Set configuration parameters
    SetConfig,
    /// Configuration applied, echoing the installed values
    SetConfigResponse,
    /// Reset configuration to the compiled-in defaults
    ResetConfig,
}

// Wire format values
const EVENT_RESUME_SLEEP: u16 = 0x0001;
const EVENT_DISABLE_SLEEP: u16 = 0x0002;
const EVENT_SEND_LORA_PARAMS: u16 = 0x0003;
const EVENT_SEND_PROG_PARAMS: u16 = 0x0004;
const EVENT_SET_CONFIG: u16 = 0x0005;
const EVENT_SET_CONFIG_RESPONSE: u16 = 0x1005;
const EVENT_RESET_CONFIG: u16 = 0x0006;

impl EventCode {
    /// Parse an event from its wire format value
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            EVENT_RESUME_SLEEP => Some(EventCode::ResumeSleep),
            EVENT_DISABLE_SLEEP => Some(EventCode::DisableSleep),
            EVENT_SEND_LORA_PARAMS => Some(EventCode::SendLoraParams),
            EVENT_SEND_PROG_PARAMS => Some(EventCode::SendProgParams),
            EVENT_SET_CONFIG => Some(EventCode::SetConfig),
            EVENT_SET_CONFIG_RESPONSE => Some(EventCode::SetConfigResponse),
            EVENT_RESET_CONFIG => Some(EventCode::ResetConfig),
            _ => None,
        }
    }

    /// Convert to wire format value
    pub fn to_raw(self) -> u16 {
        match self {
            EventCode::ResumeSleep => EVENT_RESUME_SLEEP,
            EventCode::DisableSleep => EVENT_DISABLE_SLEEP,
            EventCode::SendLoraParams => EVENT_SEND_LORA_PARAMS,
            EventCode::SendProgParams => EVENT_SEND_PROG_PARAMS,
            EventCode::SetConfig => EVENT_SET_CONFIG,
            EventCode::SetConfigResponse => EVENT_SET_CONFIG_RESPONSE,
            EventCode::ResetConfig => EVENT_RESET_CONFIG,
        }
    }

    /// Returns true for codes that mutate the receiver's configuration.
    ///
    /// These demand a valid checksum before they are acted on.
    pub fn is_config_command(self) -> bool {
        matches!(self, EventCode::SetConfig | EventCode::ResetConfig)
    }
}
