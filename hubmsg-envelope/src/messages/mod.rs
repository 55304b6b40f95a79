/// The message envelope
pub mod envelope;

/// User-defined properties
pub mod properties;

/// Send/receive completion callbacks
pub mod callback;

use serde::Serialize;
use std::fmt::{self, Display};

/// The kind of exchange a message takes part in
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    /// The type is not known
    Unknown,

    /// A device-to-cloud telemetry message
    DeviceTelemetry,

    /// A direct method invocation or response
    DeviceMethods,

    /// A twin read or update
    DeviceTwin,
}

impl Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MessageType::Unknown => "Unknown",
            MessageType::DeviceTelemetry => "Device Telemetry",
            MessageType::DeviceMethods => "Device Methods",
            MessageType::DeviceTwin => "Device Twin",
        };
        write!(f, "{}", text)
    }
}
