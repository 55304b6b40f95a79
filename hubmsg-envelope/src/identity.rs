use serde::Serialize;
use std::fmt;

/// A device or module identity, as authenticated by the hub
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClientIdentity {
    /// A device identity
    Device {
        /// The device ID
        device_id: String,
    },

    /// A device module identity
    Module {
        /// The device ID
        device_id: String,
        /// The module ID
        module_id: String,
    },
}

impl ClientIdentity {
    /// Creates a Device Identity from the specified device_id
    pub fn from_device_id(device_id: &str) -> ClientIdentity {
        ClientIdentity::Device {
            device_id: device_id.to_owned(),
        }
    }

    /// Creates a Module Identity from the specified device_id and module_id
    pub fn from_module_id(device_id: &str, module_id: &str) -> ClientIdentity {
        ClientIdentity::Module {
            device_id: device_id.to_owned(),
            module_id: module_id.to_owned(),
        }
    }

    /// The device ID (present for both devices and modules)
    pub fn device_id(&self) -> &str {
        match self {
            ClientIdentity::Device { device_id } => device_id,
            ClientIdentity::Module { device_id, .. } => device_id,
        }
    }

    /// The module ID, if this is a module identity
    pub fn module_id(&self) -> Option<&str> {
        match self {
            ClientIdentity::Device { .. } => None,
            ClientIdentity::Module { module_id, .. } => Some(module_id),
        }
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientIdentity::Device { device_id } => write!(f, "{}", device_id),
            ClientIdentity::Module {
                device_id,
                module_id,
            } => write!(f, "{}/{}", device_id, module_id),
        }
    }
}

/// The hub endpoint and identity of the client that sends a message.
/// Used when several device clients share one connection (multiplexing).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HubEndpoint {
    /// The IoT Hub host name
    pub hostname: String,

    /// The sending client
    pub client_id: ClientIdentity,
}

impl fmt::Display for HubEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/devices/{}", self.hostname, self.client_id)
    }
}
