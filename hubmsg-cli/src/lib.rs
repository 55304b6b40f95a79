use chrono::Utc;
use hubmsg_envelope::{ClientIdentity, Message, MessageError};
use log::debug;
use structopt::StructOpt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid message: {0}")]
    Message(#[from] MessageError),

    #[error("Invalid base64 body: {0}")]
    Body(#[from] base64::DecodeError),

    #[error("{0} and {1} cannot be used together")]
    Conflict(&'static str, &'static str),

    #[error("--module requires --device")]
    ModuleWithoutDevice,
}

#[derive(StructOpt, Debug)]
#[structopt(name = "hubmsg")]
pub struct Options {
    #[structopt(long = "text")]
    pub text: Option<String>,

    #[structopt(long = "base64")]
    pub base64_body: Option<String>,

    #[structopt(
        short = "P",
        long = "property",
        parse(try_from_str = "parse_property")
    )]
    pub properties: Vec<(String, String)>,

    #[structopt(long = "message-id")]
    pub message_id: Option<String>,

    #[structopt(long = "correlation-id")]
    pub correlation_id: Option<String>,

    #[structopt(long = "content-type")]
    pub content_type: Option<String>,

    #[structopt(long = "content-encoding")]
    pub content_encoding: Option<String>,

    #[structopt(long = "output-name")]
    pub output_name: Option<String>,

    #[structopt(long = "component")]
    pub component: Option<String>,

    #[structopt(short = "d", long = "device")]
    pub device_id: Option<String>,

    #[structopt(short = "m", long = "module")]
    pub module_id: Option<String>,

    #[structopt(long = "expires-in-ms", raw(allow_hyphen_values = "true"))]
    pub expires_in_ms: Option<i64>,

    #[structopt(long = "expires-at-ms", raw(allow_hyphen_values = "true"))]
    pub expires_at_ms: Option<i64>,

    #[structopt(long = "stamp-creation-time")]
    pub stamp_creation_time: bool,

    #[structopt(long = "security")]
    pub security: bool,
}

fn parse_property(arg: &str) -> Result<(String, String), String> {
    let mut parts = arg.splitn(2, '=');
    match (parts.next(), parts.next()) {
        (Some(name), Some(value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("Expected name=value, got '{}'", arg)),
    }
}

impl Options {
    pub fn from_cmd_line() -> Options {
        Options::from_args()
    }

    pub fn get_identity(&self) -> Result<Option<ClientIdentity>, CliError> {
        match (&self.device_id, &self.module_id) {
            (Some(device), Some(module)) => Ok(Some(ClientIdentity::from_module_id(device, module))),
            (Some(device), None) => Ok(Some(ClientIdentity::from_device_id(device))),
            (None, Some(_)) => Err(CliError::ModuleWithoutDevice),
            (None, None) => Ok(None),
        }
    }

    pub fn build_message(&self) -> Result<Message, CliError> {
        let mut message = match (&self.text, &self.base64_body) {
            (Some(_), Some(_)) => return Err(CliError::Conflict("--text", "--base64")),
            (Some(text), None) => Message::from_text(text),
            (None, Some(encoded)) => Message::from_bytes(base64::decode(encoded)?),
            (None, None) => Message::new(),
        };

        if let Some(ref message_id) = self.message_id {
            message.set_message_id(message_id.as_str());
        }
        if let Some(ref correlation_id) = self.correlation_id {
            message.set_correlation_id(correlation_id.as_str());
        }

        for (name, value) in &self.properties {
            message.set_property(name.as_str(), value.as_str());
        }

        if self.content_type.is_some() {
            message.set_content_type(self.content_type.clone());
        }
        if self.content_encoding.is_some() {
            message.set_content_encoding(self.content_encoding.clone());
        }
        if let Some(ref output_name) = self.output_name {
            message.set_output_name(output_name.as_str());
        }
        if let Some(ref component) = self.component {
            message.set_component_name(component.as_str());
        }
        if let Some(identity) = self.get_identity()? {
            message.stamp_connection_identity(&identity);
        }

        match (self.expires_in_ms, self.expires_at_ms) {
            (Some(_), Some(_)) => {
                return Err(CliError::Conflict("--expires-in-ms", "--expires-at-ms"))
            }
            (Some(timeout), None) => message.set_expiry_time(timeout),
            (None, Some(absolute)) => message.set_absolute_expiry_time(absolute)?,
            (None, None) => {}
        }

        if self.stamp_creation_time {
            message.set_creation_time_utc(Some(Utc::now()));
        }

        if self.security {
            message.set_as_security_message();
        }

        debug!("Built message {}", message);
        Ok(message)
    }
}
