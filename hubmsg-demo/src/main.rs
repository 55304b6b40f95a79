#[macro_use] extern crate log;

use hubmsg_cli::Options;
use hubmsg_envelope::MessageType;
use serde_json::json;

pub fn main() {

    env_logger::init();
    debug!("Composing IoT Hub message");

    let options = Options::from_cmd_line();
    let mut message = match options.build_message() {
        Ok(message) => message,
        Err(e) => {
            error!("Could not build message: {}", e);
            std::process::exit(2);
        }
    };
    message.set_message_type(MessageType::DeviceTelemetry);

    println!("{}", message);

    let details = json!({
        "messageId": message.message_id(),
        "correlationId": message.correlation_id(),
        "messageType": message.message_type(),
        "contentType": message.content_type(),
        "contentEncoding": message.content_encoding(),
        "connectionDeviceId": message.connection_device_id(),
        "connectionModuleId": message.connection_module_id(),
        "outputName": message.output_name(),
        "componentName": message.component_name(),
        "creationTimeUtc": message.creation_time_utc_string(),
        "expiryTime": message.expiry_time(),
        "expired": message.is_expired(),
        "securityMessage": message.is_security_message(),
        "bodyLength": message.body().map(|body| body.len()),
        "properties": message.properties(),
    });

    match serde_json::to_string_pretty(&details) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Could not render message details: {}", e),
    }
}
