use crate::error::{MessageError, MessageResult};
use crate::identity::{ClientIdentity, HubEndpoint};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::messages::callback::{CallbackContext, CorrelatingMessageCallback};
use crate::messages::properties::{MessageProperty, PropertyList};
use crate::messages::MessageType;
use crate::time;
use chrono::{DateTime, Utc};
use log::{trace, warn};
use std::convert::TryFrom;
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

/// Content encoding set on messages built from text
pub const DEFAULT_CONTENT_ENCODING: &str = "utf-8";

/// Content encoding forced on security messages
pub const SECURITY_MESSAGE_CONTENT_ENCODING: &str = "application/json";

/// A unit of payload plus routing and correlation metadata, exchanged between a
/// device client and the hub.
///
/// A message is a plain record with no internal locking. It is owned by one
/// pipeline stage at a time and handed to the next by move; setters take
/// `&mut self`, so sharing one across threads requires the caller to serialize access.
#[derive(Clone)]
pub struct Message {
    message_id: String,
    correlation_id: String,
    to: Option<String>,
    user_id: Option<String>,
    connection_device_id: Option<String>,
    connection_module_id: Option<String>,
    input_name: Option<String>,
    output_name: Option<String>,
    delivery_acknowledgement: Option<String>,
    content_type: Option<String>,
    content_encoding: Option<String>,
    expiry_time: i64,
    creation_time_utc: Option<DateTime<Utc>>,
    component_name: Option<String>,
    is_security_message: bool,
    message_type: Option<MessageType>,
    sender: Option<HubEndpoint>,
    properties: PropertyList,
    body: Option<Vec<u8>>,
    correlating_message_callback: Option<Arc<dyn CorrelatingMessageCallback>>,
    correlating_message_callback_context: Option<CallbackContext>,
}

impl Message {
    /// Creates a message without a body. Identifiers are random UUIDs.
    pub fn new() -> Message {
        Message::new_with_ids(&UuidGenerator)
    }

    /// Creates a message without a body, taking identifiers from `ids`
    pub fn new_with_ids<G: IdGenerator + ?Sized>(ids: &G) -> Message {
        Message {
            message_id: ids.next_id(),
            correlation_id: ids.next_id(),
            to: None,
            user_id: None,
            connection_device_id: None,
            connection_module_id: None,
            input_name: None,
            output_name: None,
            delivery_acknowledgement: None,
            content_type: None,
            content_encoding: None,
            expiry_time: 0,
            creation_time_utc: None,
            component_name: None,
            is_security_message: false,
            message_type: None,
            sender: None,
            properties: PropertyList::new(),
            body: None,
            correlating_message_callback: None,
            correlating_message_callback_context: None,
        }
    }

    /// Creates a message whose body is `body`. The vector is kept as given.
    pub fn from_bytes(body: Vec<u8>) -> Message {
        Message::from_bytes_with_ids(body, &UuidGenerator)
    }

    /// Like [`Message::from_bytes`], taking identifiers from `ids`
    pub fn from_bytes_with_ids<G: IdGenerator + ?Sized>(body: Vec<u8>, ids: &G) -> Message {
        let mut message = Message::new_with_ids(ids);
        message.body = Some(body);
        message
    }

    /// Creates a message whose body is the UTF-8 encoding of `body`,
    /// with the content encoding set to `utf-8`
    pub fn from_text(body: &str) -> Message {
        Message::from_text_with_ids(body, &UuidGenerator)
    }

    /// Like [`Message::from_text`], taking identifiers from `ids`
    pub fn from_text_with_ids<G: IdGenerator + ?Sized>(body: &str, ids: &G) -> Message {
        let mut message = Message::from_bytes_with_ids(body.as_bytes().to_vec(), ids);
        message.content_encoding = Some(DEFAULT_CONTENT_ENCODING.to_owned());
        message
    }

    // ----- body -----

    /// Kept for compatibility with stream-based callers. Always returns `None`.
    #[deprecated(note = "Streaming bodies are not supported; use `bytes` or `body`")]
    pub fn body_stream(&self) -> Option<Cursor<Vec<u8>>> {
        None
    }

    /// A copy of the body, or `None` if the message has no body
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.body.clone()
    }

    /// A read-only view of the body
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    // ----- user-defined properties -----

    /// The value of the user-defined property `name`, if set
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }

    /// Adds or replaces a user-defined property. A replaced property moves to the end.
    pub fn set_property<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.properties.set(MessageProperty::new(name, value));
    }

    /// Like [`Message::set_property`], for callers holding possibly-absent values
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the name or the value is absent
    pub fn try_set_property(
        &mut self,
        name: Option<&str>,
        value: Option<&str>,
    ) -> MessageResult<()> {
        let name = name.ok_or_else(|| MessageError::invalid_argument("Property name cannot be absent"))?;
        let value =
            value.ok_or_else(|| MessageError::invalid_argument("Property value cannot be absent"))?;
        self.set_property(name, value);
        Ok(())
    }

    /// A copy of the user-defined properties, in order
    pub fn properties(&self) -> Vec<MessageProperty> {
        self.properties.to_vec()
    }

    // ----- expiry -----

    /// TRUE if the message has an expiry time and the current time is past it.
    /// Logs a warning every time an expired message is detected.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(time::now_millis())
    }

    /// Like [`Message::is_expired`], against the given clock reading (ms since epoch)
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        if self.expiry_time == 0 {
            return false;
        }

        if now_millis > self.expiry_time {
            warn!(
                "The message with correlation id {} expired",
                self.correlation_id()
            );
            return true;
        }

        false
    }

    /// Absolute expiry time in ms since epoch; 0 means the message never expires
    pub fn expiry_time(&self) -> i64 {
        self.expiry_time
    }

    /// Sets the expiry time relative to now. Negative timeouts are accepted
    /// and yield an already-expired message.
    pub fn set_expiry_time(&mut self, timeout_millis: i64) {
        self.expiry_time = time::now_millis().saturating_add(timeout_millis);
        trace!(
            "The message with message id {} has expiry time in {} milliseconds and will expire on {}",
            self.message_id,
            timeout_millis,
            self.expiry_time
        );
    }

    /// Sets the absolute expiry time (ms since epoch)
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the time is negative
    pub fn set_absolute_expiry_time(&mut self, absolute_millis: i64) -> MessageResult<()> {
        if absolute_millis < 0 {
            return Err(MessageError::invalid_argument("Expiry time may not be negative"));
        }

        self.expiry_time = absolute_millis;
        Ok(())
    }

    // ----- security -----

    /// Marks the message for the security delivery path and forces JSON content encoding.
    /// There is no way back.
    pub fn set_as_security_message(&mut self) {
        self.content_encoding = Some(SECURITY_MESSAGE_CONTENT_ENCODING.to_owned());
        self.is_security_message = true;
    }

    /// TRUE once [`Message::set_as_security_message`] was called
    pub fn is_security_message(&self) -> bool {
        self.is_security_message
    }

    // ----- creation time -----

    /// The creation time, if set
    pub fn creation_time_utc(&self) -> Option<&DateTime<Utc>> {
        self.creation_time_utc.as_ref()
    }

    /// Sets (or clears) the creation time
    pub fn set_creation_time_utc(&mut self, creation_time: Option<DateTime<Utc>>) {
        self.creation_time_utc = creation_time;
    }

    /// The creation time in the format IoT Hub accepts, e.g. `2008-10-01T17:04:32.0000000Z`
    pub fn creation_time_utc_string(&self) -> Option<String> {
        self.creation_time_utc
            .as_ref()
            .map(time::format_hub_timestamp)
    }

    // ----- system properties -----

    /// Correlates two-way requests and responses
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Replaces the message id
    pub fn set_message_id<S: Into<String>>(&mut self, message_id: S) {
        self.message_id = message_id.into();
    }

    /// Used in responses and feedback. Empty if cleared.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Replaces the correlation id
    pub fn set_correlation_id<S: Into<String>>(&mut self, correlation_id: S) {
        self.correlation_id = correlation_id.into();
    }

    /// The destination of the message
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// The entity that created the message (required in feedback messages)
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Sets the originating entity
    pub fn set_user_id<S: Into<String>>(&mut self, user_id: S) {
        self.user_id = Some(user_id.into());
    }

    /// The authenticated device id the message was sent with
    pub fn connection_device_id(&self) -> Option<&str> {
        self.connection_device_id.as_deref()
    }

    /// Stamps the authenticated device id
    pub fn set_connection_device_id<S: Into<String>>(&mut self, device_id: S) {
        self.connection_device_id = Some(device_id.into());
    }

    /// The authenticated module id the message was sent with
    pub fn connection_module_id(&self) -> Option<&str> {
        self.connection_module_id.as_deref()
    }

    /// Stamps the authenticated module id
    pub fn set_connection_module_id<S: Into<String>>(&mut self, module_id: S) {
        self.connection_module_id = Some(module_id.into());
    }

    /// Stamps both connection ids from an authenticated identity.
    /// A device identity leaves the module id untouched.
    pub fn stamp_connection_identity(&mut self, identity: &ClientIdentity) {
        self.set_connection_device_id(identity.device_id());
        if let Some(module_id) = identity.module_id() {
            self.set_connection_module_id(module_id);
        }
    }

    /// The input channel the message was received from (module routing)
    pub fn input_name(&self) -> Option<&str> {
        self.input_name.as_deref()
    }

    /// Sets the input channel name
    pub fn set_input_name<S: Into<String>>(&mut self, input_name: S) {
        self.input_name = Some(input_name.into());
    }

    /// The output channel to send to (module routing)
    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    /// Sets the output channel name
    pub fn set_output_name<S: Into<String>>(&mut self, output_name: S) {
        self.output_name = Some(output_name.into());
    }

    /// The delivery acknowledgement system property
    pub fn delivery_acknowledgement(&self) -> Option<&str> {
        self.delivery_acknowledgement.as_deref()
    }

    /// The content type, used in message routing. Unset by default.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Sets or clears the content type
    pub fn set_content_type(&mut self, content_type: Option<String>) {
        self.content_type = content_type;
    }

    /// The content encoding, used in message routing. Unset by default.
    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Sets or clears the content encoding
    pub fn set_content_encoding(&mut self, content_encoding: Option<String>) {
        self.content_encoding = content_encoding;
    }

    /// The Plug and Play component the message originated from
    pub fn component_name(&self) -> Option<&str> {
        self.component_name.as_deref()
    }

    /// Sets the Plug and Play component
    pub fn set_component_name<S: Into<String>>(&mut self, component_name: S) {
        self.component_name = Some(component_name.into());
    }

    /// The message type
    pub fn message_type(&self) -> Option<MessageType> {
        self.message_type
    }

    /// Sets the message type
    pub fn set_message_type(&mut self, message_type: MessageType) {
        self.message_type = Some(message_type);
    }

    /// The client that sends this message, when multiplexing
    pub fn sender(&self) -> Option<&HubEndpoint> {
        self.sender.as_ref()
    }

    /// Sets the sending client
    pub fn set_sender(&mut self, sender: HubEndpoint) {
        self.sender = Some(sender);
    }

    // ----- correlation callback -----

    /// The callback the pipeline notifies as this message progresses
    pub fn correlating_message_callback(&self) -> Option<&Arc<dyn CorrelatingMessageCallback>> {
        self.correlating_message_callback.as_ref()
    }

    /// Attaches the progress callback
    pub fn set_correlating_message_callback(
        &mut self,
        callback: Arc<dyn CorrelatingMessageCallback>,
    ) {
        self.correlating_message_callback = Some(callback);
    }

    /// The opaque state passed to the callback
    pub fn correlating_message_callback_context(&self) -> Option<&CallbackContext> {
        self.correlating_message_callback_context.as_ref()
    }

    /// Attaches opaque state for the callback
    pub fn set_correlating_message_callback_context(&mut self, context: CallbackContext) {
        self.correlating_message_callback_context = Some(context);
    }
}

impl Default for Message {
    fn default() -> Self {
        Message::new()
    }
}

impl TryFrom<Option<Vec<u8>>> for Message {
    type Error = MessageError;

    fn try_from(body: Option<Vec<u8>>) -> Result<Self, Self::Error> {
        body.map(Message::from_bytes)
            .ok_or_else(|| MessageError::invalid_argument("Message body cannot be absent"))
    }
}

impl TryFrom<Option<&str>> for Message {
    type Error = MessageError;

    fn try_from(body: Option<&str>) -> Result<Self, Self::Error> {
        body.map(Message::from_text)
            .ok_or_else(|| MessageError::invalid_argument("Message body cannot be absent"))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " Message details: ")?;
        if !self.correlation_id.is_empty() {
            write!(f, "Correlation Id [{}] ", self.correlation_id)?;
        }
        if !self.message_id.is_empty() {
            write!(f, "Message Id [{}] ", self.message_id)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("message_id", &self.message_id)
            .field("correlation_id", &self.correlation_id)
            .field("to", &self.to)
            .field("user_id", &self.user_id)
            .field("connection_device_id", &self.connection_device_id)
            .field("connection_module_id", &self.connection_module_id)
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("content_type", &self.content_type)
            .field("content_encoding", &self.content_encoding)
            .field("expiry_time", &self.expiry_time)
            .field("creation_time_utc", &self.creation_time_utc)
            .field("component_name", &self.component_name)
            .field("is_security_message", &self.is_security_message)
            .field("message_type", &self.message_type)
            .field("sender", &self.sender)
            .field("properties", &self.properties)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .field(
                "has_callback",
                &self.correlating_message_callback.is_some(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use chrono::TimeZone;
    use log::Level;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_new_generates_distinct_ids() {
        let sut = Message::new();
        assert!(!sut.message_id().is_empty());
        assert!(!sut.correlation_id().is_empty());
        assert_ne!(sut.message_id(), sut.correlation_id());
        assert_ne!(sut.message_id(), Message::new().message_id());
        assert_eq!(sut.bytes(), None);
        assert_eq!(sut.body(), None);
        assert!(!sut.is_security_message());
        assert_eq!(sut.expiry_time(), 0);
        assert!(sut.properties().is_empty());
    }

    #[test]
    fn test_injected_id_generator() {
        let ids = SequentialIdGenerator::new("test");
        let first = Message::new_with_ids(&ids);
        let second = Message::from_text_with_ids("x", &ids);
        assert_eq!(first.message_id(), "test-1");
        assert_eq!(first.correlation_id(), "test-2");
        assert_eq!(second.message_id(), "test-3");
        assert_eq!(second.correlation_id(), "test-4");
    }

    #[test]
    fn test_from_bytes_copy_on_read() {
        let payload = vec![0u8, 1, 2, 254, 255];
        let sut = Message::from_bytes(payload.clone());
        let read = sut.bytes().unwrap();
        assert_eq!(read, payload);
        assert_ne!(read.as_ptr(), sut.body().unwrap().as_ptr());

        let mut read = read;
        read[0] = 42;
        assert_eq!(sut.body().unwrap(), &payload[..]);
        assert_eq!(sut.content_encoding(), None);
    }

    #[test]
    fn test_from_bytes_keeps_buffer() {
        let payload = b"telemetry".to_vec();
        let address = payload.as_ptr();
        let sut = Message::from_bytes(payload);
        assert_eq!(sut.body().unwrap().as_ptr(), address);
    }

    #[test]
    fn test_from_text_is_utf8() {
        let text = "température: 21°C";
        let sut = Message::from_text(text);
        assert_eq!(sut.bytes().unwrap(), text.as_bytes().to_vec());
        assert_eq!(sut.content_encoding(), Some("utf-8"));
    }

    #[test]
    fn test_from_absent_body_fails() {
        let from_bytes = Message::try_from(None::<Vec<u8>>);
        assert!(matches!(from_bytes, Err(MessageError::InvalidArgument(_))));

        let from_text = Message::try_from(None::<&str>);
        assert!(matches!(from_text, Err(MessageError::InvalidArgument(_))));

        let ok = Message::try_from(Some("hello")).unwrap();
        assert_eq!(ok.body(), Some(&b"hello"[..]));
        assert_eq!(ok.content_encoding(), Some("utf-8"));

        let ok = Message::try_from(Some(vec![1u8, 2])).unwrap();
        assert_eq!(ok.body(), Some(&[1u8, 2][..]));
    }

    #[test]
    #[allow(deprecated)]
    fn test_body_stream_is_empty() {
        let sut = Message::from_text("payload");
        assert!(sut.body_stream().is_none());
        assert!(Message::new().body_stream().is_none());
    }

    #[test]
    fn test_property_set_get_overwrite() {
        let mut sut = Message::new();
        assert_eq!(sut.property("level"), None);

        sut.set_property("level", "info");
        sut.set_property("source", "sensor-1");
        assert_eq!(sut.property("level"), Some("info"));

        sut.set_property("level", "error");
        assert_eq!(sut.property("level"), Some("error"));
        let properties = sut.properties();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[1], MessageProperty::new("level", "error"));
    }

    #[test]
    fn test_try_set_property_absent_arguments() {
        let mut sut = Message::new();
        assert!(matches!(
            sut.try_set_property(None, Some("value")),
            Err(MessageError::InvalidArgument(_))
        ));
        assert!(matches!(
            sut.try_set_property(Some("name"), None),
            Err(MessageError::InvalidArgument(_))
        ));
        assert!(sut.properties().is_empty());

        sut.try_set_property(Some("name"), Some("value")).unwrap();
        assert_eq!(sut.property("name"), Some("value"));
    }

    #[test]
    fn test_properties_returns_copy() {
        let mut sut = Message::new();
        sut.set_property("a", "1");
        let mut copy = sut.properties();
        copy.clear();
        copy.push(MessageProperty::new("b", "2"));
        assert_eq!(sut.property("a"), Some("1"));
        assert_eq!(sut.property("b"), None);
        assert_eq!(sut.properties().len(), 1);
    }

    #[test]
    fn test_not_expired_by_default() {
        let sut = Message::new();
        assert!(!sut.is_expired());
        assert!(!sut.is_expired_at(i64::MAX));
    }

    #[test]
    fn test_absolute_expiry() {
        let mut sut = Message::new();
        assert!(matches!(
            sut.set_absolute_expiry_time(-1),
            Err(MessageError::InvalidArgument(_))
        ));
        assert_eq!(sut.expiry_time(), 0);

        sut.set_absolute_expiry_time(1).unwrap();
        assert_eq!(sut.expiry_time(), 1);
        assert!(sut.is_expired());

        sut.set_absolute_expiry_time(1_000).unwrap();
        assert!(!sut.is_expired_at(1_000));
        assert!(sut.is_expired_at(1_001));
    }

    #[test]
    fn test_absolute_expiry_zero_never_expires() {
        let mut sut = Message::new();
        sut.set_absolute_expiry_time(500).unwrap();
        sut.set_absolute_expiry_time(0).unwrap();
        assert!(!sut.is_expired());
    }

    #[test]
    fn test_relative_expiry() {
        let mut sut = Message::new();
        let before = time::now_millis();
        sut.set_expiry_time(60_000);
        let after = time::now_millis();
        assert!(sut.expiry_time() >= before + 60_000);
        assert!(sut.expiry_time() <= after + 60_000);
        assert!(!sut.is_expired());
    }

    #[test]
    fn test_negative_relative_expiry_is_expired() {
        let mut sut = Message::new();
        let before = time::now_millis();
        sut.set_expiry_time(-1_000);
        assert!(sut.expiry_time() < before);
        assert!(sut.is_expired());
    }

    #[test]
    fn test_expiry_warns_every_time() {
        let logger = hubmsg_test_utils::capture_logs();
        let mut sut = Message::new();
        sut.set_correlation_id("expired-corr-7f3a");
        sut.set_absolute_expiry_time(10).unwrap();

        assert!(sut.is_expired());
        assert!(sut.is_expired());

        let warnings = logger.records_containing(Level::Warn, "expired-corr-7f3a");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("expired"));
    }

    #[test]
    fn test_no_warning_when_not_expired() {
        let logger = hubmsg_test_utils::capture_logs();
        let mut sut = Message::new();
        sut.set_correlation_id("fresh-corr-c41d");
        sut.set_expiry_time(3_600_000);
        assert!(!sut.is_expired());
        assert!(logger
            .records_containing(Level::Warn, "fresh-corr-c41d")
            .is_empty());
    }

    #[test]
    fn test_security_message() {
        let mut sut = Message::from_text("{}");
        assert!(!sut.is_security_message());
        sut.set_as_security_message();
        assert!(sut.is_security_message());
        assert_eq!(sut.content_encoding(), Some("application/json"));

        sut.set_content_encoding(None);
        assert!(sut.is_security_message());
    }

    #[test]
    fn test_creation_time_string() {
        let mut sut = Message::new();
        assert_eq!(sut.creation_time_utc_string(), None);

        sut.set_creation_time_utc(Some(Utc.timestamp_millis_opt(0).unwrap()));
        let formatted = sut.creation_time_utc_string().unwrap();
        assert_eq!(formatted, "1970-01-01T00:00:00.0000000Z");
        assert!(formatted.ends_with('Z'));
        assert_eq!(&formatted[10..11], "T");
        let fraction = &formatted[20..formatted.len() - 1];
        assert_eq!(fraction.len(), 7);
        assert!(fraction.chars().all(|c| c.is_ascii_digit()));

        sut.set_creation_time_utc(None);
        assert_eq!(sut.creation_time_utc_string(), None);
    }

    #[test]
    fn test_display_summary() {
        let ids = SequentialIdGenerator::new("id");
        let mut sut = Message::new_with_ids(&ids);
        assert_eq!(
            sut.to_string(),
            " Message details: Correlation Id [id-2] Message Id [id-1] "
        );

        sut.set_correlation_id("");
        assert_eq!(sut.to_string(), " Message details: Message Id [id-1] ");
        assert_eq!(sut.correlation_id(), "");

        sut.set_message_id("");
        assert_eq!(sut.to_string(), " Message details: ");
    }

    #[test]
    fn test_routing_setters() {
        let mut sut = Message::new();
        assert_eq!(sut.to(), None);
        assert_eq!(sut.delivery_acknowledgement(), None);
        assert_eq!(sut.user_id(), None);

        sut.set_user_id("feedback-service");
        sut.set_input_name("input1");
        sut.set_output_name("output1");
        sut.set_content_type(Some("application/json".to_owned()));
        sut.set_component_name("thermostat1");
        sut.set_message_type(MessageType::DeviceTelemetry);

        assert_eq!(sut.user_id(), Some("feedback-service"));
        assert_eq!(sut.input_name(), Some("input1"));
        assert_eq!(sut.output_name(), Some("output1"));
        assert_eq!(sut.content_type(), Some("application/json"));
        assert_eq!(sut.component_name(), Some("thermostat1"));
        assert_eq!(sut.message_type(), Some(MessageType::DeviceTelemetry));
    }

    #[test]
    fn test_stamp_connection_identity() {
        let mut sut = Message::new();
        sut.stamp_connection_identity(&ClientIdentity::from_module_id("edge", "filter"));
        assert_eq!(sut.connection_device_id(), Some("edge"));
        assert_eq!(sut.connection_module_id(), Some("filter"));

        let mut sut = Message::new();
        sut.stamp_connection_identity(&ClientIdentity::from_device_id("sensor"));
        assert_eq!(sut.connection_device_id(), Some("sensor"));
        assert_eq!(sut.connection_module_id(), None);
    }

    #[test]
    fn test_sender_endpoint() {
        let mut sut = Message::new();
        assert!(sut.sender().is_none());
        let endpoint = HubEndpoint {
            hostname: "contoso.azure-devices.net".to_owned(),
            client_id: ClientIdentity::from_device_id("sensor"),
        };
        sut.set_sender(endpoint.clone());
        assert_eq!(sut.sender(), Some(&endpoint));
    }

    #[test]
    fn test_handoff_between_stages() {
        let (tx, rx) = mpsc::channel::<Message>();
        let mut sut = Message::from_text("reading");
        sut.set_property("stage", "created");
        let message_id = sut.message_id().to_owned();

        let stage = thread::spawn(move || {
            let mut message = rx.recv().unwrap();
            message.set_connection_device_id("sensor");
            message.set_property("stage", "stamped");
            message
        });

        tx.send(sut).unwrap();
        let stamped = stage.join().unwrap();
        assert_eq!(stamped.message_id(), message_id);
        assert_eq!(stamped.connection_device_id(), Some("sensor"));
        assert_eq!(stamped.property("stage"), Some("stamped"));
    }

    #[test]
    fn test_debug_omits_body_contents() {
        let sut = Message::from_text("secret-payload");
        let debug = format!("{:?}", sut);
        assert!(debug.contains("body_len: Some(14)"));
        assert!(!debug.contains("secret-payload"));
    }
}
