use crate::messages::envelope::Message;
use std::any::Any;
use std::sync::Arc;

/// Opaque user state handed back to a [`CorrelatingMessageCallback`]
pub type CallbackContext = Arc<dyn Any + Send + Sync>;

/// Progress notifications for a message and its correlated response.
///
/// The envelope only carries the callback; the send/receive pipeline invokes it,
/// on whatever thread that pipeline uses. All hooks default to no-ops.
pub trait CorrelatingMessageCallback: Send + Sync {
    /// The request was accepted into the outgoing queue
    fn on_request_queued(&self, _message: &Message, _context: Option<&CallbackContext>) {}

    /// The request was written to the transport
    fn on_request_sent(&self, _message: &Message, _context: Option<&CallbackContext>) {}

    /// The hub acknowledged the request. `error` describes a failed delivery.
    fn on_request_acknowledged(
        &self,
        _message: &Message,
        _context: Option<&CallbackContext>,
        _error: Option<&str>,
    ) {
    }

    /// A response correlated with the request arrived
    fn on_response_received(
        &self,
        _response: &Message,
        _context: Option<&CallbackContext>,
        _error: Option<&str>,
    ) {
    }

    /// The response was acknowledged back to the hub
    fn on_response_acknowledged(&self, _response: &Message, _context: Option<&CallbackContext>) {}

    /// An acknowledgement arrived that matched no pending request
    fn on_unknown_message_acknowledged(
        &self,
        _message: &Message,
        _context: Option<&CallbackContext>,
        _error: Option<&str>,
    ) {
    }
}
