//! Request/response message carrier handed to every module

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque payload supplied by the transport layer
pub type MessagePayload = Arc<dyn Any + Send + Sync>;

/// Request and response messages of one exchange plus a shared property map.
///
/// The chain evaluator only forwards this value; modules may downcast the
/// payloads to whatever their transport provides.
#[derive(Clone, Default)]
pub struct MessageInfo {
    request: Option<MessagePayload>,
    response: Option<MessagePayload>,
    properties: HashMap<String, serde_json::Value>,
}

impl MessageInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request<T: Any + Send + Sync>(mut self, request: T) -> Self {
        self.request = Some(Arc::new(request));
        self
    }

    pub fn with_response<T: Any + Send + Sync>(mut self, response: T) -> Self {
        self.response = Some(Arc::new(response));
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Borrow the request payload as `T`, if present and of that type
    pub fn request<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.request.as_deref().and_then(|r| r.downcast_ref::<T>())
    }

    /// Borrow the response payload as `T`, if present and of that type
    pub fn response<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.response.as_deref().and_then(|r| r.downcast_ref::<T>())
    }

    pub fn set_request(&mut self, request: MessagePayload) {
        self.request = Some(request);
    }

    pub fn set_response(&mut self, response: MessagePayload) {
        self.response = Some(response);
    }

    pub fn has_request(&self) -> bool {
        self.request.is_some()
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn remove_property(&mut self, key: &str) -> Option<serde_json::Value> {
        self.properties.remove(key)
    }

    pub fn properties(&self) -> &HashMap<String, serde_json::Value> {
        &self.properties
    }
}

impl fmt::Debug for MessageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageInfo")
            .field("has_request", &self.has_request())
            .field("has_response", &self.has_response())
            .field("properties", &self.properties)
            .finish()
    }
}
