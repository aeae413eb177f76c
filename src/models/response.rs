//! Uniform `{data, message}` response envelope.

use serde::Serialize;

/// Every response body has this shape. `data` is `null` on failure;
/// `message` is a string, or a field → message object for validation failures.
#[derive(Debug, Serialize)]
pub struct Envelope<T, M = String> {
    pub data: Option<T>,
    pub message: M,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
        }
    }
}

impl<M> Envelope<(), M> {
    pub fn error(message: M) -> Self {
        Self {
            data: None,
            message,
        }
    }
}
