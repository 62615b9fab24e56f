use std::error::Error;
use std::fmt;

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::HttpError;

/// Boxed error owned by an envelope
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Structured key/value context attached to an envelope for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Attribute name
    pub key: String,
    /// Attribute value
    pub value: Value,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Attribute {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Plain error made from message text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Message(pub String);

/// An error paired with an explicit HTTP status
///
/// The display text is the wrapped error's text, optionally prefixed with a
/// message as `"{message}: {cause}"`. `source()` yields the wrapped error so
/// chain checks see through the envelope.
#[derive(Debug)]
pub struct StatusEnvelope {
    message: Option<String>,
    attributes: Vec<Attribute>,
    cause: BoxError,
    status: StatusCode,
}

impl StatusEnvelope {
    /// Create an envelope around a fresh error made from `message`
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self::wrap("", Message(message.into()), status)
    }

    /// Wrap an existing error with a status
    ///
    /// An empty `message` leaves the error's text unchanged.
    pub fn wrap(message: impl Into<String>, err: impl Into<BoxError>, status: StatusCode) -> Self {
        let message = message.into();
        Self {
            message: (!message.is_empty()).then_some(message),
            attributes: Vec::new(),
            cause: err.into(),
            status,
        }
    }

    /// Attach a structured attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.push(Attribute::new(key, value));
        self
    }

    /// Attach several structured attributes, keeping their order
    #[must_use]
    pub fn with_attributes<I, A>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Attribute>,
    {
        self.attributes.extend(attributes.into_iter().map(Into::into));
        self
    }

    /// The stored status
    pub const fn http_status(&self) -> StatusCode {
        self.status
    }

    /// Prefix given at construction, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Structured attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.iter().find(|a| a.key == key).map(|a| &a.value)
    }

    /// The wrapped error
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.cause
    }

    /// Give up the envelope and return the wrapped error
    pub fn into_cause(self) -> BoxError {
        self.cause
    }
}

impl fmt::Display for StatusEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}: {}", self.cause),
            None => fmt::Display::fmt(&self.cause, f),
        }
    }
}

impl Error for StatusEnvelope {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.cause)
    }
}

impl HttpError for StatusEnvelope {
    fn status_code(&self) -> StatusCode {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;

    use super::*;

    #[test]
    fn new_keeps_message_and_status() {
        let err = StatusEnvelope::new("order not found", StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "order not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.message().is_none());
    }

    #[test]
    fn wrap_without_message_keeps_text() {
        let err = StatusEnvelope::wrap("", io::Error::from(io::ErrorKind::Unsupported), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(err.to_string(), io::Error::from(io::ErrorKind::Unsupported).to_string());
        assert_eq!(err.http_status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn wrap_with_message_prefixes_text() {
        let err = StatusEnvelope::wrap("loading invoice", Message("timed out".to_owned()), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.to_string(), "loading invoice: timed out");
        assert_eq!(err.message(), Some("loading invoice"));
    }

    #[test]
    fn source_is_the_wrapped_error() {
        let err = StatusEnvelope::new("boom", StatusCode::BAD_REQUEST);
        let source = err.source().unwrap();
        assert_eq!(source.downcast_ref::<Message>(), Some(&Message("boom".to_owned())));
    }

    #[test]
    fn attributes_do_not_change_text() {
        let err = StatusEnvelope::wrap("charging card", Message("declined".to_owned()), StatusCode::PAYMENT_REQUIRED)
            .with_attribute("order_id", 42)
            .with_attributes([("currency", json!("EUR")), ("retry", json!(false))]);

        assert_eq!(err.to_string(), "charging card: declined");
        assert_eq!(err.attributes().len(), 3);
        assert_eq!(err.attribute("order_id"), Some(&json!(42)));
        assert_eq!(err.attributes()[1], Attribute::new("currency", "EUR"));
        assert!(err.attribute("missing").is_none());
    }

    #[test]
    fn attributes_serialize_as_key_value_pairs() {
        let err = StatusEnvelope::new("quota exceeded", StatusCode::TOO_MANY_REQUESTS)
            .with_attribute("tenant", "acme")
            .with_attribute("limit", 100);

        let value = serde_json::to_value(err.attributes()).unwrap();
        assert_eq!(
            value,
            json!([
                { "key": "tenant", "value": "acme" },
                { "key": "limit", "value": 100 },
            ])
        );
    }

    #[test]
    fn string_errors_can_be_wrapped() {
        let err = StatusEnvelope::wrap("parsing body", "unexpected end of input", StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "parsing body: unexpected end of input");
        assert_eq!(err.into_cause().to_string(), "unexpected end of input");
    }
}
