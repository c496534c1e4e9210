//! Structured error values carried inside runtime properties.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

/// A captured error travelling through an event's `error` property.
///
/// This is the crate's rendering of "an error-typed property value": a
/// structural `{class, message, stack?}` object. The publisher detects
/// it inside runtime properties and forwards it as the exception
/// argument of `critical`/`error` calls, so Rollbar groups the item as
/// an exception instead of a plain message.
///
/// ```
/// use std::io;
/// use stratum_rollbar::CapturedError;
///
/// let io_err = io::Error::new(io::ErrorKind::TimedOut, "connection timed out");
/// let captured = CapturedError::from_error(&io_err);
/// assert_eq!(captured.class, "Error");
/// assert_eq!(captured.message, "connection timed out");
///
/// let value = captured.to_value();
/// assert_eq!(CapturedError::from_value(&value), Some(captured));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CapturedError {
    /// Exception class name reported to Rollbar.
    pub class: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional raw stack/backtrace text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl CapturedError {
    /// Creates a captured error with an explicit class and message.
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Attaches raw stack/backtrace text.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Captures any standard error under the generic `Error` class.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::new("Error", error.to_string())
    }

    /// Detects a captured error inside a JSON property value.
    ///
    /// The check is structural: an object with string `class` and
    /// `message` fields qualifies; anything else (including a plain
    /// string error description) does not.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let class = obj.get("class")?.as_str()?;
        let message = obj.get("message")?.as_str()?;
        let stack = obj.get("stack").and_then(Value::as_str).map(str::to_owned);
        Some(Self {
            class: class.to_owned(),
            message: message.to_owned(),
            stack,
        })
    }

    /// Encodes this error as a JSON property value.
    pub fn to_value(&self) -> Value {
        let mut value = json!({
            "class": self.class,
            "message": self.message,
        });
        if let (Some(stack), Some(obj)) = (&self.stack, value.as_object_mut()) {
            obj.insert("stack".into(), Value::String(stack.clone()));
        }
        value
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_property_value() {
        let err = CapturedError::new("TimeoutError", "upstream timed out")
            .with_stack("frame 0\nframe 1");
        assert_eq!(CapturedError::from_value(&err.to_value()), Some(err));
    }

    #[test]
    fn test_plain_values_are_not_errors() {
        for value in [
            json!("Connection refused"),
            json!(503),
            json!({"message": "no class"}),
            json!({"class": 1, "message": "non-string class"}),
            json!(null),
        ] {
            assert_eq!(CapturedError::from_value(&value), None, "value {value}");
        }
    }

    #[test]
    fn test_extra_fields_do_not_block_detection() {
        let value = json!({"class": "Error", "message": "boom", "code": 42});
        let err = CapturedError::from_value(&value).expect("detected");
        assert_eq!(err.class, "Error");
        assert_eq!(err.stack, None);
    }
}
