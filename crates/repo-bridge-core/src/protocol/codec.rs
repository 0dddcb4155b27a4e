//! Line-oriented JSON codec for the channel envelope.
//!
//! Wire format: one JSON object per line, UTF-8, no embedded newlines.
//! `serde_json::to_string` never emits a raw newline, so an encoded value
//! is always exactly one line.

use thiserror::Error;

use crate::protocol::messages::{MethodCall, MethodResponse};

/// Errors that can occur while encoding or decoding an envelope.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The line is not a valid invocation envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The envelope had an empty `method` field.
    #[error("method name must not be empty")]
    EmptyMethod,

    /// A value could not be serialised.
    #[error("failed to serialise envelope: {0}")]
    Serialize(String),
}

// ── Host side ─────────────────────────────────────────────────────────────────

/// Parses one line into a [`MethodCall`].
///
/// Surrounding whitespace (including a trailing `\r`) is ignored.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedEnvelope`] if the line is not a JSON
/// object with a string `method`, or [`ProtocolError::EmptyMethod`] if the
/// method name is blank.
///
/// # Example
///
/// ```rust
/// use repo_bridge_core::decode_call;
///
/// let call = decode_call(r#"{"method":"dismiss"}"#).unwrap();
/// assert_eq!(call.method, "dismiss");
/// assert!(call.arguments.is_null());
/// ```
pub fn decode_call(line: &str) -> Result<MethodCall, ProtocolError> {
    let call: MethodCall = serde_json::from_str(line.trim())
        .map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))?;
    if call.method.trim().is_empty() {
        return Err(ProtocolError::EmptyMethod);
    }
    Ok(call)
}

/// Serialises a [`MethodResponse`] to a single line (without the newline).
///
/// # Errors
///
/// Returns [`ProtocolError::Serialize`] if serialisation fails.
pub fn encode_response(response: &MethodResponse) -> Result<String, ProtocolError> {
    serde_json::to_string(response).map_err(|e| ProtocolError::Serialize(e.to_string()))
}

// ── Module side ───────────────────────────────────────────────────────────────

/// Serialises a [`MethodCall`] to a single line.
///
/// # Errors
///
/// Returns [`ProtocolError::Serialize`] if serialisation fails.
pub fn encode_call(call: &MethodCall) -> Result<String, ProtocolError> {
    serde_json::to_string(call).map_err(|e| ProtocolError::Serialize(e.to_string()))
}

/// Parses one response line.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedEnvelope`] if the line is not a valid
/// response envelope.
pub fn decode_response(line: &str) -> Result<MethodResponse, ProtocolError> {
    serde_json::from_str(line.trim()).map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_call_reads_method_and_arguments() {
        // Arrange
        let line = r#"{"method":"select","arguments":{"id":1,"name":"x","fullName":"o/x"}}"#;

        // Act
        let call = decode_call(line).unwrap();

        // Assert
        assert_eq!(call.method, "select");
        assert_eq!(call.arguments["id"], 1);
    }

    #[test]
    fn test_decode_call_tolerates_crlf_line_endings() {
        let call = decode_call("{\"method\":\"dismiss\"}\r\n").unwrap();
        assert_eq!(call.method, "dismiss");
    }

    #[test]
    fn test_decode_call_rejects_non_json() {
        let err = decode_call("select please").unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_decode_call_rejects_missing_method() {
        let err = decode_call(r#"{"arguments":{}}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_decode_call_rejects_non_string_method() {
        let err = decode_call(r#"{"method":7}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_decode_call_rejects_blank_method() {
        assert_eq!(
            decode_call(r#"{"method":"  "}"#).unwrap_err(),
            ProtocolError::EmptyMethod
        );
    }

    #[test]
    fn test_encode_response_is_a_single_line() {
        let resp = MethodResponse::error("DECODE_ERROR", "line one\nline two");
        let line = encode_response(&resp).unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(decode_response(&line).unwrap(), resp);
    }

    #[test]
    fn test_module_side_call_is_readable_by_host_side() {
        let call = MethodCall::new("select", json!({"id": 5}));
        let line = encode_call(&call).unwrap();
        assert_eq!(decode_call(&line).unwrap(), call);
    }
}
