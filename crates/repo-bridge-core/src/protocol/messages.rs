//! Invocation envelope and response types for the module → host channel.
//!
//! # Message flow
//!
//! ```text
//! Module → Host:  {"method":"select","arguments":{...}}   →  MethodCall
//! Host → Module:  MethodResponse  →  {"status":"success","result":true}
//! ```
//!
//! Every invocation gets exactly one response.  The three response shapes
//! must stay distinguishable so a module-side UI can tell a failed `select`
//! apart from an unknown method.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Channel constants ─────────────────────────────────────────────────────────

/// Default name of the fixed channel the module invokes methods on.
pub const DEFAULT_CHANNEL_NAME: &str = "repo_bridge/channel";

/// Default method name for "the user picked a repository".
pub const METHOD_SELECT: &str = "select";

/// Default method name for "hide the module surface".
pub const METHOD_DISMISS: &str = "dismiss";

/// Error codes carried in [`MethodResponse::Error`].
pub mod error_codes {
    /// The `select` argument could not be decoded into a repository.
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    /// The envelope itself was not a valid invocation.
    pub const MALFORMED_CALL: &str = "MALFORMED_CALL";
}

// ── Module → Host ─────────────────────────────────────────────────────────────

/// One named, argument-carrying invocation from the module.
///
/// `arguments` is deliberately untyped; only the dispatcher knows how to
/// interpret it for a given method.  A missing `arguments` key decodes as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// An invocation with a `null` argument, e.g. `dismiss`.
    pub fn without_arguments(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }
}

// ── Host → Module ─────────────────────────────────────────────────────────────

/// The single completion signal returned for every invocation.
///
/// # Serde representation
///
/// ```json
/// {"status":"success","result":true}
/// {"status":"error","code":"DECODE_ERROR","message":"required field `fullName` is missing"}
/// {"status":"not_implemented"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    /// The method ran to completion.
    Success { result: Value },

    /// The method was recognised but failed.
    Error { code: String, message: String },

    /// The method name is not handled by this host.
    NotImplemented,
}

impl MethodResponse {
    pub fn success(result: impl Into<Value>) -> Self {
        MethodResponse::Success {
            result: result.into(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        MethodResponse::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success { .. })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
