//! Callback notification payloads.
//!
//! After a payment, cancellation, or refund, the MIA gateway POSTs a JSON
//! notification to the merchant's `callbackUrl`:
//!
//! ```text
//! { "result": { ... }, "signature": "base64" }
//! ```
//!
//! The `result` object is a flat map of scalar fields whose exact set
//! varies by event kind, so it is modeled as a map of tagged scalars
//! rather than a fixed struct. Verification lives in
//! [`crate::signature::validate_callback_signature`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The `result` object of a callback notification.
///
/// Field insertion order is irrelevant; the signature algorithm sorts the
/// fields itself.
pub type ResultPayload = HashMap<String, CallbackValue>;

/// A scalar value of a callback `result` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallbackValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<bool> for CallbackValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CallbackValue {
    fn from(value: i64) -> Self {
        Self::Number(serde_json::Number::from(value))
    }
}

impl From<&str> for CallbackValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CallbackValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A full callback notification body.
///
/// Both fields tolerate being absent from the JSON so that a malformed
/// notification still parses and verification fails closed instead of
/// erroring out in the deserializer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackEnvelope {
    #[serde(default)]
    pub result: ResultPayload,
    #[serde(default)]
    pub signature: String,
}
