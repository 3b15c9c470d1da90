//! Wire types for the maib MIA API.

pub mod auth;
pub mod callback;
pub mod payment;
pub mod qr;
pub mod rtp;

use serde::{Deserialize, Serialize};

/// The envelope every MIA endpoint wraps its response in.
///
/// `result` carries the operation payload when `ok` is `true`; `errors`
/// carries the failure details when it is not.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

/// One entry of the `errors` array of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
    pub error_code: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl std::fmt::Display for ApiErrorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_message {
            Some(message) => write!(f, "{}: {}", self.error_code, message),
            None => write!(f, "{}", self.error_code),
        }
    }
}

/// Operation currency. The gateway only settles in Moldovan lei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "MDL")]
    Mdl,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Mdl => write!(f, "MDL"),
        }
    }
}

/// Sort direction for list filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Reason body shared by the cancel and RTP refund endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelRequest {
    pub reason: String,
}

/// One page of a filtered listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}
