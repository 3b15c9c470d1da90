//! Request-to-pay types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Currency, SortOrder};

/// Payment request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtpStatus {
    Created,
    Active,
    Cancelled,
    Accepted,
    Rejected,
    Expired,
}

impl std::fmt::Display for RtpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RtpStatus::Created => write!(f, "Created"),
            RtpStatus::Active => write!(f, "Active"),
            RtpStatus::Cancelled => write!(f, "Cancelled"),
            RtpStatus::Accepted => write!(f, "Accepted"),
            RtpStatus::Rejected => write!(f, "Rejected"),
            RtpStatus::Expired => write!(f, "Expired"),
        }
    }
}

/// Request body for `POST /v2/rtp`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpCreateRequest {
    /// Payer alias registered with MIA (phone number).
    pub alias: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// A payment request as returned by the RTP endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub rtp_id: Uuid,
    #[serde(default)]
    pub status: Option<RtpStatus>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub terminal_id: Option<String>,
}

/// Request body for `POST /v2/rtp/{rtpId}/test-accept` (sandbox only).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpTestAcceptRequest {
    pub amount: Decimal,
    pub currency: Currency,
}

/// Sortable columns of the RTP listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RtpSortField {
    OrderId,
    Type,
    Amount,
    Status,
    CreatedAt,
    ExpiresAt,
}

/// Query filters for `GET /v2/rtp`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpListFilter {
    pub count: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<RtpSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtp_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RtpStatus>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created_at_from: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created_at_to: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub expires_at_from: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub expires_at_to: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}
