//! Payment types: details, refunds, sandbox simulation, list filters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Currency, SortOrder};
use super::qr::QrStatus;

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Executed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Executed => write!(f, "Executed"),
            PaymentStatus::Refunded => write!(f, "Refunded"),
        }
    }
}

/// Refund request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefundStatus {
    Created,
    Completed,
}

impl std::fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefundStatus::Created => write!(f, "Created"),
            RefundStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A payment as returned by the details, list, and simulation endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub pay_id: Uuid,
    #[serde(default)]
    pub qr_id: Option<Uuid>,
    #[serde(default)]
    pub extension_id: Option<Uuid>,
    #[serde(default)]
    pub rtp_id: Option<Uuid>,
    /// Bank-side reference of the executed transfer.
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    /// Status of the paid QR code, echoed by the sandbox simulation.
    #[serde(default)]
    pub qr_status: Option<QrStatus>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub payer_iban: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub executed_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub terminal_id: Option<String>,
}

/// Request body for `POST /v2/mia/test-pay` (sandbox only).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPayRequest {
    pub qr_id: Uuid,
    pub amount: Decimal,
    pub currency: Currency,
    pub iban: String,
    pub payer_name: String,
}

/// Request body for `POST /v2/payments/{payId}/refund`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub reason: String,
    /// Partial refund amount; omit to refund the full payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// A refund as returned by the refund endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub refund_id: Uuid,
    pub status: RefundStatus,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Sortable columns of the payment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentSortField {
    OrderId,
    Amount,
    Status,
    ExecutedAt,
}

/// Query filters for `GET /v2/mia/payments`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListFilter {
    pub count: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<PaymentSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_from: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_to: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub executed_at_from: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub executed_at_to: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}
