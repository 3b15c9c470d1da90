//! QR code types: creation requests, details, list filters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Currency, SortOrder};

/// QR code kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QrType {
    Static,
    Dynamic,
    Hybrid,
}

impl std::fmt::Display for QrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QrType::Static => write!(f, "Static"),
            QrType::Dynamic => write!(f, "Dynamic"),
            QrType::Hybrid => write!(f, "Hybrid"),
        }
    }
}

/// How the payable amount of a QR code is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmountType {
    /// Exactly the configured amount.
    Fixed,
    /// Any amount within the configured min/max bounds.
    Controlled,
    /// Any amount chosen by the payer.
    Free,
}

impl std::fmt::Display for AmountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountType::Fixed => write!(f, "Fixed"),
            AmountType::Controlled => write!(f, "Controlled"),
            AmountType::Free => write!(f, "Free"),
        }
    }
}

/// QR code lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QrStatus {
    Active,
    Inactive,
    Paid,
    Expired,
    Cancelled,
}

impl std::fmt::Display for QrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QrStatus::Active => write!(f, "Active"),
            QrStatus::Inactive => write!(f, "Inactive"),
            QrStatus::Paid => write!(f, "Paid"),
            QrStatus::Expired => write!(f, "Expired"),
            QrStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Request body for `POST /v2/mia/qr`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCreateRequest {
    #[serde(rename = "type")]
    pub qr_type: QrType,
    pub amount_type: AmountType,
    pub currency: Currency,
    pub description: String,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}

/// Request body for `POST /v2/mia/qr/hybrid`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCreateHybridRequest {
    pub amount_type: AmountType,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<QrExtensionRequest>,
}

/// Extension parameters for a hybrid QR code.
///
/// Used inline when creating a hybrid QR and standalone for
/// `POST /v2/mia/qr/{qrId}/extension`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrExtensionRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// A QR code as returned by the creation, details, and list endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub qr_id: Uuid,
    #[serde(default)]
    pub extension_id: Option<Uuid>,
    #[serde(default, rename = "type")]
    pub qr_type: Option<QrType>,
    #[serde(default)]
    pub amount_type: Option<AmountType>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub status: Option<QrStatus>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    /// Payment link encoded in the QR image.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub terminal_id: Option<String>,
}

/// Sortable columns of the QR listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QrSortField {
    OrderId,
    Type,
    AmountType,
    Status,
    CreatedAt,
    ExpiresAt,
}

/// Query filters for `GET /v2/mia/qr`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrListFilter {
    pub count: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<QrSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub qr_type: Option<QrType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_type: Option<AmountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_from: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_to: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QrStatus>,
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
