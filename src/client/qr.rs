//! QR code lifecycle endpoints.

use uuid::Uuid;

use super::{ClientError, MiaClient, parse_response};
use crate::objects::qr::{
    QrCode, QrCreateHybridRequest, QrCreateRequest, QrExtensionRequest, QrListFilter,
};
use crate::objects::{CancelRequest, Page};

impl MiaClient {
    /// `POST /v2/mia/qr` – create a static or dynamic QR code.
    pub async fn qr_create(
        &self,
        request: &QrCreateRequest,
        access_token: &str,
    ) -> Result<QrCode, ClientError> {
        let url = self.base_url.join("/v2/mia/qr")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /v2/mia/qr/hybrid` – create a hybrid QR code, optionally with
    /// an initial extension.
    pub async fn qr_create_hybrid(
        &self,
        request: &QrCreateHybridRequest,
        access_token: &str,
    ) -> Result<QrCode, ClientError> {
        let url = self.base_url.join("/v2/mia/qr/hybrid")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /v2/mia/qr/{qrId}/extension` – attach a new extension to a
    /// hybrid QR code.
    pub async fn qr_create_extension(
        &self,
        qr_id: Uuid,
        request: &QrExtensionRequest,
        access_token: &str,
    ) -> Result<QrCode, ClientError> {
        let url = self.base_url.join(&format!("/v2/mia/qr/{qr_id}/extension"))?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /v2/mia/qr/{qrId}/cancel` – cancel an active static or
    /// dynamic QR code.
    pub async fn qr_cancel(
        &self,
        qr_id: Uuid,
        reason: impl Into<String>,
        access_token: &str,
    ) -> Result<QrCode, ClientError> {
        let url = self.base_url.join(&format!("/v2/mia/qr/{qr_id}/cancel"))?;
        let body = CancelRequest {
            reason: reason.into(),
        };
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /v2/mia/qr/{qrId}/extension/cancel` – cancel the active
    /// extension of a hybrid QR code.
    pub async fn qr_cancel_extension(
        &self,
        qr_id: Uuid,
        reason: impl Into<String>,
        access_token: &str,
    ) -> Result<QrCode, ClientError> {
        let url = self
            .base_url
            .join(&format!("/v2/mia/qr/{qr_id}/extension/cancel"))?;
        let body = CancelRequest {
            reason: reason.into(),
        };
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /v2/mia/qr/{qrId}` – retrieve QR details.
    pub async fn qr_details(
        &self,
        qr_id: Uuid,
        access_token: &str,
    ) -> Result<QrCode, ClientError> {
        let url = self.base_url.join(&format!("/v2/mia/qr/{qr_id}"))?;
        let resp = self.http.get(url).bearer_auth(access_token).send().await?;
        parse_response(resp).await
    }

    /// `GET /v2/mia/qr` – list QR codes with filtering options.
    pub async fn qr_list(
        &self,
        filter: &QrListFilter,
        access_token: &str,
    ) -> Result<Page<QrCode>, ClientError> {
        let url = self.base_url.join("/v2/mia/qr")?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(filter)
            .send()
            .await?;
        parse_response(resp).await
    }
}
