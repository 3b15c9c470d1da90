//! Request-to-pay endpoints.

use uuid::Uuid;

use super::{ClientError, MiaClient, parse_response};
use crate::objects::payment::{Payment, Refund};
use crate::objects::rtp::{
    PaymentRequest, RtpCreateRequest, RtpListFilter, RtpTestAcceptRequest,
};
use crate::objects::{CancelRequest, Page};

impl MiaClient {
    /// `POST /v2/rtp` – create a new payment request addressed to a payer
    /// alias.
    pub async fn rtp_create(
        &self,
        request: &RtpCreateRequest,
        access_token: &str,
    ) -> Result<PaymentRequest, ClientError> {
        let url = self.base_url.join("/v2/rtp")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /v2/rtp/{rtpId}` – retrieve the status of a payment request.
    pub async fn rtp_status(
        &self,
        rtp_id: Uuid,
        access_token: &str,
    ) -> Result<PaymentRequest, ClientError> {
        let url = self.base_url.join(&format!("/v2/rtp/{rtp_id}"))?;
        let resp = self.http.get(url).bearer_auth(access_token).send().await?;
        parse_response(resp).await
    }

    /// `POST /v2/rtp/{rtpId}/cancel` – cancel a pending payment request.
    pub async fn rtp_cancel(
        &self,
        rtp_id: Uuid,
        reason: impl Into<String>,
        access_token: &str,
    ) -> Result<PaymentRequest, ClientError> {
        let url = self.base_url.join(&format!("/v2/rtp/{rtp_id}/cancel"))?;
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

    /// `GET /v2/rtp` – list payment requests with filtering options.
    pub async fn rtp_list(
        &self,
        filter: &RtpListFilter,
        access_token: &str,
    ) -> Result<Page<PaymentRequest>, ClientError> {
        let url = self.base_url.join("/v2/rtp")?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(filter)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /v2/rtp/{payId}/refund` – refund a payment executed through a
    /// payment request.
    pub async fn rtp_refund(
        &self,
        pay_id: Uuid,
        reason: impl Into<String>,
        access_token: &str,
    ) -> Result<Refund, ClientError> {
        let url = self.base_url.join(&format!("/v2/rtp/{pay_id}/refund"))?;
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

    /// `POST /v2/rtp/{rtpId}/test-accept` – simulate acceptance of a
    /// payment request (sandbox only).
    pub async fn rtp_test_accept(
        &self,
        rtp_id: Uuid,
        request: &RtpTestAcceptRequest,
        access_token: &str,
    ) -> Result<Payment, ClientError> {
        let url = self.base_url.join(&format!("/v2/rtp/{rtp_id}/test-accept"))?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /v2/rtp/{rtpId}/test-reject` – simulate rejection of a
    /// payment request (sandbox only).
    pub async fn rtp_test_reject(
        &self,
        rtp_id: Uuid,
        access_token: &str,
    ) -> Result<PaymentRequest, ClientError> {
        let url = self.base_url.join(&format!("/v2/rtp/{rtp_id}/test-reject"))?;
        let resp = self.http.post(url).bearer_auth(access_token).send().await?;
        parse_response(resp).await
    }
}
