//! Payment endpoints: details, listing, refunds, sandbox simulation.

use uuid::Uuid;

use super::{ClientError, MiaClient, parse_response};
use crate::objects::Page;
use crate::objects::payment::{
    Payment, PaymentListFilter, Refund, RefundRequest, TestPayRequest,
};

impl MiaClient {
    /// `POST /v2/mia/test-pay` – simulate a QR payment (sandbox only).
    pub async fn test_pay(
        &self,
        request: &TestPayRequest,
        access_token: &str,
    ) -> Result<Payment, ClientError> {
        let url = self.base_url.join("/v2/mia/test-pay")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /v2/mia/payments/{payId}` – retrieve payment details.
    pub async fn payment_details(
        &self,
        pay_id: Uuid,
        access_token: &str,
    ) -> Result<Payment, ClientError> {
        let url = self.base_url.join(&format!("/v2/mia/payments/{pay_id}"))?;
        let resp = self.http.get(url).bearer_auth(access_token).send().await?;
        parse_response(resp).await
    }

    /// `GET /v2/mia/payments` – list payments with filtering options.
    pub async fn payment_list(
        &self,
        filter: &PaymentListFilter,
        access_token: &str,
    ) -> Result<Page<Payment>, ClientError> {
        let url = self.base_url.join("/v2/mia/payments")?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(filter)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /v2/payments/{payId}/refund` – refund a completed payment,
    /// fully or partially.
    ///
    /// Note the path: refunds live outside the `/mia` segment.
    pub async fn payment_refund(
        &self,
        pay_id: Uuid,
        request: &RefundRequest,
        access_token: &str,
    ) -> Result<Refund, ClientError> {
        let url = self.base_url.join(&format!("/v2/payments/{pay_id}/refund"))?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }
}
