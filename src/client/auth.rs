//! Authentication endpoint.

use super::{ClientError, MiaClient, parse_response};
use crate::objects::auth::{TokenRequest, TokenResult};

impl MiaClient {
    /// `POST /v2/auth/token` – obtain a bearer token for the project
    /// `clientId`/`clientSecret` pair.
    pub async fn get_token(
        &self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<TokenResult, ClientError> {
        let url = self.base_url.join("/v2/auth/token")?;
        let body = TokenRequest {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        };

        tracing::debug!("requesting MIA access token");
        let resp = self.http.post(url).json(&body).send().await?;
        parse_response(resp).await
    }
}
