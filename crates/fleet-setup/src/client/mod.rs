//! Tesla Fleet API client.
//!
//! Wraps one pooled reqwest client with the 30 second timeout. Every call
//! returns an explicit [`ClientResult`]; no retries.

use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::config::{SetupConfig, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{PartnerAccountRequest, TokenRequest, TokenResponse};

/// Client for the vendor token and partner registration endpoints.
#[derive(Clone)]
pub struct FleetClient {
    /// HTTP client.
    client: Client,

    /// Immutable setup configuration.
    config: SetupConfig,
}

impl FleetClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: SetupConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("fleet-setup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &SetupConfig {
        &self.config
    }

    /// Exchange an authorization code for tokens and return the refresh token.
    pub async fn exchange_code(&self, code: &str) -> ClientResult<String> {
        let redirect_uri = self.config.redirect_uri();
        let form = TokenRequest::authorization_code(&self.config, code, &redirect_uri);

        let token = self.request_token(&form).await?;
        token.refresh_token.ok_or(ClientError::MissingField("refresh_token"))
    }

    /// Obtain a partner access token with the client-credentials grant.
    pub async fn partner_token(&self) -> ClientResult<String> {
        let form = TokenRequest::client_credentials(&self.config, api::SCOPES);

        let token = self.request_token(&form).await?;
        tracing::info!(
            token_type = ?token.token_type,
            expires_in = ?token.expires_in,
            scope = ?token.scope,
            "Partner authentication token issued"
        );
        token.access_token.ok_or(ClientError::MissingField("access_token"))
    }

    /// Register the configured domain as a partner account.
    ///
    /// Returns the raw response body.
    pub async fn register_partner_account(&self, access_token: &str) -> ClientResult<String> {
        let url = self.config.partner_accounts_url();
        let body = PartnerAccountRequest { domain: self.config.domain.clone() };

        tracing::debug!(%url, domain = %body.domain, "Registering partner account");

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// POST a form to the token endpoint.
    async fn request_token(&self, form: &TokenRequest<'_>) -> ClientResult<TokenResponse> {
        tracing::debug!(
            url = %self.config.endpoints.token_url,
            grant_type = ?form.grant_type,
            "Requesting token"
        );

        let response = self
            .client
            .post(&self.config.endpoints.token_url)
            .form(form)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(ClientError::from)
    }

    /// Turn non-2xx responses into [`ClientError::Status`].
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), %url, body = %text, "Vendor returned an error");

        Err(ClientError::status_error(status, text))
    }
}

impl std::fmt::Debug for FleetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetClient").field("config", &self.config).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_succeeds() {
        let client = FleetClient::new(SetupConfig::for_testing("http://127.0.0.1:1"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = FleetClient::new(SetupConfig::for_testing("http://127.0.0.1:1")).unwrap();
        assert!(!format!("{client:?}").contains("test-client-secret"));
    }
}
