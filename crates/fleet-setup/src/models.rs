//! Wire types for the vendor OAuth endpoints and the setup summary.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::SetupConfig;

/// OAuth2 grant types used by the setup flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    AuthorizationCode,
    ClientCredentials,
}

/// Form body posted to the token endpoint.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: GrantType,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<&'a str>,
    pub audience: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<&'a str>,
}

impl<'a> TokenRequest<'a> {
    /// Exchange an authorization code for tokens.
    #[must_use]
    pub fn authorization_code(config: &'a SetupConfig, code: &'a str, redirect_uri: &'a str) -> Self {
        Self {
            grant_type: GrantType::AuthorizationCode,
            client_id: &config.client_id,
            client_secret: &config.client_secret,
            code: Some(code),
            scope: None,
            audience: config.audience(),
            redirect_uri: Some(redirect_uri),
        }
    }

    /// Authenticate the partner application itself.
    #[must_use]
    pub fn client_credentials(config: &'a SetupConfig, scope: &'a str) -> Self {
        Self {
            grant_type: GrantType::ClientCredentials,
            client_id: &config.client_id,
            client_secret: &config.client_secret,
            code: None,
            scope: Some(scope),
            audience: config.audience(),
            redirect_uri: None,
        }
    }
}

/// Token endpoint response. Only the fields the flows read are kept.
#[derive(Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Body of the partner account registration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerAccountRequest {
    pub domain: String,
}

/// What the operator copies into the proxy integration after a code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    pub refresh_token: String,
    pub proxy_url: String,
    pub certificate_path: PathBuf,
    pub client_id: String,
}

impl SetupSummary {
    #[must_use]
    pub fn new(config: &SetupConfig, refresh_token: String) -> Self {
        Self {
            refresh_token,
            proxy_url: config.proxy_url(),
            certificate_path: config.certificate_path(),
            client_id: config.client_id.clone(),
        }
    }
}

impl fmt::Display for SetupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Info to enter into Tesla Custom component:")?;
        writeln!(f, "Refresh token  : {}", self.refresh_token)?;
        writeln!(f, "Proxy URL      : {}", self.proxy_url)?;
        writeln!(f, "SSL certificate: {}", self.certificate_path.display())?;
        writeln!(f, "Client ID      : {}", self.client_id)
    }
}
