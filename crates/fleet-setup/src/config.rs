//! Configuration for the key server and the setup server.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Vendor API constants.
pub mod api {
    use std::time::Duration;

    /// OAuth2 token endpoint.
    pub const TOKEN_URL: &str = "https://auth.tesla.com/oauth2/v3/token";

    /// Hosted authorization page the browser is sent to.
    pub const AUTHORIZE_URL: &str = "https://auth.tesla.com/oauth2/v3/authorize";

    /// Partner account registration path, relative to the fleet API base URL.
    pub const PARTNER_ACCOUNTS_PATH: &str = "/api/1/partner_accounts";

    /// Scopes requested by both OAuth flows.
    pub const SCOPES: &str =
        "openid offline_access vehicle_device_data vehicle_cmds vehicle_charging_cmds";

    /// Timeout for every outbound call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// File layout under the config base directory.
pub mod paths {
    /// Route the vendor fetches the public key from.
    pub const PUBLIC_KEY_ROUTE: &str = "/.well-known/appspecific/com.tesla.3p.public-key.pem";

    /// Directory (relative to the config base) holding the public key.
    pub const PUBLIC_KEY_DIR: &str = "tesla";

    /// Public key file name.
    pub const PUBLIC_KEY_FILE: &str = "com.tesla.3p.public-key.pem";

    /// Proxy TLS certificate (relative to the config base).
    pub const PROXY_CERTIFICATE: &str = "tesla-proxy/cert.pem";
}

/// Default key server port.
pub const KEY_SERVER_PORT: u16 = 8098;

/// Default setup server port.
pub const SETUP_SERVER_PORT: u16 = 8099;

/// Fleet API region. Each region maps to exactly one audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Region {
    /// North America and Asia-Pacific
    #[value(name = "North America, Asia-Pacific", alias = "na")]
    NorthAmerica,
    /// Europe, Middle East and Africa
    #[value(name = "Europe, Middle East, Africa", alias = "eu")]
    Europe,
    /// Mainland China
    #[value(name = "China", alias = "cn")]
    China,
}

impl Region {
    /// Human readable label, as accepted on the command line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America, Asia-Pacific",
            Self::Europe => "Europe, Middle East, Africa",
            Self::China => "China",
        }
    }

    /// Fleet API base URL, sent as the OAuth `audience`.
    #[must_use]
    pub const fn audience(self) -> &'static str {
        match self {
            Self::NorthAmerica => "https://fleet-api.prd.na.vn.cloud.tesla.com",
            Self::Europe => "https://fleet-api.prd.eu.vn.cloud.tesla.com",
            Self::China => "https://fleet-api.prd.cn.vn.cloud.tesla.cn",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where outbound calls go.
///
/// Production always uses the vendor URLs; tests point both at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetEndpoints {
    /// OAuth2 token endpoint.
    pub token_url: String,

    /// Base URL for fleet API calls (partner registration).
    pub api_base_url: String,
}

impl FleetEndpoints {
    /// Vendor endpoints for a region.
    #[must_use]
    pub fn for_region(region: Region) -> Self {
        Self {
            token_url: api::TOKEN_URL.to_string(),
            api_base_url: region.audience().to_string(),
        }
    }
}

/// Key server configuration.
#[derive(Debug, Clone)]
pub struct KeyServerConfig {
    /// Config base path.
    pub config_base: PathBuf,
}

impl KeyServerConfig {
    #[must_use]
    pub fn new(config_base: impl Into<PathBuf>) -> Self {
        Self { config_base: config_base.into() }
    }

    /// Absolute location of the served public key.
    #[must_use]
    pub fn public_key_path(&self) -> PathBuf {
        self.config_base.join(paths::PUBLIC_KEY_DIR).join(paths::PUBLIC_KEY_FILE)
    }
}

/// Setup server configuration. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct SetupConfig {
    pub client_id: String,
    pub client_secret: String,
    pub domain: String,
    pub region: Region,
    pub config_base: PathBuf,

    /// Outbound endpoints.
    pub endpoints: FleetEndpoints,

    /// Request timeout for outbound calls.
    pub request_timeout: Duration,

    /// Connection timeout for outbound calls.
    pub connect_timeout: Duration,
}

impl SetupConfig {
    /// Create a configuration talking to the real vendor endpoints.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        domain: impl Into<String>,
        region: Region,
        config_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            domain: domain.into(),
            region,
            config_base: config_base.into(),
            endpoints: FleetEndpoints::for_region(region),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration with both endpoints on a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        let mut config = Self::new(
            "test-client-id",
            "test-client-secret",
            "proxy.example.com",
            Region::NorthAmerica,
            "/data",
        );
        config.endpoints = FleetEndpoints {
            token_url: format!("{}/oauth2/v3/token", base_url),
            api_base_url: base_url.to_string(),
        };
        config.request_timeout = Duration::from_secs(2);
        config.connect_timeout = Duration::from_secs(1);
        config
    }

    /// OAuth audience for the configured region.
    #[must_use]
    pub const fn audience(&self) -> &'static str {
        self.region.audience()
    }

    /// Redirect URI registered with the vendor.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("https://{}/callback", self.domain)
    }

    /// Public URL of the proxy.
    #[must_use]
    pub fn proxy_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    /// Public URL the vendor fetches the key from.
    #[must_use]
    pub fn public_key_url(&self) -> String {
        format!("https://{}{}", self.domain, paths::PUBLIC_KEY_ROUTE)
    }

    /// Proxy TLS certificate on disk.
    #[must_use]
    pub fn certificate_path(&self) -> PathBuf {
        self.config_base.join(paths::PROXY_CERTIFICATE)
    }

    /// Partner account registration endpoint.
    #[must_use]
    pub fn partner_accounts_url(&self) -> String {
        format!(
            "{}{}",
            self.endpoints.api_base_url.trim_end_matches('/'),
            api::PARTNER_ACCOUNTS_PATH
        )
    }
}

impl fmt::Debug for SetupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("domain", &self.domain)
            .field("region", &self.region)
            .field("config_base", &self.config_base)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
