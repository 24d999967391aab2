//! OAuth setup web app.
//!
//! - `GET /` renders the landing page with the authorization link
//! - `GET /callback` exchanges the authorization code for a refresh token
//! - `GET /register-partner-account` runs client credentials + partner registration
//!
//! Vendor failures are explicit [`ClientError`] values. The registration route
//! turns HTTP statuses into a redirect back to `/`; the callback route lets
//! every failure through to the generic 500.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use url::Url;
use uuid::Uuid;

use super::pages::{self, IndexPage};
use crate::client::FleetClient;
use crate::config::{SetupConfig, api};
use crate::error::{AppError, AppResult, ClientError};
use crate::models::SetupSummary;

/// Shared state for setup handlers. Read-only after startup.
#[derive(Debug)]
pub struct SetupState {
    pub client: FleetClient,
    /// Authorization endpoint, parsed once.
    pub authorize_base: Url,
}

impl SetupState {
    /// Build the handler state from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: SetupConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: FleetClient::new(config)?,
            authorize_base: Url::parse(api::AUTHORIZE_URL)?,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SetupConfig {
        self.client.config()
    }

    /// Authorization URL carrying a fresh `state` and `nonce`.
    #[must_use]
    pub fn authorize_url(&self, state: &str, nonce: &str) -> Url {
        let config = self.config();
        let mut url = self.authorize_base.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", &config.redirect_uri())
            .append_pair("scope", api::SCOPES)
            .append_pair("state", state)
            .append_pair("nonce", nonce);
        url
    }
}

/// Create the setup server router.
///
/// # Errors
///
/// Returns error if the handler state cannot be built.
pub fn create_router(config: SetupConfig) -> anyhow::Result<Router> {
    let state = Arc::new(SetupState::new(config)?);

    Ok(Router::new()
        .route("/", get(handle_index))
        .route("/callback", get(handle_callback))
        .route("/register-partner-account", get(handle_register_partner_account))
        .layer(CatchPanicLayer::custom(super::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Banner parameters set by the registration redirect.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl IndexQuery {
    /// First `error` and `success` values; repeats and unknown keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "error" if query.error.is_none() => query.error = Some(value),
                "success" if query.success.is_none() => query.success = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Random opaque token for `state` / `nonce`.
fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// `GET /`
async fn handle_index(
    State(state): State<Arc<SetupState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String> {
    let query = IndexQuery::from_pairs(pairs);
    let config = state.config();
    let oauth_state = random_token();
    let nonce = random_token();
    let authorize_url = state.authorize_url(&oauth_state, &nonce);
    let public_key_url = config.public_key_url();

    Html(pages::render_index(&IndexPage {
        domain: &config.domain,
        client_id: &config.client_id,
        scopes: api::SCOPES,
        state: &oauth_state,
        nonce: &nonce,
        authorize_url: &authorize_url,
        public_key_url: &public_key_url,
        error: query.error.as_deref(),
        success: query.success.as_deref() == Some("1"),
    }))
}

/// `GET /callback`
///
/// The returned `state` is not checked against the one rendered on `/`;
/// nothing is stored between the two requests.
async fn handle_callback(
    State(state): State<Arc<SetupState>>,
    Query(args): Query<HashMap<String, String>>,
) -> AppResult<Html<String>> {
    tracing::info!(?args, "callback args");

    let Some(code) = args.get("code").filter(|c| !c.is_empty()) else {
        tracing::error!(?args, "Callback without authorization code");
        return Err(AppError::bad_request("Invalid code!"));
    };

    if !args.contains_key("state") {
        tracing::warn!("Callback without state parameter");
    }

    let refresh_token = state.client.exchange_code(code).await?;

    let summary = SetupSummary::new(state.config(), refresh_token);
    tracing::info!("{}", summary);

    Ok(Html(pages::render_callback(&summary)))
}

/// `GET /register-partner-account`
async fn handle_register_partner_account(
    State(state): State<Arc<SetupState>>,
) -> AppResult<Response> {
    tracing::info!("*** Generating Partner Authentication Token ***");

    let access_token = match state.client.partner_token().await {
        Ok(token) => token,
        Err(err) => return redirect_on_status(err, "Partner token request failed"),
    };

    tracing::info!("*** Registering Tesla account ***");

    match state.client.register_partner_account(&access_token).await {
        Ok(body) => {
            tracing::info!(%body, "Partner account registered");
            Ok(redirect_found("/?success=1"))
        }
        Err(err) => redirect_on_status(err, "Partner account registration failed"),
    }
}

/// Vendor statuses go back to `/` as a banner; anything else is a 500.
fn redirect_on_status(err: ClientError, message: &str) -> AppResult<Response> {
    let Some(status) = err.status() else {
        return Err(err.into());
    };
    if let ClientError::Status { reason, body, .. } = &err {
        tracing::error!(status, %reason, %body, "{}", message);
    }
    Ok(redirect_found(&format!("/?error={status}")))
}

/// 302 Found. axum's `Redirect` only offers 303/307/308.
fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
