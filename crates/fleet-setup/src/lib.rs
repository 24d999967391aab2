//! Fleet Setup
//!
//! Two small HTTP helpers for bootstrapping a Tesla Fleet API integration:
//!
//! - **Key server** (`fleet-keyserver`): serves the public key at
//!   `/.well-known/appspecific/com.tesla.3p.public-key.pem`
//! - **Setup server** (`fleet-setup-server`): renders the login link, exchanges
//!   the authorization code for a refresh token, and registers the partner account
//!
//! Both are stateless. Configuration is read once at startup and handed to the
//! routers; nothing is persisted.
//!
//! # Example
//!
//! ```no_run
//! use fleet_setup::config::{Region, SetupConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SetupConfig::new("client-id", "secret", "proxy.example.com", Region::Europe, "/data");
//!     let router = fleet_setup::server::setup::create_router(config)?;
//!     fleet_setup::server::serve(router, 8099).await
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod telemetry;

pub use client::FleetClient;
pub use config::{KeyServerConfig, Region, SetupConfig};
pub use error::{AppError, ClientError};
