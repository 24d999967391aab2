//! Command line arguments for both binaries.
//!
//! Every setting can also come from the equally named environment variable.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{Args, Parser};

use crate::config::{KEY_SERVER_PORT, KeyServerConfig, Region, SETUP_SERVER_PORT, SetupConfig};

/// Logging options shared by both servers.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(Parser, Debug)]
#[command(name = "fleet-keyserver")]
#[command(about = "Serves the Tesla Fleet API public key at its well-known path")]
#[command(version)]
pub struct KeyServerArgs {
    /// Config base path. Required if not provided in environment variable CONFIG_BASE
    #[arg(long, env = "CONFIG_BASE")]
    pub config_base: PathBuf,

    /// HTTP server port
    #[arg(long, default_value_t = KEY_SERVER_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub logging: LogArgs,
}

impl KeyServerArgs {
    #[must_use]
    pub fn to_config(&self) -> KeyServerConfig {
        KeyServerConfig::new(self.config_base.clone())
    }
}

#[derive(Parser)]
#[command(name = "fleet-setup-server")]
#[command(about = "OAuth setup web app for Tesla Fleet API integrations")]
#[command(version)]
pub struct SetupArgs {
    /// Client ID. Required if not provided in environment variable CLIENT_ID
    #[arg(long, env = "CLIENT_ID", value_parser = NonEmptyStringValueParser::new())]
    pub client_id: String,

    /// Client secret. Required if not provided in environment variable CLIENT_SECRET
    #[arg(
        long,
        env = "CLIENT_SECRET",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub client_secret: String,

    /// Domain. Required if not provided in environment variable DOMAIN
    #[arg(long, env = "DOMAIN", value_parser = NonEmptyStringValueParser::new())]
    pub domain: String,

    /// Region. Required if not provided in environment variable REGION
    #[arg(long, env = "REGION", value_enum)]
    pub region: Region,

    /// Config base path. Required if not provided in environment variable CONFIG_BASE
    #[arg(long, env = "CONFIG_BASE")]
    pub config_base: PathBuf,

    /// HTTP server port
    #[arg(long, default_value_t = SETUP_SERVER_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub logging: LogArgs,
}

impl SetupArgs {
    #[must_use]
    pub fn to_config(&self) -> SetupConfig {
        SetupConfig::new(
            self.client_id.clone(),
            self.client_secret.clone(),
            self.domain.clone(),
            self.region,
            self.config_base.clone(),
        )
    }
}

impl std::fmt::Debug for SetupArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetupArgs")
            .field("client_id", &self.client_id)
            .field("domain", &self.domain)
            .field("region", &self.region)
            .field("config_base", &self.config_base)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

/// Parse arguments, or print the problem plus usage and exit with status 1.
///
/// `--help` and `--version` keep clap's behavior and exit 0.
#[must_use]
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            eprintln!();
            let _ = <T as clap::CommandFactory>::command().print_help();
            std::process::exit(1);
        }
    }
}
