//! Public key server - Entry Point

use fleet_setup::cli::{KeyServerArgs, parse_or_exit};
use fleet_setup::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli: KeyServerArgs = parse_or_exit();

    telemetry::init_tracing(&cli.logging.log_level, cli.logging.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_base = %cli.config_base.display(),
        "*** Starting key server ***"
    );

    let router = server::keyserver::create_router(&cli.to_config());
    server::serve(router, cli.port).await
}
