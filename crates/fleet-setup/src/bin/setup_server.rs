//! OAuth setup server - Entry Point

use fleet_setup::cli::{SetupArgs, parse_or_exit};
use fleet_setup::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli: SetupArgs = parse_or_exit();

    telemetry::init_tracing(&cli.logging.log_level, cli.logging.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        domain = %cli.domain,
        region = %cli.region,
        "*** Starting setup server ***"
    );

    let router = server::setup::create_router(cli.to_config())?;
    server::serve(router, cli.port).await
}
