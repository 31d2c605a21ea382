//! ebx exporter
//!
//! Serves synthetic eBanking telemetry:
//! - `/metrics` : Prometheus text format
//! - `/health`  : liveness
//! - background simulation loop writing into the shared registry

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use ebx_core::error::Result;
use ebx_exporter::{app_state, config, router, server, sim};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "ebx-exporter failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_or_default(config::DEFAULT_CONFIG_PATH)?;
    let listen = cfg.exporter.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    sim::Simulator::from_config(state.metrics(), &state.cfg().simulation).spawn();

    let profile = state.cfg().simulation.profile.as_str();
    let app = router::build_router(state);

    tracing::info!(%listen, profile, "ebx-exporter starting");
    let listener = server::bind(listen).await?;
    server::serve(listener, app).await
}
