use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

mod app;
mod config;
mod dto;
mod error;
mod middleware;
mod routes;
mod runner;
mod service;
mod state;
mod telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let args = config::Args::parse();
    let cfg = config::load_config(args.config.as_deref())?;

    telemetry::init(&cfg.telemetry, &cfg.log_level)?;

    let gateway = match pipewatch_gateway::PaymentGateway::new(cfg.gateway.clone()) {
        Ok(g) => Some(Arc::new(g)),
        Err(e) => {
            warn!(error = %e, "payment gateway disabled");
            None
        }
    };

    let app_state = state::AppState::new(cfg.clone(), gateway);

    let router = app::build_router(app_state);

    let addr: SocketAddr = cfg.listen_addr.parse()?;
    info!(%addr, environment = %cfg.environment, "starting pipewatch-api");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
