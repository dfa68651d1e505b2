use std::{net::SocketAddr, process::ExitCode};

use gymedge::server::{
    config::Config, error::Error, model::app::AppState, router, scheduler::Scheduler, startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let bind_address = config.bind_address.clone();

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&config).await?;
    let state = AppState::new(db, config)?;

    Scheduler::new(state.clone()).await?.start().await?;

    let app = router::routes().with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| Error::InternalError(format!("failed to bind {}: {}", bind_address, e)))?;

    tracing::info!("Starting server on {}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| Error::InternalError(e.to_string()))
}
