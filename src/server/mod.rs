pub mod handlers;
mod types;

pub use handlers::AppState;
pub use types::HealthResponse;

use crate::{Result, bedrock::BedrockClient, config::Config, gateway::Gateway};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{info, warn};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::inference))
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handlers::handle_panic)),
        )
        .with_state(state)
}

pub async fn run(mut config: Config) -> Result<()> {
    if config.bedrock.api_key.is_none() {
        config.bedrock.api_key = std::env::var("AWS_BEARER_TOKEN_BEDROCK").ok();
    }
    if config.bedrock.api_key.is_none() {
        warn!("No Bedrock API key configured; requests will be sent without credentials");
    }

    // One client, and so one connection pool, shared by every request
    let backend = BedrockClient::new(&config.bedrock)?;
    info!("Using Bedrock endpoint {}", backend.endpoint());

    let gateway = Gateway::new(Arc::new(backend), &config);
    let app = router(AppState::new(gateway));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
