use std::sync::Arc;

use anyhow::Context;
use telematics::{RiskModel, load_model};
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(features::quote::handlers::calculate_premium),
    components(
        schemas(
            telematics::dto::quote::QuoteRequest,
            telematics::dto::quote::RawTripPoint,
            telematics::dto::quote::QuoteResponse,
        )
    ),
    tags(
        (name = "pricing", description = "Trip risk scoring and premium quotes"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting trip pricing API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Loading risk model from: {}", config.model_path);
    let model: Option<Arc<dyn RiskModel>> = match load_model(&config.model_path) {
        Ok(model) => Some(Arc::from(model)),
        Err(e) => {
            // Quote requests answer 500 until a valid artifact is deployed.
            tracing::error!("Failed to load risk model: {}", e);
            None
        }
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, routes::app(AppState::new(model))).await?;

    Ok(())
}
