//! True North server binary.
//!
//! Wires the in-memory adapters into the per-context routers and serves the
//! REST API.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use true_north::adapters::http::{
    dependency_router, matrix_router, pdca_router, DependencyAppState, MatrixAppState,
    PdcaAppState,
};
use true_north::adapters::{InMemoryCollectionStore, InMemoryEventBus};
use true_north::config::AppConfig;
use true_north::ports::collections;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let app = build_app(&config);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "starting true-north server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_app(config: &AppConfig) -> Router {
    let event_publisher = Arc::new(InMemoryEventBus::new());

    let matrix_state = MatrixAppState {
        objectives: Arc::new(InMemoryCollectionStore::new(collections::OBJECTIVES)),
        metrics: Arc::new(InMemoryCollectionStore::new(collections::METRICS)),
        actions: Arc::new(InMemoryCollectionStore::new(collections::ACTIONS)),
        links: Arc::new(InMemoryCollectionStore::new(collections::ALIGNMENT_LINKS)),
        event_publisher: event_publisher.clone(),
    };

    let dependency_state = DependencyAppState {
        dependencies: Arc::new(InMemoryCollectionStore::new(collections::DEPENDENCIES)),
        event_publisher: event_publisher.clone(),
    };

    let pdca_state = PdcaAppState {
        cycles: Arc::new(InMemoryCollectionStore::new(collections::PDCA_CYCLES)),
        event_publisher,
    };

    let cors = cors_layer(config);

    matrix_router()
        .with_state(matrix_state)
        .merge(dependency_router().with_state(dependency_state))
        .merge(pdca_router().with_state(pdca_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
