// ABOUTME: HTTP server assembly: router, CORS, tracing middleware, startup warm-up, serve loop
// ABOUTME: The model artifact is loaded or trained before the listener binds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::resources::ServerResources;
use crate::routes::{BodyMetricsRoutes, HealthRoutes, PredictionRoutes};
use anyhow::{Context, Result};
use axum::Router;
use http::HeaderValue;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Upper bound on request bodies (histories are small)
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Covers a retrain triggered by a corrupt artifact mid-flight
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Configure CORS for the configured origin list
///
/// Credentials are allowed, so wildcards are expressed by mirroring the request
/// rather than with `*`.
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let wildcard = config.cors_allowed_origins.iter().any(|origin| origin == "*");
    let allow_origin = if wildcard {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Build the full application router
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(PredictionRoutes::routes(resources.clone()))
        .merge(BodyMetricsRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Load the artifact, training it first if necessary
///
/// # Errors
///
/// Returns an error if training or persisting the model fails
pub async fn warm_up(resources: &ServerResources) -> Result<()> {
    let provider = resources.provider().clone();
    let artifact = tokio::task::spawn_blocking(move || provider.artifact())
        .await
        .context("Model warm-up task panicked")??;

    info!(
        samples = artifact.n_training_samples,
        created_at = %artifact.created_at,
        "Fitness model ready"
    );
    Ok(())
}

/// Warm the model, bind, and serve until ctrl-c
///
/// # Errors
///
/// Returns an error if warm-up fails, the address cannot be bound, or serving fails
pub async fn run(resources: ServerResources) -> Result<()> {
    warm_up(&resources).await?;

    let address = resources.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Fitcast API listening on http://{address}");

    let app = build_router(Arc::new(resources));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Fitcast API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
