// ABOUTME: HTTP server assembly: router composition, tower layers and serving
// ABOUTME: Wires route groups with request ids, tracing, error bodies, timeouts and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use crate::errors::AppError;
use crate::middleware::{create_trace_layer, json_error_body, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{ChatRoutes, ConversationRoutes, DevRoutes, HealthRoutes};
use anyhow::{Context, Result};
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

/// Build the application router with every route group and layer
///
/// Layer order, outermost first: request id assignment, tracing, request id
/// propagation to the response, JSON error bodies, timeout, then CORS.
/// Session resolution is a route layer of the conversation routes.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(ChatRoutes::routes())
        .merge(DevRoutes::routes(Arc::clone(&resources)))
        .merge(ConversationRoutes::routes(Arc::clone(&resources)))
        .fallback(|| async { AppError::route_not_found() })
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(create_trace_layer())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::map_response(json_error_body))
                .layer(TimeoutLayer::new(timeout))
                .layer(setup_cors(&resources.config)),
        )
}

/// Bind and serve until ctrl-c or SIGTERM
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound or
/// the server fails while running
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", resources.config.host, resources.config.http_port)
        .parse()
        .context("Invalid HOST/HTTP_PORT combination")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
