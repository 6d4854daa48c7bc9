use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context as _, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use pi_air::{
    dashboard::{Dashboard, Snapshots},
    db::ReadingStore,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::watch};
use tracing::{error, info};

pub struct AppState<S> {
    pub dashboard: Arc<Dashboard<S>>,
    pub snapshots: Snapshots,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            dashboard: Arc::clone(&self.dashboard),
            snapshots: self.snapshots.clone(),
        }
    }
}

pub fn router<S: ReadingStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler::<S>))
        .route("/api/charts/main", get(main_charts_handler::<S>))
        .route("/api/charts/panel", get(panel_charts_handler::<S>))
        .route("/api/charts/minute", get(minute_charts_handler::<S>))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("serving dashboard on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutting down");
}

async fn status_handler<S: ReadingStore>(State(state): State<AppState<S>>) -> Response {
    latest(&state.snapshots.status)
}

async fn main_charts_handler<S: ReadingStore>(State(state): State<AppState<S>>) -> Response {
    latest(&state.snapshots.main)
}

async fn panel_charts_handler<S: ReadingStore>(State(state): State<AppState<S>>) -> Response {
    latest(&state.snapshots.panel)
}

async fn minute_charts_handler<S: ReadingStore>(State(state): State<AppState<S>>) -> Response {
    match state.dashboard.minute_charts(Utc::now()).await {
        Ok(panel) => Json(panel).into_response(),
        Err(err) => {
            error!("failed to build minute charts: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn latest<T: Serialize>(rx: &watch::Receiver<Option<T>>) -> Response {
    match &*rx.borrow() {
        Some(value) => Json(value).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
