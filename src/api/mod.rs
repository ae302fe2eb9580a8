//! HTTP layer: submission intake, polling, result pages and report mailing.

pub mod error;
pub mod routes;
pub mod types;
pub mod views;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, routing::post, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{report::Mailer, store::DocumentStore};

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/checkSentiment", post(routes::submit_sentence))
        .route("/get_analysis", get(routes::get_analysis))
        .route("/emotion_intensity/:request_id", get(routes::emotion_intensity))
        .route("/results/:request_id", get(routes::view_results))
        .route(
            "/send_pdf/:request_id",
            get(routes::email_form).post(routes::send_pdf),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving sentiment-garage");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
