//! HTTP surface: routes, handlers and rendering.
//!
//! - `GET /` lists the polls.
//! - `GET /poll/{id}/` shows results and the vote form.
//! - `POST /poll/{id}/` with `vote=<choice id>` records a vote and redirects back.

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod render;

use crate::domain::ports::{PollStore, Renderer};
use crate::utils::error::Result;
use handlers::{home_handler, poll_handler, vote_handler};
use render::TeraRenderer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// State with the built-in page templates.
    pub fn new(store: Arc<dyn PollStore>) -> Result<Self> {
        Ok(Self {
            store,
            renderer: Arc::new(TeraRenderer::new()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/poll/{id}/", get(poll_handler).post(vote_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    info!("Server running on http://{address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shut down");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
