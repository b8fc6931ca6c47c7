use std::net::SocketAddr;

use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{cors, error::ApiError, state::AppState, static_files, users};

pub const API_PREFIX: &str = "/api";

/// Route table:
///
/// | method  | path                 | handler              |
/// |---------|----------------------|----------------------|
/// | OPTIONS | any                  | empty 200 (preflight)|
/// | GET     | /api/usuarios        | list                 |
/// | POST    | /api/usuarios        | create               |
/// | DELETE  | /api/usuarios/{id}   | soft delete          |
/// | any     | other /api paths     | JSON 404             |
/// | any     | everything else      | static files         |
pub fn build_app(state: AppState) -> Router {
    let router = Router::new()
        .nest(API_PREFIX, users::router())
        .fallback(fallback);

    cors::apply(router).with_state(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                tracing::info_span!(
                    "http_request",
                    %method,
                    uri = %uri,
                    status = tracing::field::Empty
                )
            })
            .on_response(
                |res: &axum::http::Response<_>,
                 _latency: std::time::Duration,
                 span: &tracing::Span| {
                    let status = res.status();
                    span.record("status", tracing::field::display(status));
                    if status.is_server_error() {
                        tracing::error!(%status, "response");
                    } else {
                        tracing::info!(%status, "response");
                    }
                },
            ),
    )
}

async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with(API_PREFIX) {
        return ApiError::RouteNotFound.into_response();
    }
    static_files::serve(&state.config.public_dir, path).await
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to register SIGTERM handler");
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
    info!("shutdown signal received, draining connections");
}
