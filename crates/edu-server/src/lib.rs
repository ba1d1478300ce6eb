//! # edu-server
//!
//! HTTP API for edushare: past papers, syllabi and study materials filtered
//! by stream, branch and year, plus a small blog with view and reaction
//! counters.
//!
//! Every route answers with the [`edu_core::responses::ApiResponse`] envelope.
//! The database handle is injected through [`AppState`], so tests build the
//! router over an in-memory [`edu_db::EduDb`].

use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use edu_config::ServerConfig;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod cli;
pub mod error;
pub mod handlers;
pub mod import;
pub mod state;

pub use state::AppState;

use handlers::{documents, posts};

/// All routes, with state attached but no middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        // Document collections
        .route("/getPdfs", get(documents::all_papers))
        .route(
            "/getPdfs/{stream}/{branch}/{branchYear}",
            get(documents::papers_by_filter),
        )
        .route(
            "/getSyllabus/{stream}/{branch}/{branchYear}",
            get(documents::syllabi_by_filter),
        )
        .route(
            "/getStudyMaterials/{stream}/{branch}/{branchYear}",
            get(documents::study_materials_by_filter),
        )
        .route("/Cpdf", get(documents::dump_papers))
        .route("/CSyllabus", get(documents::dump_syllabi))
        .route("/CS", get(documents::dump_study_materials))
        // Posts
        .route("/allPost", get(posts::all_posts))
        .route("/singlePost/{id}", get(posts::single_post))
        .route("/posts/{postId}/{type}", post(posts::react))
        .route("/fetchCategory", get(posts::fetch_categories))
        .route("/createPost", post(posts::create_post))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// CORS policy from configuration. An empty `allowed_origin` allows any origin.
///
/// # Errors
///
/// Returns an error if the configured origin is not a valid header value.
pub fn cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let origin = if config.restricts_origin() {
        let value = HeaderValue::from_str(&config.allowed_origin)
            .with_context(|| format!("invalid allowed_origin '{}'", config.allowed_origin))?;
        AllowOrigin::exact(value)
    } else {
        AllowOrigin::any()
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Bind and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the CORS origin is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = router(state)
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http());

    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!("Failed to install signal handler: {err}");
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
}
