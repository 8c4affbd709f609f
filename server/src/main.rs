use anyhow::Context;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get_service, MethodRouter},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app_config;

use app_config::{AppConfig, AssetsConfig};

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

async fn handle_io_error(err: std::io::Error) -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to serve file: {err}"),
    )
}

fn serve_dir(dir: &str) -> MethodRouter {
    get_service(ServeDir::new(dir)).handle_error(handle_io_error)
}

/// `/static` comes from the static dir, everything else from the trunk build.
fn router(assets: &AssetsConfig) -> Router {
    Router::new()
        .nest("/static", serve_dir(&assets.static_dir))
        .fallback(serve_dir(&assets.dist_dir))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("server=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let conf = AppConfig::load(DEFAULT_CONFIG_PATH)
        .with_context(|| format!("failed to load config from {DEFAULT_CONFIG_PATH}"))?;
    let addr = conf.http_config.socket_addr()?;
    let app = router(&conf.assets_config);

    info!("serving {} on {addr}", conf.assets_config.dist_dir);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("server stopped")?;
    Ok(())
}
