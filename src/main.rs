use gym_dashboard::{load_summary, resolve_summary_path, router, AppState, UpstreamClient};
use std::{env, net::SocketAddr};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let summary_path = resolve_summary_path();
    let summary = load_summary(&summary_path).await;

    let upstream_url =
        env::var("UPSTREAM_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let state = AppState::new(summary, UpstreamClient::new(&upstream_url));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("dashboard listening on http://{addr}, club backend at {upstream_url}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
