use mock_server::{EndpointConfig, MockConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn status_from_env(name: &str) -> Option<u16> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = MockConfig::default();
    if let Some(status) = status_from_env("PRIMARY_STATUS") {
        config.primary = EndpointConfig::failing(status);
    }
    if let Some(status) = status_from_env("SECONDARY_STATUS") {
        config.secondary = EndpointConfig::failing(status);
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run_with(listener, config).await
}
