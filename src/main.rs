use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use url::Url;

use rankwatch::{api, AppState, Config, GoogleClient, SearchService, SqliteSearchResultRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env();

    // Create HTTP client
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
        .connect_timeout(std::time::Duration::from_secs(
            config.http_connect_timeout_secs,
        ))
        .build()?;

    let engine_base = Url::parse(&config.engine_base_url)?;
    let engine = Arc::new(GoogleClient::with_base_url(http_client, engine_base));

    info!("Opening history store at {}", config.database_url);
    let repository = Arc::new(SqliteSearchResultRepository::connect(&config.database_url).await?);

    let service = Arc::new(SearchService::new(engine, repository, config.max_results));
    let state = AppState::new(service);

    // Build router
    let app = api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Address already in use: {}. Stop the existing process or run with --port {} (or set RANKWATCH_PORT/PORT).",
                bind_addr,
                config.port.saturating_add(1)
            )
        }
        Err(e) => return Err(e.into()),
    };
    info!("rankwatch listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).ok();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = async {
                match sigterm.as_mut() {
                    Some(s) => { s.recv().await; }
                    None => std::future::pending::<()>().await,
                }
            } => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
}
