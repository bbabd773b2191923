use std::env;

use tracing_subscriber::EnvFilter;

use fallguard_api::config::ApiConfig;
use fallguard_api::router;
use fallguard_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for the log pipeline
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ApiConfig::from_env()?;
    let cors = config.cors_layer()?;
    let state = AppState::from_config(&config).await;
    let app = router(state).layer(cors);

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        tracing::info!("starting under the Lambda runtime");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
