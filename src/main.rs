use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use roster::logging::init_tracing;
use roster::metrics::{init_metrics, metrics_app};
use roster::router::init_router;
use roster::state::AppState;
use roster_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use roster_db::init_db_pool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialize logging")?;

    let server_config = ServerConfig::from_env();
    let jwt_config = JwtConfig::resolve().context("Invalid token configuration")?;
    let database_config = DatabaseConfig::from_env()?;

    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run migrations")?;

    if let Some(handle) = init_metrics().context("Failed to install metrics recorder")? {
        let metrics_listener = tokio::net::TcpListener::bind(server_config.metrics_address())
            .await
            .context("Failed to bind metrics port")?;
        info!(address = %server_config.metrics_address(), "Metrics available at /metrics");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                tracing::error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let state = AppState::new(db, jwt_config, CorsConfig::from_env());
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.address())
        .await
        .with_context(|| format!("Failed to bind {}", server_config.address()))?;

    info!(address = %server_config.address(), "🚀 Server running");
    info!("📚 Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
