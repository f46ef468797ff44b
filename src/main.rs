use plateful::state::AppState;
use plateful::{app, config, database, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting Plateful in {:?} mode", config.environment);

    // Configuration errors (duplicate names, bad patterns) are fatal here,
    // before anything is listening.
    let routes = routes::build()?;
    tracing::info!(routes = routes.len(), "route table built");

    let pool = database::connect().await?;
    let state = AppState { pool, routes };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
