mod config;
mod error;
mod routes;
mod state;
mod stats;

use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = config::Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expense_manager_api=debug,tower_http=info".into()),
        )
        .init();

    let db = PgPool::connect(&config.database_url)
        .await
        .expect("Error connecting DB");

    let state = state::AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
    };

    let app = routes::routes(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await.unwrap();

    tracing::info!("server is chilling at http://{}", config.addr());

    axum::serve(listener, app).await.unwrap();
}
