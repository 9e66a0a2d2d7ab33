use axum::{
    middleware,
    routing::{get, patch, post, put},
    Json, Router,
};
use tower_http::cors::CorsLayer;

mod auth;
mod health;
mod middleware_auth;
pub mod expenses;
pub mod notifications;
pub mod tasks;

pub use health::health;

use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    let task_router = Router::new()
        .route("/", post(tasks::routes::create).get(tasks::routes::list))
        .route("/stats", get(tasks::routes::stats))
        .route(
            "/{id}",
            get(tasks::routes::get)
                .put(tasks::routes::update)
                .delete(tasks::routes::delete),
        )
        .route("/{id}/status", patch(tasks::routes::update_status));

    let expense_router = Router::new()
        .route(
            "/",
            post(expenses::routes::create).get(expenses::routes::list),
        )
        .route("/stats", get(expenses::routes::stats))
        .route("/categories", get(expenses::routes::categories))
        .route(
            "/{id}",
            get(expenses::routes::get)
                .put(expenses::routes::update)
                .delete(expenses::routes::delete),
        );

    let notification_router = Router::new()
        .route("/", get(notifications::routes::list))
        .route("/{id}/read", put(notifications::routes::mark_read));

    let protected = Router::new()
        .route("/auth/profile", get(auth::profile))
        .route("/auth/users", get(auth::users))
        .nest("/tasks", task_router)
        .nest("/expenses", expense_router)
        .nest("/notifications", notification_router)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_auth::require_auth,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .nest("/api", protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Expense Manager API is running" }))
}
