pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recipes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/recipes", post(handlers::handle_generate_recipes))
        .route(
            "/api/v1/estimate-calories",
            post(handlers::handle_estimate_calories),
        )
        .route(
            "/api/v1/generate-steps",
            post(handlers::handle_generate_steps),
        )
        .with_state(state)
}
