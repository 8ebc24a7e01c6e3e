//! Clowder API Server
//!
//! REST API for managing users and their cats, with ownership-based
//! authorization and bounding-box area queries.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

pub use auth::{HmacTokenVerifier, TokenVerifier};
pub use error::ApiError;
pub use state::AppState;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Users
        .route("/api/users", post(handlers::create_user).get(handlers::list_users))
        .route("/api/users/:id", get(handlers::get_user))
        // Cats
        .route("/api/cats", post(handlers::create_cat).get(handlers::list_cats))
        .route("/api/cats/mine", get(handlers::get_own_cats))
        .route("/api/cats/area", get(handlers::cats_by_area))
        .route(
            "/api/cats/:id",
            get(handlers::get_cat)
                .put(handlers::update_cat)
                .delete(handlers::delete_cat),
        )
        .route("/api/cats/:id/owner", put(handlers::reassign_cat_owner))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
