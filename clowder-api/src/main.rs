//! Clowder - Main Application Entry Point
//!
//! Cat registry with JWT-derived identity, a single ownership/role
//! authorization policy, and bounding-box location queries.

use clowder_api::{AppState, HmacTokenVerifier};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,clowder_api=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    // The verification secret comes from the environment; there is no
    // baked-in default.
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| "JWT_SECRET must be set to the token verification secret")?;

    tracing::info!("Starting Clowder server on {}:{}", host, port);

    let storage = Arc::new(clowder_storage::InMemoryStorage::new());
    let verifier = Arc::new(HmacTokenVerifier::from_secret(secret.as_bytes()));

    // Create shared application state
    let app_state = Arc::new(AppState::with_storage(storage, verifier));

    // Build our application with routes
    let app = clowder_api::create_router(app_state);

    // Run it
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
