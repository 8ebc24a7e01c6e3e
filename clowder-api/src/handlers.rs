//! API request handlers
//!
//! Handlers are thin: resolve the caller, ask the policy engine, then act
//! on storage. Every mutation of a cat goes through `authorize` before
//! storage is touched.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use clowder_auth::{authorize, Action, AuthzDecision, Identity};
use clowder_core::{
    Cat, CreateCatRequest, CreateUserRequest, ReassignOwnerRequest, UpdateCatRequest, User,
};
use clowder_geo::{BoundingBox, Point};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiError, AppState};

/// Turn a policy decision into `Ok` or the matching rejection.
fn ensure_allowed(decision: AuthzDecision) -> Result<(), ApiError> {
    if decision.allowed {
        Ok(())
    } else {
        Err(ApiError::from_denial(decision))
    }
}

fn require_identity(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    state
        .identity(headers)
        .ok_or_else(|| ApiError::Unauthorized("no identity presented".to_string()))
}

// ==================== Cat Handlers ====================

/// Create a new cat, owned by the caller
pub async fn create_cat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateCatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = require_identity(&state, &headers)?;

    let mut cat = Cat::new(
        req.cat_name,
        req.weight,
        req.birthdate,
        req.location,
        identity.subject_id,
    );
    cat.filename = req.filename;

    let saved = state.cat_storage.save(cat).await?;

    tracing::info!("Created cat '{}' for owner {}", saved.cat_name, saved.owner);

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Get a cat by ID
pub async fn get_cat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cat = state.cat_storage.get_by_id(id).await?;

    match cat {
        Some(c) => Ok(Json(c)),
        None => Err(ApiError::NotFound(format!("Cat {} not found", id))),
    }
}

/// List all cats
pub async fn list_cats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let cats = state.cat_storage.list().await?;
    Ok(Json(cats))
}

/// List the caller's own cats
pub async fn get_own_cats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let identity = require_identity(&state, &headers)?;
    let cats = state.cat_storage.list_by_owner(identity.subject_id).await?;
    Ok(Json(cats))
}

/// Update a cat. Owner or admin only; the owner field is never touched here.
pub async fn update_cat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<UpdateCatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = state.identity(&headers);

    let mut cat = state
        .cat_storage
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Cat {} not found", id)))?;

    ensure_allowed(authorize(identity.as_ref(), cat.owner, Action::Update))?;

    req.apply(&mut cat);
    let saved = state.cat_storage.update(cat).await?;

    tracing::info!("Updated cat '{}'", saved.cat_name);

    Ok(Json(saved))
}

/// Delete a cat. Owner or admin only.
pub async fn delete_cat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let identity = state.identity(&headers);

    let cat = state
        .cat_storage
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Cat {} not found", id)))?;

    ensure_allowed(authorize(identity.as_ref(), cat.owner, Action::Delete))?;

    let deleted = state.cat_storage.delete(cat.id).await?;

    tracing::info!("Deleted cat '{}'", deleted.cat_name);

    Ok(Json(deleted))
}

/// Reassign a cat to another owner. Admin only, owner included.
pub async fn reassign_cat_owner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<ReassignOwnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = state.identity(&headers);

    let mut cat = state
        .cat_storage
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Cat {} not found", id)))?;

    ensure_allowed(authorize(identity.as_ref(), cat.owner, Action::ReassignOwner))?;

    if state.user_storage.get_by_id(req.owner).await?.is_none() {
        return Err(ApiError::BadRequest(format!(
            "User {} does not exist",
            req.owner
        )));
    }

    cat.owner = req.owner;
    let saved = state.cat_storage.update(cat).await?;

    tracing::info!("Reassigned cat '{}' to owner {}", saved.cat_name, saved.owner);

    Ok(Json(saved))
}

// ==================== Area Query Handler ====================

/// Corner query parameters as the clients send them: two comma-separated
/// `"lon,lat"` strings.
#[derive(Debug, Deserialize)]
pub struct AreaQuery {
    #[serde(rename = "topRight")]
    pub top_right: String,
    #[serde(rename = "bottomLeft")]
    pub bottom_left: String,
}

/// Parse one `"lon,lat"` corner into the engine's named-field point.
/// This is the only place the wire coordinate order is known.
fn parse_corner(name: &str, raw: &str) -> Result<Point, ApiError> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [lon, lat] = parts.as_slice() else {
        return Err(ApiError::BadRequest(format!(
            "{} must be \"lon,lat\", got \"{}\"",
            name, raw
        )));
    };
    let longitude: f64 = lon.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!("{} longitude \"{}\" is not a number", name, lon))
    })?;
    let latitude: f64 = lat.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!("{} latitude \"{}\" is not a number", name, lat))
    })?;
    Ok(Point::new(latitude, longitude))
}

/// List cats within a bounding box
pub async fn cats_by_area(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AreaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let north_east = parse_corner("topRight", &query.top_right)?;
    let south_west = parse_corner("bottomLeft", &query.bottom_left)?;

    let bbox = BoundingBox::new(south_west, north_east);
    bbox.validate()?;

    let cats = state.cat_storage.find_in_box(&bbox).await?;
    Ok(Json(cats))
}

// ==================== User Handlers ====================

/// Create a new user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = User::new(req.user_name, req.email);
    let saved = state.user_storage.save(user).await?;

    tracing::info!("Created user '{}'", saved.user_name);

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_storage.get_by_id(id).await?;

    match user {
        Some(u) => Ok(Json(u)),
        None => Err(ApiError::NotFound(format!("User {} not found", id))),
    }
}

/// List all users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_storage.list().await?;
    Ok(Json(users))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "clowder"
    }))
}
