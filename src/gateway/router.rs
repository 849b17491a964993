//! HTTP router and handlers
//!
//! Every handler is a direct proxy: extract credentials, forward one or two
//! calls to the identity provider, map the outcome to the fixed JSON
//! contract. Failure mapping lives in [`crate::error`]; handlers only chain
//! the upstream calls with `?`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::{Value, json};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use super::docs;
use crate::provider::{CreateUserRequest, ProviderClient};
use crate::{Error, Result};

/// Shared application state
pub struct AppState {
    /// Identity-provider client
    pub provider: ProviderClient,
}

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(public_handler))
        .route("/api/userinfo", get(userinfo_handler))
        .route("/api/groups", get(user_groups_handler))
        .route("/api/list-groups", get(list_groups_handler))
        .route(
            "/api/users",
            get(list_users_handler).post(create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            put(update_user_handler).delete(delete_user_handler),
        )
        .route(
            "/api/users/{user_id}/groups/{group_id}",
            put(add_user_to_group_handler),
        )
        .route("/docs", get(docs::explorer_handler))
        .route("/docs/openapi.json", get(docs::descriptor_handler))
        .layer(CatchPanicLayer::new())
        // Browser clients call the gateway from other origins
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The Authorization header exactly as the caller supplied it
fn authorization_header(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(Error::TokenMissing)
}

/// GET /api - public endpoint, no credential required
async fn public_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the public API!" }))
}

/// GET /api/userinfo - introspect the caller's token
async fn userinfo_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let authorization = authorization_header(&headers)?;
    let user_info = state.provider.userinfo(authorization).await?;
    Ok(Json(user_info))
}

/// GET /api/groups - groups of the calling user
///
/// Two sequential upstream calls: introspection yields the subject id, then
/// the admin API is queried for that subject's groups.
async fn user_groups_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let authorization = authorization_header(&headers)?;
    let user_info = state.provider.userinfo(authorization).await?;

    // A userinfo object without a subject is unusable for the lookup
    let sub = user_info
        .get("sub")
        .and_then(Value::as_str)
        .ok_or(Error::TokenRejected)?;

    let groups = state.provider.user_groups(sub).await?;
    Ok(Json(groups))
}

/// GET /api/list-groups - all groups in the realm
async fn list_groups_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let groups = state.provider.list_groups().await?;
    Ok(Json(groups))
}

/// GET /api/users - all users in the realm
async fn list_users_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let users = state.provider.list_users().await?;
    Ok(Json(users))
}

/// POST /api/users - create a user
async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    state
        .provider
        .create_user(request.into_representation())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

/// DELETE /api/users/{user_id}
///
/// 204 responses carry no body (HTTP forbids one), so success is conveyed
/// by the status alone.
async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    state.provider.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/users/{user_id} - update with an arbitrary passthrough body
async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode> {
    state.provider.update_user(&user_id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/users/{user_id}/groups/{group_id}
async fn add_user_to_group_handler(
    State(state): State<Arc<AppState>>,
    Path((user_id, group_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state.provider.add_user_to_group(&user_id, &group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
