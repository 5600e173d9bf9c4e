use crate::{
    api::models::*,
    auth::{Claims, JwtService},
    error::ChattrError,
    models::{GroupDetails, User, WebhookEvent},
    notify::LogNotificationHook,
    provider::in_memory::InMemoryChatProvider,
    relay::WebhookRelay,
    service::{GroupService, GroupUpdate},
    storage::in_memory::InMemoryStorage,
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;
use std::sync::Arc;

pub type AppGroupService = GroupService<InMemoryStorage, InMemoryChatProvider>;
pub type AppWebhookRelay = WebhookRelay<InMemoryStorage, InMemoryChatProvider, LogNotificationHook>;

#[derive(Clone)]
pub struct AppState {
    pub groups: Arc<AppGroupService>,
    pub relay: Arc<AppWebhookRelay>,
    pub jwt: Arc<JwtService>,
}

/// Middleware resolving the caller identity from a Bearer token minted by
/// the identity subsystem.
pub(crate) async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ChattrError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ChattrError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = state.jwt.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/groups", post(create_group).get(get_user_groups))
        .route(
            "/groups/{group_id}",
            get(get_group_details).put(update_group).delete(delete_group),
        )
        .route("/groups/{group_id}/members", post(add_members).delete(remove_member))
        .route("/groups/{group_id}/leave", post(leave_group))
        .route("/groups/{group_id}/ownership", post(transfer_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(|| async { "OK" }))
        .route("/users", post(upsert_user)) // Unprotected: identity-subsystem mirror
        .route("/webhooks/provider", post(provider_webhook)) // Unprotected: platform callback
        .merge(protected_routes)
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UpsertUserRequest,
    responses(
        (status = 201, description = "Profile mirrored"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn upsert_user(
    State(state): State<AppState>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .groups
        .upsert_user(User {
            id: req.id,
            name: req.name,
            profile_picture: req.profile_picture,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = GroupDetails),
        (status = 400, description = "Invalid name or description", body = ErrorResponse),
        (status = 502, description = "Channel provisioning failed", body = ErrorResponse)
    )
)]
pub(crate) async fn create_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupDetails>), ApiError> {
    let group = state
        .groups
        .create_group(&claims.sub, req.name, req.description, req.member_ids, req.settings)
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/groups",
    responses(
        (status = 200, description = "Groups the caller belongs to, most recently active first", body = [GroupDetails])
    )
)]
pub(crate) async fn get_user_groups(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<GroupDetails>>, ApiError> {
    let groups = state.groups.get_user_groups(&claims.sub).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    responses(
        (status = 200, description = "Group details", body = GroupDetails),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_details(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupDetails>, ApiError> {
    let group = state.groups.get_group_details(&group_id, &claims.sub).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/members",
    request_body = AddMembersRequest,
    responses(
        (status = 200, description = "Members added (duplicates dropped)", body = GroupDetails),
        (status = 403, description = "Caller may not add members", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn add_members(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMembersRequest>,
) -> Result<Json<GroupDetails>, ApiError> {
    let group = state
        .groups
        .add_members(&group_id, &claims.sub, req.member_ids)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/groups/{group_id}/members",
    request_body = RemoveMemberRequest,
    responses(
        (status = 200, description = "Member removed", body = GroupDetails),
        (status = 400, description = "Target is the group admin", body = ErrorResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn remove_member(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<RemoveMemberRequest>,
) -> Result<Json<GroupDetails>, ApiError> {
    let group = state
        .groups
        .remove_member(&group_id, &claims.sub, &req.member_id)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    put,
    path = "/groups/{group_id}",
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Group updated", body = GroupDetails),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn update_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<GroupDetails>, ApiError> {
    let update = GroupUpdate {
        name: req.name,
        description: req.description,
        group_picture: req.group_picture,
        settings: req.settings,
    };
    let group = state.groups.update_group(&group_id, &claims.sub, update).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/leave",
    responses(
        (status = 200, description = "Left the group", body = AckResponse),
        (status = 400, description = "Admin must transfer ownership first", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn leave_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.groups.leave_group(&group_id, &claims.sub).await?;
    Ok(Json(AckResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/ownership",
    request_body = TransferAdminRequest,
    responses(
        (status = 200, description = "Admin rights transferred", body = GroupDetails),
        (status = 400, description = "New admin is not a member", body = ErrorResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn transfer_admin(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<TransferAdminRequest>,
) -> Result<Json<GroupDetails>, ApiError> {
    let group = state
        .groups
        .transfer_admin(&group_id, &claims.sub, &req.new_admin_id)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/groups/{group_id}",
    responses(
        (status = 200, description = "Group and channel deleted", body = AckResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 502, description = "Channel teardown failed; group kept", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.groups.delete_group(&group_id, &claims.sub).await?;
    Ok(Json(AckResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/webhooks/provider",
    request_body = WebhookEvent,
    responses(
        (status = 200, description = "Event received", body = AckResponse),
        (status = 400, description = "Malformed payload", body = ErrorResponse)
    )
)]
pub(crate) async fn provider_webhook(
    State(state): State<AppState>,
    Json(event): Json<WebhookEvent>,
) -> Json<AckResponse> {
    // Processing failures stay internal; a non-2xx here would make the
    // platform retry events we will never care about.
    state.relay.handle_event(event).await;
    Json(AckResponse { success: true })
}
