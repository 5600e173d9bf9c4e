use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ChattrError;
use crate::models::GroupSettingsPatch;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct UpsertUserRequest {
    pub id: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub settings: GroupSettingsPatch,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMembersRequest {
    pub member_ids: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveMemberRequest {
    pub member_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub group_picture: Option<String>,
    pub settings: Option<GroupSettingsPatch>,
}

#[derive(Deserialize, ToSchema)]
pub struct TransferAdminRequest {
    pub new_admin_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct AckResponse {
    pub success: bool,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for ChattrError to implement IntoResponse
pub struct ApiError(pub ChattrError);

impl From<ChattrError> for ApiError {
    fn from(err: ChattrError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ChattrError::MissingGroupName
            | ChattrError::GroupNameTooLong(_)
            | ChattrError::GroupDescriptionTooLong(_)
            | ChattrError::CannotRemoveAdmin
            | ChattrError::AdminCannotLeave
            | ChattrError::NewAdminNotMember(_) => StatusCode::BAD_REQUEST,
            ChattrError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            ChattrError::NotGroupMember(_)
            | ChattrError::NotGroupAdmin(_)
            | ChattrError::OnlyAdminsCanAddMembers => StatusCode::FORBIDDEN,
            ChattrError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ChattrError::Provider(_) => StatusCode::BAD_GATEWAY,
            ChattrError::Storage(_) | ChattrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
