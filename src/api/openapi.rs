use utoipa::OpenApi;

use crate::{
    api::models::{
        AckResponse, AddMembersRequest, CreateGroupRequest, ErrorResponse, RemoveMemberRequest,
        TransferAdminRequest, UpdateGroupRequest, UpsertUserRequest,
    },
    models::{
        Group, GroupDetails, GroupMember, GroupSettings, GroupSettingsPatch, MemberProfile, Role,
        User, WebhookChannel, WebhookEvent, WebhookMessage, WebhookSender,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::upsert_user,
        super::handlers::create_group,
        super::handlers::get_user_groups,
        super::handlers::get_group_details,
        super::handlers::add_members,
        super::handlers::remove_member,
        super::handlers::update_group,
        super::handlers::leave_group,
        super::handlers::transfer_admin,
        super::handlers::delete_group,
        super::handlers::provider_webhook
    ),
    components(schemas(
        UpsertUserRequest,
        CreateGroupRequest,
        AddMembersRequest,
        RemoveMemberRequest,
        UpdateGroupRequest,
        TransferAdminRequest,
        AckResponse,
        ErrorResponse,
        User,
        Role,
        Group,
        GroupMember,
        GroupSettings,
        GroupSettingsPatch,
        GroupDetails,
        MemberProfile,
        WebhookEvent,
        WebhookMessage,
        WebhookSender,
        WebhookChannel
    )),
    info(
        title = "Chattr API",
        description = "Group-chat management on top of an external messaging platform",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
