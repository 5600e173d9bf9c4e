use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")] // Ensures JSON uses "admin" / "member"
pub enum Role {
    Admin,
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Member => "member",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupMember {
    pub user_id: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl GroupMember {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(default)]
pub struct GroupSettings {
    pub is_private: bool,
    pub only_admins_can_message: bool,
    pub only_admins_can_add_members: bool,
}

/// Partial update over [`GroupSettings`]. Only the three recognized keys
/// are merged; anything else in the request body is ignored.
#[derive(Clone, Copy, Debug, Default, Deserialize, ToSchema)]
pub struct GroupSettingsPatch {
    pub is_private: Option<bool>,
    pub only_admins_can_message: Option<bool>,
    pub only_admins_can_add_members: Option<bool>,
}

impl GroupSettingsPatch {
    pub fn apply(&self, settings: &mut GroupSettings) {
        if let Some(v) = self.is_private {
            settings.is_private = v;
        }
        if let Some(v) = self.only_admins_can_message {
            settings.only_admins_can_message = v;
        }
        if let Some(v) = self.only_admins_can_add_members {
            settings.only_admins_can_add_members = v;
        }
    }
}

/// The persisted group record. Membership here and the roster of the
/// external channel identified by `channel_id` are kept in step by the
/// group service; `channel_id` never changes once the group exists.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub group_picture: String,
    pub admin_id: String,
    pub members: Vec<GroupMember>,
    pub settings: GroupSettings,
    pub channel_id: String,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn member(&self, user_id: &str) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.member(user_id).is_some()
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_id == user_id
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct MemberProfile {
    pub user: User,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

/// A group as returned to clients, with member ids resolved to profiles.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct GroupDetails {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub group_picture: String,
    pub admin: User,
    pub members: Vec<MemberProfile>,
    pub settings: GroupSettings,
    pub channel_id: String,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
