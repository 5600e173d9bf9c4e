use crate::constants::{DEFAULT_GROUP_PICTURE, MAX_GROUP_DESCRIPTION_LEN, MAX_GROUP_NAME_LEN};
use crate::error::ChattrError;
use crate::models::{
    Group, GroupDetails, GroupMember, GroupSettings, GroupSettingsPatch, MemberProfile, Role, User,
};
use crate::provider::{ChatProvider, new_group_channel_id};
use crate::storage::Storage;
use chrono::Utc;
use futures::future::try_join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Fields an admin may change on an existing group. Absent fields are
/// left untouched; `settings` merges key-by-key.
#[derive(Debug, Default)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub group_picture: Option<String>,
    pub settings: Option<GroupSettingsPatch>,
}

/// Owns group lifecycle, membership and permission enforcement, and keeps
/// the external channel roster in step with the local record. Checks run
/// before any side effect; provider calls complete before the record is
/// durably saved.
pub struct GroupService<S: Storage, P: ChatProvider> {
    pub storage: S,
    pub provider: P,
}

impl<S: Storage, P: ChatProvider> GroupService<S, P> {
    pub fn new(storage: S, provider: P) -> Self {
        GroupService { storage, provider }
    }

    pub async fn upsert_user(&self, user: User) -> Result<(), ChattrError> {
        debug!("Mirroring profile for user {}", user.id);
        self.storage.upsert_user(user).await
    }

    pub async fn create_group(
        &self,
        creator_id: &str,
        name: String,
        description: Option<String>,
        member_ids: Vec<String>,
        settings: GroupSettingsPatch,
    ) -> Result<GroupDetails, ChattrError> {
        info!("Creating group '{}' for user {}", name, creator_id);
        let name = Self::validate_name(name)?;
        let description = Self::validate_description(description)?;

        let mut initial_members: Vec<String> = Vec::new();
        for id in member_ids {
            if id != creator_id && !initial_members.contains(&id) {
                initial_members.push(id);
            }
        }

        // Channel first: a failed provider call must leave no local record.
        let channel_id = new_group_channel_id();
        self.provider
            .create_channel(&channel_id, creator_id, &initial_members)
            .await?;

        let now = Utc::now();
        let mut group_settings = GroupSettings::default();
        settings.apply(&mut group_settings);

        let mut members = vec![GroupMember {
            user_id: creator_id.to_string(),
            role: Role::Admin,
            joined_at: now,
        }];
        members.extend(initial_members.into_iter().map(|user_id| GroupMember {
            user_id,
            role: Role::Member,
            joined_at: now,
        }));

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            group_picture: DEFAULT_GROUP_PICTURE.to_string(),
            admin_id: creator_id.to_string(),
            members,
            settings: group_settings,
            channel_id: channel_id.clone(),
            last_activity_at: now,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.storage.save_group(group.clone()).await {
            warn!(
                "Group record save failed after channel {} was created; channel leaked: {}",
                channel_id, e
            );
            return Err(e);
        }
        debug!("Group {} created with channel {}", group.id, group.channel_id);

        self.resolve(group).await
    }

    pub async fn get_user_groups(&self, user_id: &str) -> Result<Vec<GroupDetails>, ChattrError> {
        let groups = self.storage.get_user_groups(user_id).await?;
        try_join_all(groups.into_iter().map(|g| self.resolve(g))).await
    }

    pub async fn get_group_details(
        &self,
        group_id: &str,
        requester_id: &str,
    ) -> Result<GroupDetails, ChattrError> {
        let group = self.load_group(group_id).await?;
        if !group.is_member(requester_id) {
            warn!(
                "User {} requested details of group {} without membership",
                requester_id, group_id
            );
            return Err(ChattrError::NotGroupMember(requester_id.to_string()));
        }
        self.resolve(group).await
    }

    pub async fn add_members(
        &self,
        group_id: &str,
        requester_id: &str,
        candidate_ids: Vec<String>,
    ) -> Result<GroupDetails, ChattrError> {
        info!(
            "User {} adding {} candidate(s) to group {}",
            requester_id,
            candidate_ids.len(),
            group_id
        );
        let mut group = self.load_group(group_id).await?;
        let requester = group
            .member(requester_id)
            .ok_or_else(|| ChattrError::NotGroupMember(requester_id.to_string()))?;
        if group.settings.only_admins_can_add_members && !requester.is_admin() {
            warn!(
                "User {} attempted to add members to admin-gated group {}",
                requester_id, group_id
            );
            return Err(ChattrError::OnlyAdminsCanAddMembers);
        }

        let mut new_ids: Vec<String> = Vec::new();
        for id in candidate_ids {
            if !group.is_member(&id) && !new_ids.contains(&id) {
                new_ids.push(id);
            }
        }
        if new_ids.is_empty() {
            debug!("No new members for group {}; nothing to do", group_id);
            return self.resolve(group).await;
        }

        self.provider.add_members(&group.channel_id, &new_ids).await?;

        let now = Utc::now();
        group.members.extend(new_ids.iter().map(|id| GroupMember {
            user_id: id.clone(),
            role: Role::Member,
            joined_at: now,
        }));
        group.last_activity_at = now;
        group.updated_at = now;
        self.save_after_channel_sync(group.clone()).await?;
        debug!("Added {} member(s) to group {}", new_ids.len(), group_id);

        self.resolve(group).await
    }

    pub async fn remove_member(
        &self,
        group_id: &str,
        requester_id: &str,
        target_id: &str,
    ) -> Result<GroupDetails, ChattrError> {
        info!(
            "User {} removing user {} from group {}",
            requester_id, target_id, group_id
        );
        let mut group = self.load_group(group_id).await?;
        if !group.is_admin(requester_id) {
            warn!(
                "User {} attempted to remove a member from group {} without admin role",
                requester_id, group_id
            );
            return Err(ChattrError::NotGroupAdmin(requester_id.to_string()));
        }
        if target_id == group.admin_id {
            warn!("Attempted to remove admin from group {}", group_id);
            return Err(ChattrError::CannotRemoveAdmin);
        }
        if !group.is_member(target_id) {
            return Err(ChattrError::NotGroupMember(target_id.to_string()));
        }

        self.provider
            .remove_members(&group.channel_id, &[target_id.to_string()])
            .await?;

        let now = Utc::now();
        group.members.retain(|m| m.user_id != target_id);
        group.last_activity_at = now;
        group.updated_at = now;
        self.save_after_channel_sync(group.clone()).await?;
        debug!("User {} removed from group {}", target_id, group_id);

        self.resolve(group).await
    }

    pub async fn update_group(
        &self,
        group_id: &str,
        requester_id: &str,
        update: GroupUpdate,
    ) -> Result<GroupDetails, ChattrError> {
        info!("User {} updating group {}", requester_id, group_id);
        let mut group = self.load_group(group_id).await?;
        if !group.is_admin(requester_id) {
            warn!(
                "User {} attempted to update group {} without admin role",
                requester_id, group_id
            );
            return Err(ChattrError::NotGroupAdmin(requester_id.to_string()));
        }

        let new_name = match update.name {
            Some(name) => Some(Self::validate_name(name)?),
            None => None,
        };
        if let Some(description) = update.description {
            group.description = Self::validate_description(Some(description))?;
        }
        if let Some(picture) = update.group_picture {
            group.group_picture = picture;
        }
        if let Some(patch) = update.settings {
            patch.apply(&mut group.settings);
        }
        if let Some(name) = new_name {
            // Mirror the display name before the record becomes durable.
            self.provider.rename_channel(&group.channel_id, &name).await?;
            group.name = name;
        }

        let now = Utc::now();
        group.last_activity_at = now;
        group.updated_at = now;
        self.save_after_channel_sync(group.clone()).await?;
        debug!("Group {} updated", group_id);

        self.resolve(group).await
    }

    pub async fn leave_group(&self, group_id: &str, requester_id: &str) -> Result<(), ChattrError> {
        info!("User {} leaving group {}", requester_id, group_id);
        let mut group = self.load_group(group_id).await?;
        if group.is_admin(requester_id) {
            warn!("Admin {} attempted to leave group {}", requester_id, group_id);
            return Err(ChattrError::AdminCannotLeave);
        }
        if !group.is_member(requester_id) {
            return Err(ChattrError::NotGroupMember(requester_id.to_string()));
        }

        self.provider
            .remove_members(&group.channel_id, &[requester_id.to_string()])
            .await?;

        let now = Utc::now();
        group.members.retain(|m| m.user_id != requester_id);
        group.last_activity_at = now;
        group.updated_at = now;
        self.save_after_channel_sync(group).await?;
        debug!("User {} left group {}", requester_id, group_id);
        Ok(())
    }

    pub async fn transfer_admin(
        &self,
        group_id: &str,
        requester_id: &str,
        new_admin_id: &str,
    ) -> Result<GroupDetails, ChattrError> {
        info!(
            "Transferring admin of group {} from user {} to user {}",
            group_id, requester_id, new_admin_id
        );
        let mut group = self.load_group(group_id).await?;
        if !group.is_admin(requester_id) {
            warn!(
                "User {} attempted to transfer admin of group {} without admin role",
                requester_id, group_id
            );
            return Err(ChattrError::NotGroupAdmin(requester_id.to_string()));
        }
        if new_admin_id == requester_id {
            return self.resolve(group).await;
        }
        if !group.is_member(new_admin_id) {
            warn!(
                "New admin {} is not a member of group {}",
                new_admin_id, group_id
            );
            return Err(ChattrError::NewAdminNotMember(new_admin_id.to_string()));
        }

        group.admin_id = new_admin_id.to_string();
        for member in &mut group.members {
            member.role = if member.user_id == new_admin_id {
                Role::Admin
            } else {
                Role::Member
            };
        }
        let now = Utc::now();
        group.last_activity_at = now;
        group.updated_at = now;
        self.storage.save_group(group.clone()).await?;
        debug!("Admin of group {} is now {}", group_id, new_admin_id);

        self.resolve(group).await
    }

    pub async fn delete_group(&self, group_id: &str, requester_id: &str) -> Result<(), ChattrError> {
        info!("User {} deleting group {}", requester_id, group_id);
        let group = self.load_group(group_id).await?;
        if !group.is_admin(requester_id) {
            warn!(
                "User {} attempted to delete group {} without admin role",
                requester_id, group_id
            );
            return Err(ChattrError::NotGroupAdmin(requester_id.to_string()));
        }

        // Channel teardown first: keep the record if the platform still
        // holds a channel users could otherwise never reach again.
        self.provider.delete_channel(&group.channel_id).await?;
        self.storage.delete_group(group_id).await?;
        debug!("Group {} deleted", group_id);
        Ok(())
    }

    /// Lookup for the webhook path; trusted, so no membership check.
    pub async fn find_group_by_channel(&self, channel_id: &str) -> Result<Option<Group>, ChattrError> {
        self.storage.get_group_by_channel(channel_id).await
    }

    async fn load_group(&self, group_id: &str) -> Result<Group, ChattrError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| ChattrError::GroupNotFound(group_id.to_string()))
    }

    async fn save_after_channel_sync(&self, group: Group) -> Result<(), ChattrError> {
        let group_id = group.id.clone();
        if let Err(e) = self.storage.save_group(group).await {
            warn!(
                "Record save for group {} failed after the channel was already updated: {}",
                group_id, e
            );
            return Err(e);
        }
        Ok(())
    }

    async fn resolve(&self, group: Group) -> Result<GroupDetails, ChattrError> {
        let members = try_join_all(group.members.iter().map(|m| async move {
            let user = self
                .storage
                .get_user(&m.user_id)
                .await?
                .unwrap_or_else(|| User::placeholder(&m.user_id));
            Ok::<MemberProfile, ChattrError>(MemberProfile {
                user,
                role: m.role,
                joined_at: m.joined_at,
            })
        }))
        .await?;
        let admin = self
            .storage
            .get_user(&group.admin_id)
            .await?
            .unwrap_or_else(|| User::placeholder(&group.admin_id));

        Ok(GroupDetails {
            id: group.id,
            name: group.name,
            description: group.description,
            group_picture: group.group_picture,
            admin,
            members,
            settings: group.settings,
            channel_id: group.channel_id,
            last_activity_at: group.last_activity_at,
            created_at: group.created_at,
            updated_at: group.updated_at,
        })
    }

    fn validate_name(name: String) -> Result<String, ChattrError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ChattrError::MissingGroupName);
        }
        if name.len() > MAX_GROUP_NAME_LEN {
            return Err(ChattrError::GroupNameTooLong(MAX_GROUP_NAME_LEN));
        }
        Ok(name)
    }

    fn validate_description(description: Option<String>) -> Result<Option<String>, ChattrError> {
        match description {
            Some(d) => {
                let d = d.trim().to_string();
                if d.len() > MAX_GROUP_DESCRIPTION_LEN {
                    return Err(ChattrError::GroupDescriptionTooLong(MAX_GROUP_DESCRIPTION_LEN));
                }
                Ok(if d.is_empty() { None } else { Some(d) })
            }
            None => Ok(None),
        }
    }
}
