use crate::constants::GROUP_CHANNEL_PREFIX;
use crate::error::ChattrError;
use async_trait::async_trait;
use uuid::Uuid;

/// Channel operations the external chat platform must expose. Every call
/// is awaited to completion before the owning group operation proceeds;
/// a failed call fails the whole operation, with no retry.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn create_channel(
        &self,
        channel_id: &str,
        owner_id: &str,
        member_ids: &[String],
    ) -> Result<(), ChattrError>;
    async fn add_members(&self, channel_id: &str, member_ids: &[String]) -> Result<(), ChattrError>;
    async fn remove_members(&self, channel_id: &str, member_ids: &[String]) -> Result<(), ChattrError>;
    async fn rename_channel(&self, channel_id: &str, name: &str) -> Result<(), ChattrError>;
    async fn delete_channel(&self, channel_id: &str) -> Result<(), ChattrError>;
}

/// Mints a fresh channel id carrying the group prefix.
pub fn new_group_channel_id() -> String {
    format!("{}{}", GROUP_CHANNEL_PREFIX, Uuid::new_v4())
}

pub fn is_group_channel(channel_id: &str) -> bool {
    channel_id.starts_with(GROUP_CHANNEL_PREFIX)
}

pub mod in_memory;
