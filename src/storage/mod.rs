use crate::error::ChattrError;
use crate::models::{Group, User};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn upsert_user(&self, user: User) -> Result<(), ChattrError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, ChattrError>;
    async fn save_group(&self, group: Group) -> Result<(), ChattrError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, ChattrError>;
    async fn get_group_by_channel(&self, channel_id: &str) -> Result<Option<Group>, ChattrError>;
    async fn delete_group(&self, group_id: &str) -> Result<(), ChattrError>;
    /// Groups the user belongs to, most recently active first.
    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, ChattrError>;
}

pub mod in_memory;
