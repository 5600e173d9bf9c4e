use crate::error::ChattrError;
use crate::models::{Group, User};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct InMemoryStorage {
    users: Mutex<HashMap<String, User>>,
    groups: Mutex<HashMap<String, Group>>,
    channels: Mutex<HashMap<String, String>>, // channel_id -> group_id
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Mutex::new(HashMap::new()),
            groups: Mutex::new(HashMap::new()),
            channels: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn upsert_user(&self, user: User) -> Result<(), ChattrError> {
        self.users.lock().await.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, ChattrError> {
        Ok(self.users.lock().await.get(user_id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), ChattrError> {
        // For production: use database transactions
        let mut groups = self.groups.lock().await;
        let mut channels = self.channels.lock().await;
        channels.insert(group.channel_id.clone(), group.id.clone());
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, ChattrError> {
        Ok(self.groups.lock().await.get(group_id).cloned())
    }

    async fn get_group_by_channel(&self, channel_id: &str) -> Result<Option<Group>, ChattrError> {
        // For production: use database index on channel_id
        let group_id = self.channels.lock().await.get(channel_id).cloned();
        Ok(match group_id {
            Some(id) => self.groups.lock().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn delete_group(&self, group_id: &str) -> Result<(), ChattrError> {
        let mut groups = self.groups.lock().await;
        if let Some(group) = groups.remove(group_id) {
            self.channels.lock().await.remove(&group.channel_id);
        }
        Ok(())
    }

    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, ChattrError> {
        // For production: use database query with index on members.user_id
        let mut groups: Vec<Group> = self
            .groups
            .lock()
            .await
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect();
        groups.sort_by(|a, b| b.last_activity_at.cmp(&a.last_activity_at));
        Ok(groups)
    }
}
