use crate::error::ChattrError;
use crate::provider::ChatProvider;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
struct ChannelRecord {
    name: Option<String>,
    owner_id: String,
    members: HashSet<String>,
}

/// Stand-in for the remote chat platform keeping channel rosters in
/// process memory. The dev server runs against it, and tests use it to
/// observe exactly what the platform was told.
pub struct InMemoryChatProvider {
    channels: Mutex<HashMap<String, ChannelRecord>>,
}

impl InMemoryChatProvider {
    pub fn new() -> Self {
        InMemoryChatProvider {
            channels: Mutex::new(HashMap::new()),
        }
    }

    pub async fn channel_exists(&self, channel_id: &str) -> bool {
        self.channels.lock().await.contains_key(channel_id)
    }

    pub async fn channel_members(&self, channel_id: &str) -> Option<Vec<String>> {
        self.channels.lock().await.get(channel_id).map(|c| {
            let mut members: Vec<String> = c.members.iter().cloned().collect();
            members.sort();
            members
        })
    }

    pub async fn channel_name(&self, channel_id: &str) -> Option<String> {
        self.channels.lock().await.get(channel_id).and_then(|c| c.name.clone())
    }

    pub async fn channel_owner(&self, channel_id: &str) -> Option<String> {
        self.channels.lock().await.get(channel_id).map(|c| c.owner_id.clone())
    }
}

impl Default for InMemoryChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for InMemoryChatProvider {
    async fn create_channel(
        &self,
        channel_id: &str,
        owner_id: &str,
        member_ids: &[String],
    ) -> Result<(), ChattrError> {
        let mut channels = self.channels.lock().await;
        if channels.contains_key(channel_id) {
            return Err(ChattrError::Provider(format!(
                "channel {} already exists",
                channel_id
            )));
        }
        let mut members: HashSet<String> = member_ids.iter().cloned().collect();
        members.insert(owner_id.to_string());
        channels.insert(
            channel_id.to_string(),
            ChannelRecord {
                name: None,
                owner_id: owner_id.to_string(),
                members,
            },
        );
        Ok(())
    }

    async fn add_members(&self, channel_id: &str, member_ids: &[String]) -> Result<(), ChattrError> {
        let mut channels = self.channels.lock().await;
        let channel = channels
            .get_mut(channel_id)
            .ok_or_else(|| ChattrError::Provider(format!("channel {} not found", channel_id)))?;
        channel.members.extend(member_ids.iter().cloned());
        Ok(())
    }

    async fn remove_members(&self, channel_id: &str, member_ids: &[String]) -> Result<(), ChattrError> {
        let mut channels = self.channels.lock().await;
        let channel = channels
            .get_mut(channel_id)
            .ok_or_else(|| ChattrError::Provider(format!("channel {} not found", channel_id)))?;
        for member_id in member_ids {
            channel.members.remove(member_id);
        }
        Ok(())
    }

    async fn rename_channel(&self, channel_id: &str, name: &str) -> Result<(), ChattrError> {
        let mut channels = self.channels.lock().await;
        let channel = channels
            .get_mut(channel_id)
            .ok_or_else(|| ChattrError::Provider(format!("channel {} not found", channel_id)))?;
        channel.name = Some(name.to_string());
        Ok(())
    }

    async fn delete_channel(&self, channel_id: &str) -> Result<(), ChattrError> {
        let mut channels = self.channels.lock().await;
        channels
            .remove(channel_id)
            .ok_or_else(|| ChattrError::Provider(format!("channel {} not found", channel_id)))?;
        Ok(())
    }
}
