mod relay_tests;

use crate::error::ChattrError;
use crate::models::User;
use crate::notify::NotificationHook;
use crate::provider::ChatProvider;
use crate::provider::in_memory::InMemoryChatProvider;
use crate::service::GroupService;
use crate::storage::in_memory::InMemoryStorage;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn create_test_service() -> GroupService<InMemoryStorage, InMemoryChatProvider> {
    GroupService::new(InMemoryStorage::new(), InMemoryChatProvider::new())
}

pub async fn seed_users<S, P>(service: &GroupService<S, P>, ids: &[&str])
where
    S: crate::storage::Storage,
    P: ChatProvider,
{
    for id in ids {
        service
            .upsert_user(User {
                id: id.to_string(),
                name: format!("User {}", id),
                profile_picture: None,
            })
            .await
            .unwrap();
    }
}

/// Provider double that fails selected calls, for the atomicity and
/// ordering cases.
#[derive(Default)]
pub struct FailingProvider {
    pub fail_create: bool,
    pub fail_delete: bool,
}

#[async_trait]
impl ChatProvider for FailingProvider {
    async fn create_channel(
        &self,
        _channel_id: &str,
        _owner_id: &str,
        _member_ids: &[String],
    ) -> Result<(), ChattrError> {
        if self.fail_create {
            return Err(ChattrError::Provider("simulated create failure".to_string()));
        }
        Ok(())
    }

    async fn add_members(&self, _channel_id: &str, _member_ids: &[String]) -> Result<(), ChattrError> {
        Ok(())
    }

    async fn remove_members(&self, _channel_id: &str, _member_ids: &[String]) -> Result<(), ChattrError> {
        Ok(())
    }

    async fn rename_channel(&self, _channel_id: &str, _name: &str) -> Result<(), ChattrError> {
        Ok(())
    }

    async fn delete_channel(&self, _channel_id: &str) -> Result<(), ChattrError> {
        if self.fail_delete {
            return Err(ChattrError::Provider("simulated delete failure".to_string()));
        }
        Ok(())
    }
}

/// Hook double capturing every forwarded notification.
#[derive(Clone, Default)]
pub struct RecordingHook {
    pub notifications: Arc<Mutex<Vec<(String, String, String)>>>,
}

#[async_trait]
impl NotificationHook for RecordingHook {
    async fn notify(&self, group_id: &str, sender_id: &str, message: &str) {
        self.notifications
            .lock()
            .await
            .push((group_id.to_string(), sender_id.to_string(), message.to_string()));
    }
}
