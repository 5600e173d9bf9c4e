use crate::constants::{MESSAGE_NEW_EVENT, MESSAGING_CHANNEL_TYPE};
use crate::models::WebhookEvent;
use crate::notify::NotificationHook;
use crate::provider::{ChatProvider, is_group_channel};
use crate::service::GroupService;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Inbound side of the provider integration: filters platform events down
/// to new messages in group channels and hands them to the notification
/// hook. Processing never fails the webhook acknowledgement; the platform
/// would retry-storm on anything but success.
pub struct WebhookRelay<S: Storage, P: ChatProvider, N: NotificationHook> {
    groups: Arc<GroupService<S, P>>,
    notifier: N,
}

impl<S: Storage, P: ChatProvider, N: NotificationHook> WebhookRelay<S, P, N> {
    pub fn new(groups: Arc<GroupService<S, P>>, notifier: N) -> Self {
        WebhookRelay { groups, notifier }
    }

    pub async fn handle_event(&self, event: WebhookEvent) {
        if event.event_type != MESSAGE_NEW_EVENT {
            debug!("Ignoring webhook event of type {}", event.event_type);
            return;
        }
        let Some(channel) = event.channel else {
            debug!("Message event without channel payload; ignoring");
            return;
        };
        if channel.channel_type != MESSAGING_CHANNEL_TYPE || !is_group_channel(&channel.id) {
            debug!("Ignoring message in non-group channel {}", channel.id);
            return;
        }

        let group = match self.groups.find_group_by_channel(&channel.id).await {
            Ok(Some(group)) => group,
            Ok(None) => {
                debug!("No group for channel {}; ignoring", channel.id);
                return;
            }
            Err(e) => {
                warn!("Group lookup for channel {} failed: {}", channel.id, e);
                return;
            }
        };

        let Some(message) = event.message else {
            debug!("Message event without message payload; ignoring");
            return;
        };
        let Some(sender) = message.user else {
            debug!("Message event without sender; ignoring");
            return;
        };

        self.notifier
            .notify(&group.id, &sender.id, message.text.as_deref().unwrap_or(""))
            .await;
        debug!(
            "Forwarded message notification for group {} from user {}",
            group.id, sender.id
        );
    }
}
