use async_trait::async_trait;
use tracing::info;

/// Outbound notification seam for new group messages. Implementations
/// must not fail or block the webhook response; delivery is best-effort.
#[async_trait]
pub trait NotificationHook: Send + Sync {
    async fn notify(&self, group_id: &str, sender_id: &str, message: &str);
}

/// Default hook: writes a log line instead of delivering anything. A real
/// push/email implementation slots in without touching the relay.
pub struct LogNotificationHook;

#[async_trait]
impl NotificationHook for LogNotificationHook {
    async fn notify(&self, group_id: &str, sender_id: &str, message: &str) {
        info!(
            "Group message notification would be sent for group {} from user {} ({} bytes)",
            group_id,
            sender_id,
            message.len()
        );
    }
}
