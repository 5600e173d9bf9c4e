use super::{RecordingHook, create_test_service, seed_users};
use crate::models::{GroupSettingsPatch, WebhookEvent};
use crate::relay::WebhookRelay;
use crate::{InMemoryChatProvider, InMemoryStorage};
use serde_json::json;
use std::sync::Arc;

type TestRelay = WebhookRelay<InMemoryStorage, InMemoryChatProvider, RecordingHook>;

async fn relay_with_group() -> (TestRelay, RecordingHook, String, String) {
    let service = create_test_service();
    seed_users(&service, &["u1", "u2"]).await;
    let group = service
        .create_group(
            "u1",
            "Book Club".to_string(),
            None,
            vec!["u2".to_string()],
            GroupSettingsPatch::default(),
        )
        .await
        .unwrap();

    let hook = RecordingHook::default();
    let relay = WebhookRelay::new(Arc::new(service), hook.clone());
    (relay, hook, group.id, group.channel_id)
}

fn message_event(channel_type: &str, channel_id: &str, sender: &str, text: &str) -> WebhookEvent {
    serde_json::from_value(json!({
        "type": "message.new",
        "message": { "text": text, "user": { "id": sender } },
        "channel": { "type": channel_type, "id": channel_id },
    }))
    .unwrap()
}

#[tokio::test]
async fn group_message_is_forwarded() {
    let (relay, hook, group_id, channel_id) = relay_with_group().await;

    relay
        .handle_event(message_event("messaging", &channel_id, "u2", "hello"))
        .await;

    let notifications = hook.notifications.lock().await;
    assert_eq!(
        notifications.as_slice(),
        &[(group_id, "u2".to_string(), "hello".to_string())]
    );
}

#[tokio::test]
async fn unknown_channel_is_acknowledged_without_forwarding() {
    let (relay, hook, _, _) = relay_with_group().await;

    relay
        .handle_event(message_event("messaging", "group-does-not-exist", "u2", "hello"))
        .await;

    assert!(hook.notifications.lock().await.is_empty());
}

#[tokio::test]
async fn non_message_events_are_ignored() {
    let (relay, hook, _, channel_id) = relay_with_group().await;

    let event: WebhookEvent = serde_json::from_value(json!({
        "type": "member.added",
        "channel": { "type": "messaging", "id": channel_id },
    }))
    .unwrap();
    relay.handle_event(event).await;

    assert!(hook.notifications.lock().await.is_empty());
}

#[tokio::test]
async fn non_group_channels_are_ignored() {
    let (relay, hook, _, channel_id) = relay_with_group().await;

    relay
        .handle_event(message_event("messaging", "direct-123", "u2", "hello"))
        .await;
    relay
        .handle_event(message_event("livestream", &channel_id, "u2", "hello"))
        .await;

    assert!(hook.notifications.lock().await.is_empty());
}

#[tokio::test]
async fn partial_payloads_are_tolerated() {
    let (relay, hook, _, channel_id) = relay_with_group().await;

    // No channel at all.
    let event: WebhookEvent = serde_json::from_value(json!({ "type": "message.new" })).unwrap();
    relay.handle_event(event).await;

    // Channel but no message body.
    let event: WebhookEvent = serde_json::from_value(json!({
        "type": "message.new",
        "channel": { "type": "messaging", "id": channel_id },
    }))
    .unwrap();
    relay.handle_event(event).await;

    assert!(hook.notifications.lock().await.is_empty());
}
