use serde::Deserialize;
use utoipa::ToSchema;

/// Inbound event payload posted by the chat platform. Fields beyond the
/// ones we filter on are accepted and ignored; anything optional may be
/// absent depending on the event type.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub message: Option<WebhookMessage>,
    pub channel: Option<WebhookChannel>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct WebhookMessage {
    pub text: Option<String>,
    pub user: Option<WebhookSender>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct WebhookSender {
    pub id: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct WebhookChannel {
    #[serde(rename = "type")]
    pub channel_type: String,
    pub id: String,
}
