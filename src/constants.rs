/// Maximum length of a group name, in bytes.
pub const MAX_GROUP_NAME_LEN: usize = 50;

/// Maximum length of a group description, in bytes.
pub const MAX_GROUP_DESCRIPTION_LEN: usize = 200;

/// Prefix marking a provider channel as one of our group channels.
pub const GROUP_CHANNEL_PREFIX: &str = "group-";

/// Provider channel type carrying group conversations.
pub const MESSAGING_CHANNEL_TYPE: &str = "messaging";

/// Webhook event type for a newly posted message.
pub const MESSAGE_NEW_EVENT: &str = "message.new";

/// Picture shown for groups that never set one.
pub const DEFAULT_GROUP_PICTURE: &str = "https://via.placeholder.com/150?text=Group";
