pub mod group;
pub mod user;
pub mod webhook;

pub use group::{Group, GroupDetails, GroupMember, GroupSettings, GroupSettingsPatch, MemberProfile, Role};
pub use user::User;
pub use webhook::{WebhookChannel, WebhookEvent, WebhookMessage, WebhookSender};
