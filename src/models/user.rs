use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Profile mirrored from the external identity subsystem. Chattr never
/// authenticates or mutates these beyond upserting the mirror copy.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

impl User {
    /// Stand-in for a member whose profile has not been mirrored yet.
    pub fn placeholder(id: &str) -> Self {
        User {
            id: id.to_string(),
            name: id.to_string(),
            profile_picture: None,
        }
    }
}
