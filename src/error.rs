use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum ChattrError {
    /// Group name is missing or blank
    #[error("Group name is required")]
    MissingGroupName,

    /// Group name exceeds the allowed length
    #[error("Group name cannot exceed {0} characters")]
    GroupNameTooLong(usize),

    /// Group description exceeds the allowed length
    #[error("Group description cannot exceed {0} characters")]
    GroupDescriptionTooLong(usize),

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// Requester is not a member of the group
    #[error("User {0} is not a member of this group")]
    NotGroupMember(String),

    /// Requester is a member but not the group admin
    #[error("User {0} is not the group admin")]
    NotGroupAdmin(String),

    /// Member addition is restricted to the admin by group settings
    #[error("Only admins can add members")]
    OnlyAdminsCanAddMembers,

    /// The admin cannot be removed through member removal
    #[error("Cannot remove group admin")]
    CannotRemoveAdmin,

    /// The admin cannot leave without handing the group over
    #[error("Admin cannot leave group. Transfer ownership first.")]
    AdminCannotLeave,

    /// Admin rights can only go to an existing member
    #[error("User {0} is not a group member and cannot become admin")]
    NewAdminNotMember(String),

    /// Request carried no usable caller identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The external chat platform rejected or failed a channel call
    #[error("Chat provider error: {0}")]
    Provider(String),

    /// Persistence failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Catch-all for unexpected failures
    #[error("Internal server error: {0}")]
    Internal(String),
}
