use async_trait::async_trait;
use modkit::AuthSubject;

use crate::contract::{error::ProfilesError, model::UserProfile};

/// Public API of the profiles module for other modules (via ClientHub).
#[async_trait]
pub trait ProfilesApi: Send + Sync {
    /// Load the caller's profile, creating an empty one on first access.
    async fn get_or_create(&self, subject: &AuthSubject) -> Result<UserProfile, ProfilesError>;

    /// Load a profile by subject id.
    async fn get_profile(&self, id: &str) -> Result<UserProfile, ProfilesError>;
}
