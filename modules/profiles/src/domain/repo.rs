use async_trait::async_trait;

use crate::contract::model::UserProfile;

/// Persistence port for profiles, keyed by subject id.
/// Whole-document writes; the last write wins.
#[async_trait]
pub trait ProfilesRepository: Send + Sync {
    async fn find(&self, id: &str) -> anyhow::Result<Option<UserProfile>>;
    /// Case-insensitive email lookup.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserProfile>>;
    async fn upsert(&self, profile: UserProfile) -> anyhow::Result<()>;
    /// All profiles ordered by creation time.
    async fn list_all(&self) -> anyhow::Result<Vec<UserProfile>>;
}
