use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::HangoutSuggestion;

/// Storage port for suggestions: one record per suggestion, last write wins.
#[async_trait]
pub trait SuggestionsRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<HangoutSuggestion>>;

    async fn upsert(&self, suggestion: HangoutSuggestion) -> anyhow::Result<()>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    /// Suggestions created by or involving `user_id`, earliest first.
    async fn list_for_member(&self, user_id: &str) -> anyhow::Result<Vec<HangoutSuggestion>>;
}
