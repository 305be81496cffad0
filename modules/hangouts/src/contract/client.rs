use async_trait::async_trait;

use crate::contract::{error::HangoutsError, model::HangoutSuggestion};

/// Public API of the hangouts module for other modules (via ClientHub).
#[async_trait]
pub trait HangoutsApi: Send + Sync {
    /// Suggestions created by or involving `user_id`, earliest first.
    async fn suggestions_for(&self, user_id: &str)
        -> Result<Vec<HangoutSuggestion>, HangoutsError>;
}
