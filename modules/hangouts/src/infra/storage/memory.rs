use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::contract::model::HangoutSuggestion;
use crate::domain::repo::SuggestionsRepository;

/// Process-local store used with `--mock` or when no database is configured.
#[derive(Default)]
pub struct InMemorySuggestionsRepository {
    suggestions: RwLock<HashMap<Uuid, HangoutSuggestion>>,
}

impl InMemorySuggestionsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_time(mut v: Vec<HangoutSuggestion>) -> Vec<HangoutSuggestion> {
    v.sort_by(|a, b| a.suggested_time.cmp(&b.suggested_time).then(a.id.cmp(&b.id)));
    v
}

#[async_trait]
impl SuggestionsRepository for InMemorySuggestionsRepository {
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<HangoutSuggestion>> {
        Ok(self.suggestions.read().await.get(&id).cloned())
    }

    async fn upsert(&self, suggestion: HangoutSuggestion) -> anyhow::Result<()> {
        self.suggestions
            .write()
            .await
            .insert(suggestion.id, suggestion);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.suggestions.write().await.remove(&id).is_some())
    }

    async fn list_for_member(&self, user_id: &str) -> anyhow::Result<Vec<HangoutSuggestion>> {
        let all = self.suggestions.read().await;
        Ok(by_time(
            all.values().filter(|s| s.involves(user_id)).cloned().collect(),
        ))
    }
}
