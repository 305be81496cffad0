use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::contract::model::UserProfile;
use crate::domain::repo::ProfilesRepository;
use crate::infra::storage::document::email_key;

/// Process-local store used with `--mock` or when no database is configured.
#[derive(Default)]
pub struct InMemoryProfilesRepository {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfilesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfilesRepository for InMemoryProfilesRepository {
    async fn find(&self, id: &str) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserProfile>> {
        let key = email_key(email);
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|p| email_key(&p.email) == key)
            .cloned())
    }

    async fn upsert(&self, profile: UserProfile) -> anyhow::Result<()> {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile);
        Ok(())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<UserProfile>> {
        let mut all: Vec<UserProfile> = self.profiles.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}
