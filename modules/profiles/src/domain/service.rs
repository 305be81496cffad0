use std::sync::Arc;

use chrono::Utc;
use modkit::AuthSubject;
use tracing::{debug, info, instrument};

use crate::contract::model::{ProfilePatch, UserProfile, UserSummary};
use crate::domain::error::DomainError;
use crate::domain::repo::ProfilesRepository;

/// Domain service for profiles. Depends only on the repository port.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ProfilesRepository>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub directory_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            directory_limit: 1000,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn ProfilesRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    async fn load(&self, id: &str) -> Result<Option<UserProfile>, DomainError> {
        self.repo
            .find(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    async fn save(&self, profile: UserProfile) -> Result<UserProfile, DomainError> {
        self.repo
            .upsert(profile.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        Ok(profile)
    }

    async fn require(&self, id: &str) -> Result<UserProfile, DomainError> {
        self.load(id)
            .await?
            .ok_or_else(|| DomainError::profile_not_found(id))
    }

    /// First authenticated access creates an empty profile from the subject's claims.
    #[instrument(name = "profiles.service.get_or_create", skip(self, subject), fields(user_id = %subject.id))]
    pub async fn get_or_create(&self, subject: &AuthSubject) -> Result<UserProfile, DomainError> {
        if let Some(existing) = self.load(&subject.id).await? {
            debug!("profile found");
            return Ok(existing);
        }

        let now = Utc::now();
        let profile = UserProfile {
            id: subject.id.clone(),
            name: subject.name.clone(),
            email: subject.email.clone(),
            interests: Vec::new(),
            majors: Vec::new(),
            schedule: Vec::new(),
            buddies: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        info!("creating profile on first access");
        self.save(profile).await
    }

    #[instrument(name = "profiles.service.get", skip(self))]
    pub async fn get(&self, id: &str) -> Result<UserProfile, DomainError> {
        self.require(id).await
    }

    /// `$set`-style partial update; fields absent from the patch are kept.
    #[instrument(name = "profiles.service.update", skip(self, patch))]
    pub async fn update(&self, id: &str, patch: ProfilePatch) -> Result<UserProfile, DomainError> {
        if let Some(schedule) = &patch.schedule {
            if let Some((index, class)) = schedule
                .iter()
                .enumerate()
                .find(|(_, c)| c.day_of_week > 6)
            {
                return Err(DomainError::invalid_weekday(index, class.day_of_week));
            }
        }

        let mut current = self.require(id).await?;

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(email) = patch.email {
            current.email = email;
        }
        if let Some(interests) = patch.interests {
            current.interests = interests;
        }
        if let Some(majors) = patch.majors {
            current.majors = majors;
        }
        if let Some(schedule) = patch.schedule {
            current.schedule = schedule;
        }
        if let Some(buddies) = patch.buddies {
            current.buddies = buddies;
        }
        current.updated_at = Utc::now();

        info!("profile updated");
        self.save(current).await
    }

    #[instrument(name = "profiles.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, DomainError> {
        let all = self
            .repo
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!(total = all.len(), "listing user directory");
        Ok(all
            .iter()
            .take(self.config.directory_limit)
            .map(UserProfile::summary)
            .collect())
    }

    /// Adds the profile registered under `email` as a buddy. Adding oneself or
    /// an existing buddy leaves the profile unchanged.
    #[instrument(name = "profiles.service.add_buddy", skip(self))]
    pub async fn add_buddy_by_email(
        &self,
        id: &str,
        email: &str,
    ) -> Result<UserProfile, DomainError> {
        let mut current = self.require(id).await?;
        let buddy = self
            .repo
            .find_by_email(email.trim())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::buddy_not_found(email.trim()))?;

        if buddy.id == current.id || current.buddies.contains(&buddy.id) {
            debug!(buddy_id = %buddy.id, "buddy already present");
            return Ok(current);
        }

        current.buddies.push(buddy.id);
        current.updated_at = Utc::now();
        self.save(current).await
    }

    #[instrument(name = "profiles.service.remove_buddy", skip(self))]
    pub async fn remove_buddy(&self, id: &str, buddy_id: &str) -> Result<UserProfile, DomainError> {
        let mut current = self.require(id).await?;
        let before = current.buddies.len();
        current.buddies.retain(|b| b != buddy_id);
        if current.buddies.len() == before {
            return Ok(current);
        }
        current.updated_at = Utc::now();
        self.save(current).await
    }
}
