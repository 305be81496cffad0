use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use modkit::AuthSubject;
use profiles::client::ProfilesApi;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{
    Activity, Dashboard, HangoutSuggestion, NewSuggestion, ParticipantResponse, SuggestionDraft,
    SuggestionStatus, CREATED_BY_AI,
};
use crate::domain::catalog::catalog;
use crate::domain::error::DomainError;
use crate::domain::generator::SuggestionGenerator;
use crate::domain::lifecycle;
use crate::domain::planner::Planner;
use crate::domain::repo::SuggestionsRepository;

/// Hangouts domain service. Every action is one read-modify-write against
/// the repository; concurrent writers race and the last one wins.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn SuggestionsRepository>,
    profiles: Arc<dyn ProfilesApi>,
    generator: Option<Arc<dyn SuggestionGenerator>>,
    planner: Arc<Planner>,
}

/// Order-preserving de-duplication.
fn dedup(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        if !id.is_empty() && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

fn sort_by_time(mut suggestions: Vec<HangoutSuggestion>) -> Vec<HangoutSuggestion> {
    suggestions.sort_by(|a, b| {
        a.suggested_time
            .cmp(&b.suggested_time)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    suggestions
}

impl Service {
    pub fn new(
        repo: Arc<dyn SuggestionsRepository>,
        profiles: Arc<dyn ProfilesApi>,
        planner: Arc<Planner>,
    ) -> Self {
        Self {
            repo,
            profiles,
            generator: None,
            planner,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn SuggestionGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    async fn collection(&self, user_id: &str) -> Result<Vec<HangoutSuggestion>, DomainError> {
        let all = self
            .repo
            .list_for_member(user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        Ok(sort_by_time(all))
    }

    /// The caller's collection plus the target when the caller is not involved
    /// in it, so membership errors are reported as such.
    async fn working_set(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Vec<HangoutSuggestion>, DomainError> {
        let mut working = self.collection(user_id).await?;
        if !working.iter().any(|s| s.id == id) {
            if let Some(target) = self
                .repo
                .find(id)
                .await
                .map_err(|e| DomainError::database(e.to_string()))?
            {
                working.push(target);
            }
        }
        Ok(working)
    }

    /// Persist the single record a transition touched.
    async fn persist(&self, id: Uuid, after: &[HangoutSuggestion]) -> Result<(), DomainError> {
        let result = match after.iter().find(|s| s.id == id) {
            Some(updated) => self.repo.upsert(updated.clone()).await,
            None => self.repo.delete(id).await.map(|removed| {
                debug!(%id, removed, "suggestion removed");
            }),
        };
        result.map_err(|e| DomainError::database(e.to_string()))
    }

    async fn apply(
        &self,
        subject: &AuthSubject,
        id: Uuid,
        transition: impl FnOnce(
            Vec<HangoutSuggestion>,
        ) -> Result<Vec<HangoutSuggestion>, lifecycle::LifecycleError>,
    ) -> Result<Vec<HangoutSuggestion>, DomainError> {
        let working = self.working_set(&subject.id, id).await?;
        let after = transition(working)?;
        self.persist(id, &after).await?;
        Ok(sort_by_time(
            after
                .into_iter()
                .filter(|s| s.involves(&subject.id))
                .collect(),
        ))
    }

    #[instrument(name = "hangouts.service.list_for", skip(self, subject), fields(user_id = %subject.id))]
    pub async fn list_for(
        &self,
        subject: &AuthSubject,
    ) -> Result<Vec<HangoutSuggestion>, DomainError> {
        self.collection(&subject.id).await
    }

    /// User-authored suggestion; the creator is always a participant.
    #[instrument(name = "hangouts.service.create", skip(self, subject, new), fields(user_id = %subject.id))]
    pub async fn create(
        &self,
        subject: &AuthSubject,
        new: NewSuggestion,
    ) -> Result<HangoutSuggestion, DomainError> {
        let participants = dedup(std::iter::once(subject.id.clone()).chain(new.participants));
        let suggestion = HangoutSuggestion {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            location: new.location,
            suggested_time: new.suggested_time,
            duration: new.duration,
            activity: new.activity,
            participants,
            status: SuggestionStatus::Pending,
            responses: BTreeMap::new(),
            created_by: subject.id.clone(),
            created_at: Utc::now(),
        };

        self.repo
            .upsert(suggestion.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        info!(id = %suggestion.id, participants = suggestion.participants.len(), "suggestion created");
        Ok(suggestion)
    }

    /// Suggestion for the caller and their buddies. The external generator is
    /// tried first when configured; any failure falls back to the planner.
    #[instrument(name = "hangouts.service.generate", skip(self, subject), fields(user_id = %subject.id))]
    pub async fn generate(&self, subject: &AuthSubject) -> Result<HangoutSuggestion, DomainError> {
        let profile = self.profiles.get_or_create(subject).await?;
        let existing = self.collection(&subject.id).await?;
        let participants = dedup(
            std::iter::once(profile.id.clone()).chain(profile.buddies.iter().cloned()),
        );

        let draft: SuggestionDraft = match &self.generator {
            Some(generator) => match generator
                .generate(&profile, &existing, participants.len())
                .await
            {
                Ok(draft) => draft,
                Err(e) => {
                    warn!(error = %e, "generator failed, using local planner");
                    self.planner.plan(&profile, &existing)
                }
            },
            None => self.planner.plan(&profile, &existing),
        };

        let suggestion = HangoutSuggestion {
            id: Uuid::new_v4(),
            title: draft.activity.clone(),
            description: draft.description,
            location: draft.location,
            suggested_time: draft.suggested_time,
            duration: draft.duration,
            activity: draft.activity,
            participants,
            status: SuggestionStatus::Pending,
            responses: BTreeMap::new(),
            created_by: CREATED_BY_AI.to_string(),
            created_at: Utc::now(),
        };

        self.repo
            .upsert(suggestion.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        info!(id = %suggestion.id, activity = %suggestion.activity, "suggestion generated");
        Ok(suggestion)
    }

    #[instrument(name = "hangouts.service.respond", skip(self, subject), fields(user_id = %subject.id))]
    pub async fn respond(
        &self,
        subject: &AuthSubject,
        id: Uuid,
        response: ParticipantResponse,
    ) -> Result<Vec<HangoutSuggestion>, DomainError> {
        self.apply(subject, id, |coll| {
            lifecycle::record_response(coll, id, &subject.id, response)
        })
        .await
    }

    #[instrument(name = "hangouts.service.unaccept", skip(self, subject), fields(user_id = %subject.id))]
    pub async fn unaccept(
        &self,
        subject: &AuthSubject,
        id: Uuid,
    ) -> Result<Vec<HangoutSuggestion>, DomainError> {
        self.apply(subject, id, |coll| lifecycle::unaccept(coll, id, &subject.id))
            .await
    }

    #[instrument(name = "hangouts.service.delete", skip(self, subject), fields(user_id = %subject.id))]
    pub async fn delete(
        &self,
        subject: &AuthSubject,
        id: Uuid,
    ) -> Result<Vec<HangoutSuggestion>, DomainError> {
        self.apply(subject, id, |coll| lifecycle::remove(coll, id, &subject.id))
            .await
    }

    #[instrument(name = "hangouts.service.dashboard", skip(self, subject), fields(user_id = %subject.id))]
    pub async fn dashboard(&self, subject: &AuthSubject) -> Result<Dashboard, DomainError> {
        let profile = self.profiles.get_or_create(subject).await?;
        let suggestions = self.collection(&subject.id).await?;
        let weekday = self.planner.local_weekday(Utc::now());

        let (pending, accepted) = suggestions.into_iter().fold(
            (Vec::new(), Vec::new()),
            |(mut pending, mut accepted), s| {
                match s.status {
                    SuggestionStatus::Pending => pending.push(s),
                    SuggestionStatus::Accepted => accepted.push(s),
                    _ => {}
                }
                (pending, accepted)
            },
        );

        Ok(Dashboard {
            todays_classes: profile.classes_on(weekday).into_iter().cloned().collect(),
            name: profile.name,
            interest_count: profile.interests.len(),
            major_count: profile.majors.len(),
            buddy_count: profile.buddies.len(),
            pending,
            accepted,
        })
    }

    pub fn activities(&self) -> Vec<Activity> {
        catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let ids = dedup(
            ["u1", "u2", "u1", "", "u3", "u2"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }
}
