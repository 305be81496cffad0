use async_trait::async_trait;
use modkit::AuthSubject;
use std::sync::Arc;

use crate::contract::{client::HangoutsApi, error::HangoutsError, model::HangoutSuggestion};
use crate::domain::{error::DomainError, service::Service};

/// In-process implementation of `HangoutsApi` that delegates to the domain service
pub struct HangoutsLocalClient {
    service: Arc<Service>,
}

impl HangoutsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl HangoutsApi for HangoutsLocalClient {
    async fn suggestions_for(
        &self,
        user_id: &str,
    ) -> Result<Vec<HangoutSuggestion>, HangoutsError> {
        // Listing only needs the subject id.
        let subject = AuthSubject::new(user_id, "", "");
        self.service
            .list_for(&subject)
            .await
            .map_err(map_domain_error)
    }
}

fn map_domain_error(e: DomainError) -> HangoutsError {
    match e {
        DomainError::SuggestionNotFound { id } => HangoutsError::not_found(id.to_string()),
        DomainError::NotParticipant { id, user_id } => {
            HangoutsError::forbidden(id.to_string(), user_id)
        }
        e @ DomainError::AlreadyResolved { .. } => HangoutsError::conflict(e.to_string()),
        DomainError::Profiles(e) => match e {
            profiles::error::ProfilesError::NotFound { id } => HangoutsError::not_found(id),
            _ => HangoutsError::internal(),
        },
        DomainError::Database { message } => {
            tracing::error!(%message, "hangouts storage failure behind local client");
            HangoutsError::internal()
        }
    }
}
