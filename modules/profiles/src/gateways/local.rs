use async_trait::async_trait;
use modkit::AuthSubject;
use std::sync::Arc;

use crate::contract::{client::ProfilesApi, error::ProfilesError, model::UserProfile};
use crate::domain::{error::DomainError, service::Service};

/// In-process implementation of `ProfilesApi` that delegates to the domain service
pub struct ProfilesLocalClient {
    service: Arc<Service>,
}

impl ProfilesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ProfilesApi for ProfilesLocalClient {
    async fn get_or_create(&self, subject: &AuthSubject) -> Result<UserProfile, ProfilesError> {
        self.service
            .get_or_create(subject)
            .await
            .map_err(map_domain_error)
    }

    async fn get_profile(&self, id: &str) -> Result<UserProfile, ProfilesError> {
        self.service.get(id).await.map_err(map_domain_error)
    }
}

fn map_domain_error(e: DomainError) -> ProfilesError {
    match e {
        DomainError::ProfileNotFound { id } => ProfilesError::not_found(id),
        DomainError::BuddyNotFound { email } => ProfilesError::not_found(email),
        e @ DomainError::InvalidWeekday { .. } => ProfilesError::validation(e.to_string()),
        DomainError::Database { message } => {
            tracing::error!(%message, "profiles storage failure behind local client");
            ProfilesError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_are_opaque() {
        assert_eq!(
            map_domain_error(DomainError::database("disk full")),
            ProfilesError::Internal
        );
        assert_eq!(
            map_domain_error(DomainError::profile_not_found("u1")),
            ProfilesError::not_found("u1")
        );
        assert!(matches!(
            map_domain_error(DomainError::invalid_weekday(0, 9)),
            ProfilesError::Validation { .. }
        ));
    }
}
