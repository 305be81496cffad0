use profiles::error::ProfilesError;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::SuggestionStatus;
use crate::domain::lifecycle::LifecycleError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Suggestion not found: {id}")]
    SuggestionNotFound { id: Uuid },

    #[error("User {user_id} is not a participant of suggestion {id}")]
    NotParticipant { id: Uuid, user_id: String },

    #[error("Suggestion {id} is already {status:?}")]
    AlreadyResolved { id: Uuid, status: SuggestionStatus },

    #[error("Profile lookup failed: {0}")]
    Profiles(#[from] ProfilesError),

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<LifecycleError> for DomainError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::SuggestionNotFound { id } => Self::SuggestionNotFound { id },
            LifecycleError::NotParticipant { id, user_id } => Self::NotParticipant { id, user_id },
            LifecycleError::AlreadyResolved { id, status } => Self::AlreadyResolved { id, status },
        }
    }
}
