use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HangoutsError {
    #[error("Suggestion not found: {id}")]
    NotFound { id: String },

    #[error("User {user_id} does not participate in suggestion {id}")]
    Forbidden { id: String, user_id: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error")]
    Internal,
}

impl HangoutsError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn forbidden(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::Forbidden {
            id: id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
