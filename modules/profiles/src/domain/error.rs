use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Profile not found: {id}")]
    ProfileNotFound { id: String },

    #[error("No user registered with email '{email}'")]
    BuddyNotFound { email: String },

    #[error("schedule[{index}].day_of_week must be within 0..=6, got {value}")]
    InvalidWeekday { index: usize, value: u8 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn profile_not_found(id: impl Into<String>) -> Self {
        Self::ProfileNotFound { id: id.into() }
    }

    pub fn buddy_not_found(email: impl Into<String>) -> Self {
        Self::BuddyNotFound {
            email: email.into(),
        }
    }

    pub fn invalid_weekday(index: usize, value: u8) -> Self {
        Self::InvalidWeekday { index, value }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
