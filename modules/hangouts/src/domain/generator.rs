use async_trait::async_trait;
use profiles::model::UserProfile;
use thiserror::Error;

use crate::contract::model::{HangoutSuggestion, SuggestionDraft};

/// Failures of an external generator. The service never surfaces these; it
/// falls back to the local planner.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Transport(String),

    #[error("generator timed out after {0} ms")]
    Timeout(u64),

    #[error("generator returned HTTP {status}")]
    Status { status: u16 },

    #[error("generator reply unusable: {0}")]
    Malformed(String),
}

/// Port for suggestion generators.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(
        &self,
        user: &UserProfile,
        existing: &[HangoutSuggestion],
        participant_count: usize,
    ) -> Result<SuggestionDraft, GeneratorError>;
}
