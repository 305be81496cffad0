use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use profiles::model::ClassSchedule;
use uuid::Uuid;

/// `created_by` value for suggestions produced by the generator.
pub const CREATED_BY_AI: &str = "ai";

/// Aggregate state of a suggestion.
///
/// `Completed` is never produced by any transition; stored records carrying it
/// are still read back faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionStatus {
    Pending,
    Accepted,
    Declined,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticipantResponse {
    Accepted,
    Declined,
}

/// A proposed group activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HangoutSuggestion {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub suggested_time: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
    pub activity: String,
    pub participants: Vec<String>,
    pub status: SuggestionStatus,
    /// Participant id to response; a missing key means "not yet responded".
    pub responses: BTreeMap<String, ParticipantResponse>,
    /// A user id, or [`CREATED_BY_AI`].
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl HangoutSuggestion {
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// Created by or involving `user_id`.
    pub fn involves(&self, user_id: &str) -> bool {
        self.created_by == user_id || self.is_participant(user_id)
    }

    pub fn all_responded(&self) -> bool {
        self.participants
            .iter()
            .all(|p| self.responses.contains_key(p))
    }

    pub fn all_accepted(&self) -> bool {
        self.participants
            .iter()
            .all(|p| self.responses.get(p) == Some(&ParticipantResponse::Accepted))
    }
}

/// User-authored suggestion before ids and lifecycle fields are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSuggestion {
    pub title: String,
    pub description: String,
    pub location: String,
    pub suggested_time: DateTime<Utc>,
    pub duration: u32,
    pub activity: String,
    pub participants: Vec<String>,
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub category: String,
    /// Minutes.
    pub duration: u32,
    pub location: String,
    pub description: String,
}

/// Output of the generator or the fallback planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionDraft {
    pub activity: String,
    pub description: String,
    pub location: String,
    pub duration: u32,
    pub category: String,
    pub suggested_time: DateTime<Utc>,
}

/// Home-screen summary for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub name: String,
    pub todays_classes: Vec<ClassSchedule>,
    pub interest_count: usize,
    pub major_count: usize,
    pub buddy_count: usize,
    pub pending: Vec<HangoutSuggestion>,
    pub accepted: Vec<HangoutSuggestion>,
}
