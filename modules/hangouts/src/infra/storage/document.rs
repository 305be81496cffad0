//! JSON document shape persisted per suggestion.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{HangoutSuggestion, ParticipantResponse, SuggestionStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusDoc {
    Pending,
    Accepted,
    Declined,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseDoc {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionDocument {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub suggested_time: DateTime<Utc>,
    pub duration: u32,
    pub activity: String,
    #[serde(default)]
    pub participants: Vec<String>,
    pub status: StatusDoc,
    #[serde(default)]
    pub responses: BTreeMap<String, ResponseDoc>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<SuggestionStatus> for StatusDoc {
    fn from(s: SuggestionStatus) -> Self {
        match s {
            SuggestionStatus::Pending => Self::Pending,
            SuggestionStatus::Accepted => Self::Accepted,
            SuggestionStatus::Declined => Self::Declined,
            SuggestionStatus::Completed => Self::Completed,
        }
    }
}

impl From<StatusDoc> for SuggestionStatus {
    fn from(s: StatusDoc) -> Self {
        match s {
            StatusDoc::Pending => Self::Pending,
            StatusDoc::Accepted => Self::Accepted,
            StatusDoc::Declined => Self::Declined,
            StatusDoc::Completed => Self::Completed,
        }
    }
}

impl From<ParticipantResponse> for ResponseDoc {
    fn from(r: ParticipantResponse) -> Self {
        match r {
            ParticipantResponse::Accepted => Self::Accepted,
            ParticipantResponse::Declined => Self::Declined,
        }
    }
}

impl From<ResponseDoc> for ParticipantResponse {
    fn from(r: ResponseDoc) -> Self {
        match r {
            ResponseDoc::Accepted => Self::Accepted,
            ResponseDoc::Declined => Self::Declined,
        }
    }
}

impl From<HangoutSuggestion> for SuggestionDocument {
    fn from(s: HangoutSuggestion) -> Self {
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            location: s.location,
            suggested_time: s.suggested_time,
            duration: s.duration,
            activity: s.activity,
            participants: s.participants,
            status: s.status.into(),
            responses: s
                .responses
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
            created_by: s.created_by,
            created_at: s.created_at,
        }
    }
}

impl From<SuggestionDocument> for HangoutSuggestion {
    fn from(d: SuggestionDocument) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            location: d.location,
            suggested_time: d.suggested_time,
            duration: d.duration,
            activity: d.activity,
            participants: d.participants,
            status: d.status.into(),
            responses: d
                .responses
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
            created_by: d.created_by,
            created_at: d.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_status_survives_a_read() {
        let raw = serde_json::json!({
            "id": "6f2c8d52-3e36-4a4a-9a43-63b1c1b7a0f1",
            "title": "Stargazing",
            "description": "Watch the stars and planets",
            "location": "Observatory or Open Field",
            "suggested_time": "2025-03-10T23:00:00Z",
            "duration": 120,
            "activity": "Stargazing",
            "participants": ["u1", "u2"],
            "status": "completed",
            "responses": { "u1": "accepted", "u2": "accepted" },
            "created_by": "ai",
            "created_at": "2025-03-01T12:00:00Z"
        });
        let doc: SuggestionDocument = serde_json::from_value(raw).unwrap();
        let s = HangoutSuggestion::from(doc);
        assert_eq!(s.status, SuggestionStatus::Completed);
        assert_eq!(s.responses.get("u2"), Some(&ParticipantResponse::Accepted));
    }
}
