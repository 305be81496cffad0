use std::collections::BTreeMap;

use chrono::{DateTime, NaiveTime, Utc};
use profiles::model::ClassSchedule;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{
    Activity, Dashboard, HangoutSuggestion, NewSuggestion, ParticipantResponse, SuggestionStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatusDto {
    Pending,
    Accepted,
    Declined,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseDto {
    Accepted,
    Declined,
}

/// REST DTO for a hangout suggestion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub suggested_time: DateTime<Utc>,
    /// Minutes
    pub duration: u32,
    pub activity: String,
    pub participants: Vec<String>,
    pub status: SuggestionStatusDto,
    /// Participant id to response; absent participants have not answered yet.
    pub responses: BTreeMap<String, ResponseDto>,
    /// User id, or `ai` for generated suggestions
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating a suggestion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSuggestionReq {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub suggested_time: DateTime<Utc>,
    pub duration: u32,
    pub activity: String,
    /// Invitees; the caller is added automatically.
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Lifecycle action on a suggestion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SuggestionActionReq {
    Respond { response: ResponseDto },
    Unaccept,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityDto {
    pub name: String,
    pub category: String,
    pub duration: u32,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassDto {
    pub id: String,
    pub name: String,
    #[serde(with = "profiles::serde_hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "profiles::serde_hhmm")]
    #[schema(value_type = String, example = "10:30")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// REST DTO for the home-screen summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub name: String,
    pub todays_classes: Vec<ClassDto>,
    pub interest_count: usize,
    pub major_count: usize,
    pub buddy_count: usize,
    pub pending: Vec<SuggestionDto>,
    pub accepted: Vec<SuggestionDto>,
}

impl From<SuggestionStatus> for SuggestionStatusDto {
    fn from(s: SuggestionStatus) -> Self {
        match s {
            SuggestionStatus::Pending => Self::Pending,
            SuggestionStatus::Accepted => Self::Accepted,
            SuggestionStatus::Declined => Self::Declined,
            SuggestionStatus::Completed => Self::Completed,
        }
    }
}

impl From<ParticipantResponse> for ResponseDto {
    fn from(r: ParticipantResponse) -> Self {
        match r {
            ParticipantResponse::Accepted => Self::Accepted,
            ParticipantResponse::Declined => Self::Declined,
        }
    }
}

impl From<ResponseDto> for ParticipantResponse {
    fn from(r: ResponseDto) -> Self {
        match r {
            ResponseDto::Accepted => Self::Accepted,
            ResponseDto::Declined => Self::Declined,
        }
    }
}

impl From<HangoutSuggestion> for SuggestionDto {
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

impl From<CreateSuggestionReq> for NewSuggestion {
    fn from(req: CreateSuggestionReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            location: req.location,
            suggested_time: req.suggested_time,
            duration: req.duration,
            activity: req.activity,
            participants: req.participants,
        }
    }
}

impl From<Activity> for ActivityDto {
    fn from(a: Activity) -> Self {
        Self {
            name: a.name,
            category: a.category,
            duration: a.duration,
            location: a.location,
            description: a.description,
        }
    }
}

impl From<ClassSchedule> for ClassDto {
    fn from(c: ClassSchedule) -> Self {
        Self {
            id: c.id,
            name: c.name,
            start_time: c.start_time,
            end_time: c.end_time,
            location: c.location,
        }
    }
}

impl From<Dashboard> for DashboardDto {
    fn from(d: Dashboard) -> Self {
        Self {
            name: d.name,
            todays_classes: d.todays_classes.into_iter().map(Into::into).collect(),
            interest_count: d.interest_count,
            major_count: d.major_count,
            buddy_count: d.buddy_count,
            pending: d.pending.into_iter().map(Into::into).collect(),
            accepted: d.accepted.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_tagged() {
        let respond: SuggestionActionReq = serde_json::from_value(serde_json::json!({
            "action": "respond",
            "response": "declined"
        }))
        .unwrap();
        assert!(matches!(
            respond,
            SuggestionActionReq::Respond {
                response: ResponseDto::Declined
            }
        ));

        let unaccept: SuggestionActionReq =
            serde_json::from_value(serde_json::json!({ "action": "unaccept" })).unwrap();
        assert!(matches!(unaccept, SuggestionActionReq::Unaccept));

        let bad: Result<SuggestionActionReq, _> =
            serde_json::from_value(serde_json::json!({ "action": "respond", "response": "maybe" }));
        assert!(bad.is_err());
    }
}
