use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{ClassSchedule, ProfilePatch, UserProfile, UserSummary};

/// REST DTO for a weekly class
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassScheduleDto {
    pub id: String,
    pub name: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    /// Local time, `HH:MM`
    #[serde(with = "crate::serde_hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::serde_hhmm")]
    #[schema(value_type = String, example = "10:30")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// REST DTO for the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub interests: Vec<String>,
    pub majors: Vec<String>,
    pub schedule: Vec<ClassScheduleDto>,
    pub buddies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for a partial profile update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateProfileReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub interests: Option<Vec<String>>,
    pub majors: Option<Vec<String>>,
    pub schedule: Option<Vec<ClassScheduleDto>>,
    pub buddies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddBuddyReq {
    pub email: String,
}

/// REST DTO for a user directory entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub interests: Vec<String>,
    pub majors: Vec<String>,
}

// Conversions between REST DTOs and contract models

impl From<ClassSchedule> for ClassScheduleDto {
    fn from(c: ClassSchedule) -> Self {
        Self {
            id: c.id,
            name: c.name,
            day_of_week: c.day_of_week,
            start_time: c.start_time,
            end_time: c.end_time,
            location: c.location,
        }
    }
}

impl From<ClassScheduleDto> for ClassSchedule {
    fn from(c: ClassScheduleDto) -> Self {
        Self {
            id: c.id,
            name: c.name,
            day_of_week: c.day_of_week,
            start_time: c.start_time,
            end_time: c.end_time,
            location: c.location,
        }
    }
}

impl From<UserProfile> for ProfileDto {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            interests: p.interests,
            majors: p.majors,
            schedule: p.schedule.into_iter().map(Into::into).collect(),
            buddies: p.buddies,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<UpdateProfileReq> for ProfilePatch {
    fn from(req: UpdateProfileReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            interests: req.interests,
            majors: req.majors,
            schedule: req
                .schedule
                .map(|s| s.into_iter().map(Into::into).collect()),
            buddies: req.buddies,
        }
    }
}

impl From<UserSummary> for UserSummaryDto {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            interests: u.interests,
            majors: u.majors,
        }
    }
}
