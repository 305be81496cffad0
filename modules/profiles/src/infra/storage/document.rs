//! JSON document shape persisted per profile.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{ClassSchedule, UserProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub majors: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<ClassDocument>,
    #[serde(default)]
    pub buddies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDocument {
    pub id: String,
    pub name: String,
    pub day_of_week: u8,
    #[serde(with = "crate::serde_hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::serde_hhmm")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<ClassSchedule> for ClassDocument {
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

impl From<ClassDocument> for ClassSchedule {
    fn from(c: ClassDocument) -> Self {
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

impl From<UserProfile> for ProfileDocument {
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

impl From<ProfileDocument> for UserProfile {
    fn from(d: ProfileDocument) -> Self {
        Self {
            id: d.id,
            name: d.name,
            email: d.email,
            interests: d.interests,
            majors: d.majors,
            schedule: d.schedule.into_iter().map(Into::into).collect(),
            buddies: d.buddies,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Normalised email used for lookups.
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
