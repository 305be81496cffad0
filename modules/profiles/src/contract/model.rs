use chrono::{DateTime, NaiveTime, Utc};

/// A student's profile. `id` is the identity-provider subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub interests: Vec<String>,
    pub majors: Vec<String>,
    pub schedule: Vec<ClassSchedule>,
    /// Buddy subject ids. Symmetry is assumed, not enforced.
    pub buddies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A weekly recurring class. `day_of_week` is 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchedule {
    pub id: String,
    pub name: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub interests: Option<Vec<String>>,
    pub majors: Option<Vec<String>>,
    pub schedule: Option<Vec<ClassSchedule>>,
    pub buddies: Option<Vec<String>>,
}

/// Directory projection of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub interests: Vec<String>,
    pub majors: Vec<String>,
}

impl UserProfile {
    /// Classes held on `weekday` (0 = Sunday), ordered by start time.
    pub fn classes_on(&self, weekday: u8) -> Vec<&ClassSchedule> {
        let mut classes: Vec<&ClassSchedule> = self
            .schedule
            .iter()
            .filter(|c| c.day_of_week == weekday)
            .collect();
        classes.sort_by_key(|c| c.start_time);
        classes
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            interests: self.interests.clone(),
            majors: self.majors.clone(),
        }
    }
}
