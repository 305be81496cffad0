//! Local fallback planner: scores catalog activities against a profile and
//! picks a time slot clear of the user's classes.

use std::collections::HashSet;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Timelike, Utc, Weekday,
};
use profiles::model::UserProfile;
use rand::Rng;
use tracing::debug;

use crate::contract::model::{Activity, HangoutSuggestion, SuggestionDraft};
use crate::domain::catalog::catalog;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Slots are drawn from 1..=horizon_days days ahead.
    pub horizon_days: u32,
    pub slot_attempts: u32,
    /// Widening applied to both ends of each class.
    pub conflict_buffer_minutes: u32,
    /// Offset of the campus clock from UTC; class times are in this clock.
    pub utc_offset_minutes: i32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: 14,
            slot_attempts: 24,
            conflict_buffer_minutes: 30,
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

const MINUTES_PER_DAY: i64 = 24 * 60;

fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour() * 60 + t.minute())
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Campus clock. Out-of-range offsets fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.config.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Today's weekday in the campus clock, 0 = Sunday.
    pub fn local_weekday(&self, now: DateTime<Utc>) -> u8 {
        now.with_timezone(&self.offset())
            .weekday()
            .num_days_from_sunday() as u8
    }

    /// Interest and major affinity plus jitter in `[0, 2)`.
    pub fn score<R: Rng + ?Sized>(
        &self,
        activity: &Activity,
        user: &UserProfile,
        rng: &mut R,
    ) -> f64 {
        let category = activity.category.to_lowercase();
        let description = activity.description.to_lowercase();
        let name = activity.name.to_lowercase();
        let mentions = |tag: &str| {
            category.contains(tag) || description.contains(tag) || name.contains(tag)
        };

        let mut score = 0.0;
        for interest in &user.interests {
            let tag = interest.trim().to_lowercase();
            if !tag.is_empty() && mentions(&tag) {
                score += 3.0;
            }
        }
        let majors: Vec<String> = user
            .majors
            .iter()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        for major in &majors {
            if mentions(major) {
                score += 2.0;
            }
        }
        if majors
            .iter()
            .any(|m| m.contains("computer") || m.contains("cs"))
            && (category.contains("study") || category.contains("technology"))
        {
            score += 2.0;
        }

        score + rng.random_range(0.0..2.0)
    }

    /// Best-scoring catalog activity not already used by `existing`; a random
    /// one when every activity has been used.
    pub fn choose_activity<R: Rng + ?Sized>(
        &self,
        user: &UserProfile,
        existing: &[HangoutSuggestion],
        rng: &mut R,
    ) -> Activity {
        let used: HashSet<&str> = existing.iter().map(|s| s.activity.as_str()).collect();
        let mut all = catalog();

        let best = all
            .iter()
            .enumerate()
            .filter(|(_, a)| !used.contains(a.name.as_str()))
            .map(|(i, a)| (self.score(a, user, rng), i))
            .max_by(|x, y| x.0.total_cmp(&y.0))
            .map(|(_, i)| i);

        let idx = match best {
            Some(i) => i,
            None => {
                debug!("every catalog activity already suggested, picking at random");
                rng.random_range(0..all.len())
            }
        };
        all.swap_remove(idx)
    }

    /// Minutes are counted from midnight of `weekday`; a slot running past
    /// midnight is also checked against the next day's classes.
    fn conflicts(&self, user: &UserProfile, weekday: u8, start: i64, duration: u32) -> bool {
        let buffer = i64::from(self.config.conflict_buffer_minutes);
        let end = start + i64::from(duration);
        let next_day = (weekday + 1) % 7;
        [(weekday, 0), (next_day, MINUTES_PER_DAY)]
            .into_iter()
            .any(|(day, shift)| {
                user.classes_on(day).iter().any(|class| {
                    let blocked_from = minute_of_day(class.start_time) + shift - buffer;
                    let blocked_to = minute_of_day(class.end_time) + shift + buffer;
                    start <= blocked_to && blocked_from <= end
                })
            })
    }

    fn to_utc(&self, date: NaiveDate, minute_of_day: i64) -> DateTime<Utc> {
        let local = date.and_time(NaiveTime::MIN) + Duration::minutes(minute_of_day);
        let shift = Duration::seconds(i64::from(self.offset().local_minus_utc()));
        (local - shift).and_utc()
    }

    /// Random weekday slot 9:00-20:30 local that stays clear of the user's
    /// buffered classes; 19:00 tomorrow when the attempt budget runs out.
    pub fn pick_slot<R: Rng + ?Sized>(
        &self,
        user: &UserProfile,
        duration: u32,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> DateTime<Utc> {
        let today = now.with_timezone(&self.offset()).date_naive();
        let horizon = self.config.horizon_days.max(1);

        for _ in 0..self.config.slot_attempts {
            let mut date = today + Duration::days(i64::from(rng.random_range(1..=horizon)));
            let hour: i64 = rng.random_range(9..=20);
            let minute: i64 = if rng.random_bool(0.5) { 0 } else { 30 };

            match date.weekday() {
                Weekday::Sat => date += Duration::days(2),
                Weekday::Sun => date += Duration::days(1),
                _ => {}
            }

            let start = hour * 60 + minute;
            let weekday = date.weekday().num_days_from_sunday() as u8;
            if !self.conflicts(user, weekday, start, duration) {
                return self.to_utc(date, start);
            }
        }

        debug!(
            attempts = self.config.slot_attempts,
            "no free slot found, using 19:00 tomorrow"
        );
        self.to_utc(today + Duration::days(1), 19 * 60)
    }

    pub fn plan_with<R: Rng + ?Sized>(
        &self,
        user: &UserProfile,
        existing: &[HangoutSuggestion],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> SuggestionDraft {
        let activity = self.choose_activity(user, existing, rng);
        let suggested_time = self.pick_slot(user, activity.duration, now, rng);
        SuggestionDraft {
            activity: activity.name,
            description: activity.description,
            location: activity.location,
            duration: activity.duration,
            category: activity.category,
            suggested_time,
        }
    }

    pub fn plan(&self, user: &UserProfile, existing: &[HangoutSuggestion]) -> SuggestionDraft {
        self.plan_with(user, existing, Utc::now(), &mut rand::rng())
    }
}
