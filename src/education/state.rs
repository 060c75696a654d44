//! Per-course education state

use crate::config::EducationTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const GPA_MIN: f64 = 0.0;
pub const GPA_MAX: f64 = 4.0;

#[inline]
pub fn clamp_gpa(gpa: f64) -> f64 {
    if gpa.is_nan() {
        GPA_MIN
    } else {
        gpa.clamp(GPA_MIN, GPA_MAX)
    }
}

/// Position inside a term, always derived from the week index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TermPhase {
    Early,
    Mid,
    Late,
}

impl TermPhase {
    /// Split the term into thirds. `week` is 0-based within the term.
    pub fn from_week(week: u32, weeks_per_term: u32) -> Self {
        let weeks = weeks_per_term.max(1);
        match week.min(weeks - 1) * 3 / weeks {
            0 => TermPhase::Early,
            1 => TermPhase::Mid,
            _ => TermPhase::Late,
        }
    }
}

/// Share of the term already elapsed, 0..=100
pub fn progress_percent(week: u32, weeks_per_term: u32) -> u8 {
    let weeks = weeks_per_term.max(1);
    // clamped week keeps the quotient within 100
    (week.min(weeks) * 100 / weeks) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Enrolled,
    Graduated,
    DroppedOut,
}

/// Progress of one character in one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationState {
    pub course_id: String,
    pub tier: EducationTier,
    pub gpa: f64,
    /// 0-based week inside the current term
    pub week: u32,
    pub term: u32,
    pub years_completed: u32,
    pub duration_years: u32,
    pub status: EnrollmentStatus,
    /// Action id to unix seconds of the last successful use
    #[serde(default)]
    pub last_used: BTreeMap<String, u64>,
    /// Action id to uses at `usage_age`
    #[serde(default)]
    pub uses: BTreeMap<String, u32>,
    /// Character age the usage counts belong to
    #[serde(default)]
    pub usage_age: u32,
}

impl EducationState {
    pub fn new(
        course_id: impl Into<String>,
        tier: EducationTier,
        duration_years: u32,
        starting_gpa: f64,
        age: u32,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            tier,
            gpa: clamp_gpa(starting_gpa),
            week: 0,
            term: 0,
            years_completed: 0,
            duration_years,
            status: EnrollmentStatus::Enrolled,
            last_used: BTreeMap::new(),
            uses: BTreeMap::new(),
            usage_age: age,
        }
    }

    #[inline]
    pub fn is_enrolled(&self) -> bool {
        self.status == EnrollmentStatus::Enrolled
    }

    pub fn phase(&self, weeks_per_term: u32) -> TermPhase {
        TermPhase::from_week(self.week, weeks_per_term)
    }

    pub fn progress_percent(&self, weeks_per_term: u32) -> u8 {
        progress_percent(self.week, weeks_per_term)
    }

    /// Seconds left before `action_id` may be used again
    pub fn cooldown_remaining(&self, action_id: &str, cooldown_seconds: u64, now: u64) -> u64 {
        match self.last_used.get(action_id) {
            Some(&last) => cooldown_seconds.saturating_sub(now.saturating_sub(last)),
            None => 0,
        }
    }

    /// Drop usage counts recorded at a different age
    pub fn sync_usage_age(&mut self, age: u32) {
        if self.usage_age != age {
            self.uses.clear();
            self.usage_age = age;
        }
    }

    pub fn uses_at_current_age(&self, action_id: &str) -> u32 {
        self.uses.get(action_id).copied().unwrap_or(0)
    }
}
