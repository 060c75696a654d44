//! Enrollment, study actions, terms and clubs for one character

use super::state::{clamp_gpa, EducationState, EnrollmentStatus, TermPhase};
use crate::character::{Character, Degree, StatChanges};
use crate::config::{ActionDef, ClubDef, CourseDef, EducationRules};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Uniform draw from `[low, high)`, `low` when the range is empty.
///
/// Interpolates instead of `gen_range` so bounds as wide as `±f64::MAX`
/// never overflow the span.
fn sample_delta<R: Rng + ?Sized>(low: f64, high: f64, rng: &mut R) -> f64 {
    if !(high > low) {
        return low;
    }
    let t: f64 = rng.gen();
    low * (1.0 - t) + high * t
}

/// Result of a successful study action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub action_id: String,
    /// Sampled delta before the multiplier
    pub base_delta: f64,
    pub multiplier: f64,
    /// GPA after clamping
    pub gpa: f64,
    pub tier_label: Option<String>,
    pub stat_changes: StatChanges,
}

/// Result of closing a school year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearEndReport {
    pub course_id: String,
    pub years_completed: u32,
    pub status: EnrollmentStatus,
    pub degree: Option<Degree>,
}

/// All education states of one character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationTracker {
    pub states: BTreeMap<String, EducationState>,
    /// Course currently being attended
    pub active: Option<String>,
}

impl EducationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, course_id: &str) -> Option<&EducationState> {
        self.states.get(course_id)
    }

    /// State of the active course, when still enrolled
    pub fn active_state(&self) -> Option<&EducationState> {
        self.active
            .as_deref()
            .and_then(|id| self.states.get(id))
            .filter(|s| s.is_enrolled())
    }

    fn active_state_mut(&mut self) -> Option<&mut EducationState> {
        let id = self.active.as_deref()?;
        self.states.get_mut(id).filter(|s| s.is_enrolled())
    }

    /// GPA of the active course
    pub fn current_gpa(&self) -> Option<f64> {
        self.active_state().map(|s| s.gpa)
    }

    /// Start a course. Rejected when already enrolled, when the best GPA so
    /// far is below the requirement, or when the character cannot pay.
    pub fn enroll(
        &mut self,
        course: &CourseDef,
        character: &mut Character,
        rules: &EducationRules,
    ) -> Option<&EducationState> {
        if let Some(active) = self.active_state() {
            tracing::debug!(
                target: "alt_life::education",
                course = %course.id,
                active = %active.course_id,
                "enroll rejected: already enrolled"
            );
            return None;
        }
        if character.best_gpa() < course.required_gpa {
            tracing::debug!(
                target: "alt_life::education",
                course = %course.id,
                required = course.required_gpa,
                "enroll rejected: gpa too low"
            );
            return None;
        }
        if course.cost < 0 {
            tracing::debug!(
                target: "alt_life::education",
                course = %course.id,
                cost = course.cost,
                "enroll rejected: negative cost"
            );
            return None;
        }
        if character.money < course.cost {
            tracing::debug!(
                target: "alt_life::education",
                course = %course.id,
                cost = course.cost,
                money = character.money,
                "enroll rejected: cannot pay"
            );
            return None;
        }

        character.money = character.money.saturating_sub(course.cost);
        let state = EducationState::new(
            course.id.clone(),
            course.tier,
            course.duration_years,
            rules.starting_gpa,
            character.age,
        );
        self.active = Some(course.id.clone());
        tracing::info!(
            target: "alt_life::education",
            character = %character.id,
            course = %course.id,
            "education.enrolled"
        );
        // Re-enrolling after dropping out starts over
        self.states.insert(course.id.clone(), state);
        self.states.get(&course.id)
    }

    /// Perform a study action in the active course.
    ///
    /// Returns `None` without touching any state when the course does not
    /// offer the action, the cooldown has not elapsed, or the per-age cap is
    /// reached.
    pub fn perform_action<R: Rng + ?Sized>(
        &mut self,
        course: &CourseDef,
        action: &ActionDef,
        character: &mut Character,
        now: u64,
        skill_score: Option<u32>,
        rng: &mut R,
    ) -> Option<ActionOutcome> {
        let state = self.active_state_mut()?;
        if state.course_id != course.id || !course.offers(&action.id) {
            tracing::debug!(
                target: "alt_life::education",
                course = %course.id,
                action = %action.id,
                "action not offered"
            );
            return None;
        }

        let remaining = state.cooldown_remaining(&action.id, action.cooldown_seconds, now);
        if remaining > 0 {
            tracing::debug!(
                target: "alt_life::education",
                action = %action.id,
                remaining,
                "action on cooldown"
            );
            return None;
        }

        // Counts from a previous age do not count against the cap
        let uses = if state.usage_age == character.age {
            state.uses_at_current_age(&action.id)
        } else {
            0
        };
        if action.max_uses_per_age != 0 && uses >= action.max_uses_per_age {
            tracing::debug!(
                target: "alt_life::education",
                action = %action.id,
                uses,
                "action usage cap reached"
            );
            return None;
        }

        let low = action.gpa_delta_min.min(action.gpa_delta_max);
        let high = action.gpa_delta_min.max(action.gpa_delta_max);
        let base_delta = sample_delta(low, high, rng);
        let multiplier = action.multiplier(skill_score);
        let tier_label = match (&action.mini_game, skill_score) {
            (Some(game), Some(score)) => game.tier_for(score).map(|t| t.label.clone()),
            _ => None,
        };

        state.sync_usage_age(character.age);
        *state.uses.entry(action.id.clone()).or_insert(0) += 1;
        state.last_used.insert(action.id.clone(), now);
        state.gpa = clamp_gpa(state.gpa + base_delta * multiplier);
        let gpa = state.gpa;

        character.apply_change_map(&action.stat_changes);

        Some(ActionOutcome {
            action_id: action.id.clone(),
            base_delta,
            multiplier,
            gpa,
            tier_label,
            stat_changes: action.stat_changes.clone(),
        })
    }

    /// Advance the active course by one week, rolling into the next term
    /// after `weeks_per_term` weeks. Returns the new phase.
    pub fn advance_week(&mut self, rules: &EducationRules) -> Option<TermPhase> {
        let weeks_per_term = rules.weeks_per_term.max(1);
        let state = self.active_state_mut()?;
        state.week += 1;
        if state.week >= weeks_per_term {
            state.week = 0;
            state.term += 1;
        }
        Some(state.phase(weeks_per_term))
    }

    /// Close the school year of the active course. On reaching the course
    /// duration the student graduates (recording a degree) or drops out.
    pub fn end_year(
        &mut self,
        character: &mut Character,
        rules: &EducationRules,
    ) -> Option<YearEndReport> {
        let state = self.active_state_mut()?;
        state.years_completed += 1;
        state.week = 0;

        let mut degree = None;
        if state.years_completed >= state.duration_years {
            if state.gpa >= rules.pass_gpa {
                state.status = EnrollmentStatus::Graduated;
                let earned = Degree {
                    course_id: state.course_id.clone(),
                    tier: state.tier,
                    gpa: state.gpa,
                    graduated_at_age: character.age,
                };
                character.degrees.push(earned.clone());
                degree = Some(earned);
            } else {
                state.status = EnrollmentStatus::DroppedOut;
            }
        }

        let report = YearEndReport {
            course_id: state.course_id.clone(),
            years_completed: state.years_completed,
            status: state.status,
            degree,
        };
        if report.status != EnrollmentStatus::Enrolled {
            tracing::info!(
                target: "alt_life::education",
                character = %character.id,
                course = %report.course_id,
                status = ?report.status,
                "education.finished"
            );
            self.active = None;
        }
        Some(report)
    }

    /// Join a club. Requires enrollment in the club's tier when it names one,
    /// a high enough GPA and no existing membership.
    pub fn join_club(&self, club: &ClubDef, character: &mut Character) -> bool {
        if character.clubs.iter().any(|c| *c == club.id) {
            return false;
        }
        let active = self.active_state();
        if let Some(tier) = club.tier {
            if active.map(|s| s.tier) != Some(tier) {
                tracing::debug!(
                    target: "alt_life::education",
                    club = %club.id,
                    "club rejected: wrong tier"
                );
                return false;
            }
        }
        let gpa = active.map_or_else(|| character.best_gpa(), |s| s.gpa);
        if gpa < club.min_gpa {
            tracing::debug!(
                target: "alt_life::education",
                club = %club.id,
                gpa,
                "club rejected: gpa too low"
            );
            return false;
        }

        character.clubs.push(club.id.clone());
        character.apply_change_map(&club.stat_changes);
        true
    }
}
