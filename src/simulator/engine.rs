//! Life rules engine
//!
//! `LifeEngine` is stateless over the character: every operation takes the
//! character (and its education tracker) by `&mut` and reports what changed.

use crate::achievement::{unlock_achievements, AchievementInfo};
use crate::character::{Character, Gender, ResolvedDeltas, Stat};
use crate::config::{ContentCatalog, EventDef, GameSettings, Opportunity, ScenarioDef};
use crate::education::{ActionOutcome, EducationState, EducationTracker, TermPhase, YearEndReport};
use crate::error::{AltLifeError, Result};
use crate::event::{draw_event, resolve_choice, OutcomeReport};
use crate::traits::{assign_traits, process_traits, TraitTrigger};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the host shows for a drawn event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPrompt {
    pub id: String,
    pub title: String,
    pub text: String,
    pub choices: Vec<String>,
}

impl From<&EventDef> for EventPrompt {
    fn from(event: &EventDef) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            text: event.display_text().to_string(),
            choices: event.choices.iter().map(|c| c.text.clone()).collect(),
        }
    }
}

/// A freshly started life
#[derive(Debug, Clone, Serialize)]
pub struct LifeStart {
    pub character: Character,
    pub traits: Vec<TraitTrigger>,
    pub new_achievements: Vec<AchievementInfo>,
}

/// Everything that happened during one year
#[derive(Debug, Clone, Serialize)]
pub struct YearReport {
    pub age: u32,
    pub traits: Vec<TraitTrigger>,
    pub education: Option<YearEndReport>,
    pub event: Option<EventPrompt>,
    pub new_achievements: Vec<AchievementInfo>,
    pub is_end: bool,
}

/// Result of answering an event
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceReport {
    pub outcome: OutcomeReport,
    pub new_achievements: Vec<AchievementInfo>,
    pub is_end: bool,
}

/// Main life simulation engine
#[derive(Debug, Clone)]
pub struct LifeEngine {
    catalog: Arc<ContentCatalog>,
    settings: GameSettings,
}

impl LifeEngine {
    pub fn new(catalog: Arc<ContentCatalog>, settings: GameSettings) -> Self {
        Self { catalog, settings }
    }

    /// Load the catalog from `settings.content_dir`
    pub fn from_settings(settings: GameSettings) -> Self {
        let catalog = ContentCatalog::load(&settings.content_dir);
        Self::new(Arc::new(catalog), settings)
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Create a character, from a scenario when one is named, then fire
    /// starting traits and `Start` achievements
    pub fn start_life<R: Rng + ?Sized>(
        &self,
        name: &str,
        gender: Gender,
        scenario_id: Option<&str>,
        extra_traits: &[String],
        rng: &mut R,
    ) -> Result<LifeStart> {
        let scenario = match scenario_id {
            Some(id) => Some(
                self.catalog
                    .scenario(id)
                    .ok_or_else(|| AltLifeError::ScenarioNotFound(id.to_string()))?,
            ),
            None => None,
        };

        let id = format!("char-{:016x}", rng.gen::<u64>());
        let mut character = Character::new(id, name, gender);

        let requested = scenario
            .map(|s| s.traits.as_slice())
            .unwrap_or_default()
            .iter()
            .chain(extra_traits)
            .map(String::as_str);
        character.traits = assign_traits(requested, &self.catalog);

        if let Some(scenario) = scenario {
            apply_scenario(&mut character, scenario);
        }

        let traits = process_traits(&mut character, &self.catalog, None);
        let new_achievements =
            unlock_achievements(&mut character, Opportunity::Start, &self.catalog, None);

        tracing::info!(
            target: "alt_life::simulator",
            character = %character.id,
            scenario = scenario_id.unwrap_or("default"),
            traits = character.traits.len(),
            "life.started"
        );

        Ok(LifeStart {
            character,
            traits,
            new_achievements,
        })
    }

    /// Age the character by one year. Returns `None` once the life has ended.
    pub fn advance_year<R: Rng + ?Sized>(
        &self,
        character: &mut Character,
        education: &mut EducationTracker,
        rng: &mut R,
    ) -> Option<YearReport> {
        if character.is_dead() {
            return None;
        }

        character.age = character.age.saturating_add(1);
        self.apply_aging(character);

        let education_report = education.end_year(character, &self.settings.education);
        let gpa = education.current_gpa();
        let traits = process_traits(character, &self.catalog, gpa);

        let died = self.check_death(character);
        let event = if died {
            None
        } else {
            draw_event(&self.catalog, character, gpa, rng).map(EventPrompt::from)
        };

        let new_achievements = self.collect_achievements(character, gpa, died);

        tracing::debug!(
            target: "alt_life::simulator",
            character = %character.id,
            age = character.age,
            health = character.health,
            event = event.as_ref().map(|e| e.id.as_str()),
            "year.advanced"
        );

        Some(YearReport {
            age: character.age,
            traits,
            education: education_report,
            event,
            new_achievements,
            is_end: died,
        })
    }

    /// Answer a choice of an event drawn for this character.
    ///
    /// Returns `None` for unknown ids and indexes, for events never drawn for
    /// the character, and for events outside their age window.
    pub fn resolve_choice<R: Rng + ?Sized>(
        &self,
        character: &mut Character,
        education: &EducationTracker,
        event_id: &str,
        choice_index: usize,
        rng: &mut R,
    ) -> Option<ChoiceReport> {
        if character.is_dead() {
            return None;
        }
        let event = self.catalog.event(event_id)?;
        if !character.has_seen(event_id) || !event.in_age_window(character.age) {
            tracing::debug!(
                target: "alt_life::event",
                event = event_id,
                age = character.age,
                "resolve rejected: event not drawn for this age"
            );
            return None;
        }
        let outcome = resolve_choice(&self.catalog, character, event_id, choice_index, rng)?;

        let died = self.check_death(character);
        let new_achievements =
            self.collect_achievements(character, education.current_gpa(), died);

        Some(ChoiceReport {
            outcome,
            new_achievements,
            is_end: died,
        })
    }

    pub fn enroll<'t>(
        &self,
        character: &mut Character,
        education: &'t mut EducationTracker,
        course_id: &str,
    ) -> Option<&'t EducationState> {
        let Some(course) = self.catalog.course(course_id) else {
            tracing::debug!(target: "alt_life::education", course = course_id, "unknown course");
            return None;
        };
        education.enroll(course, character, &self.settings.education)
    }

    pub fn perform_action<R: Rng + ?Sized>(
        &self,
        character: &mut Character,
        education: &mut EducationTracker,
        action_id: &str,
        now: u64,
        skill_score: Option<u32>,
        rng: &mut R,
    ) -> Option<ActionOutcome> {
        let course_id = education.active_state()?.course_id.clone();
        let course = self.catalog.course(&course_id)?;
        let Some(action) = self.catalog.action(action_id) else {
            tracing::debug!(target: "alt_life::education", action = action_id, "unknown action");
            return None;
        };
        education.perform_action(course, action, character, now, skill_score, rng)
    }

    pub fn advance_week(&self, education: &mut EducationTracker) -> Option<TermPhase> {
        education.advance_week(&self.settings.education)
    }

    pub fn join_club(
        &self,
        character: &mut Character,
        education: &EducationTracker,
        club_id: &str,
    ) -> bool {
        match self.catalog.club(club_id) {
            Some(club) => education.join_club(club, character),
            None => {
                tracing::debug!(target: "alt_life::education", club = club_id, "unknown club");
                false
            }
        }
    }

    /// Yearly decline past `decline_start_age`, clamped once
    fn apply_aging(&self, character: &mut Character) {
        let rules = &self.settings.aging;
        if character.age < rules.decline_start_age {
            return;
        }
        character.apply_deltas(&[
            (Stat::Health, -rules.health_decay_per_year),
            (Stat::Happiness, -rules.happiness_decay_per_year),
        ]);
    }

    /// Mark the character dead when health ran out or the age limit is
    /// reached. Returns true only on the transition.
    pub fn check_death(&self, character: &mut Character) -> bool {
        if character.is_dead() {
            return false;
        }
        if character.health <= 0 || character.age >= self.settings.max_age {
            character.alive = false;
            tracing::info!(
                target: "alt_life::simulator",
                character = %character.id,
                age = character.age,
                "life.ended"
            );
            return true;
        }
        false
    }

    fn collect_achievements(
        &self,
        character: &mut Character,
        gpa: Option<f64>,
        died: bool,
    ) -> Vec<AchievementInfo> {
        let mut unlocked =
            unlock_achievements(character, Opportunity::Yearly, &self.catalog, gpa);
        if died {
            unlocked.extend(unlock_achievements(
                character,
                Opportunity::Death,
                &self.catalog,
                gpa,
            ));
        }
        unlocked
    }
}

/// Scenario stats are absolute starting values
fn apply_scenario(character: &mut Character, scenario: &ScenarioDef) {
    character.age = scenario.starting_age;
    character.money = scenario.money;

    let deltas: ResolvedDeltas = scenario
        .stats
        .iter()
        .filter_map(|(key, &value)| {
            let stat = Stat::from_key(key)?;
            Some((stat, value - character.get(stat)))
        })
        .collect();
    character.apply_deltas(&deltas);
    character.relationships = scenario.relationships.clone();
    character.clamp_stats();
}
