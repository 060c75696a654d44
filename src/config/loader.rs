//! Static content loading
//!
//! Each content file is a flat JSON array. A file that is missing or fails to
//! parse (a missing required field anywhere fails the whole file) degrades to
//! an empty list with a logged warning; loading never fails the caller.

use super::{AchievementDef, ActionDef, ClubDef, CourseDef, EventDef, ScenarioDef, TraitDef};
use crate::error::{AltLifeError, Result};
use ahash::AHashMap;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const EVENTS_FILE: &str = "events.json";
pub const CHILDHOOD_EVENTS_FILE: &str = "events_childhood_unique.json";
pub const SCENARIOS_FILE: &str = "scenarios.json";
pub const ACHIEVEMENTS_FILE: &str = "achievements.json";
pub const COURSES_FILE: &str = "education_courses.json";
pub const ACTIONS_FILE: &str = "education_actions.json";
pub const TRAITS_FILE: &str = "traits.json";
pub const CLUBS_FILE: &str = "clubs.json";

/// Read one content file, surfacing the failure
pub fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path).map_err(|source| AltLifeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| AltLifeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read one content file, degrading to an empty list on any failure
pub fn load_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match read_list(path) {
        Ok(items) => {
            tracing::debug!(
                target: "alt_life::content",
                path = %path.display(),
                count = items.len(),
                "content.loaded"
            );
            items
        }
        Err(err) => {
            tracing::warn!(
                target: "alt_life::content",
                path = %path.display(),
                error = %err,
                "content.load_failed"
            );
            Vec::new()
        }
    }
}

/// Drop later entries of a duplicated id and index what is left.
///
/// The stored list and the index always agree, so iterating the list never
/// yields an entry the id lookup would not return.
fn dedup_by_id<T>(
    items: Vec<T>,
    id: impl Fn(&T) -> &str,
    kind: &'static str,
) -> (Vec<T>, AHashMap<String, usize>) {
    let mut index = AHashMap::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let key = id(&item);
        if index.contains_key(key) {
            tracing::warn!(target: "alt_life::content", kind, id = key, "duplicate content id ignored");
            continue;
        }
        index.insert(key.to_string(), kept.len());
        kept.push(item);
    }
    (kept, index)
}

/// Read-only catalog of all static content
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    events: Vec<EventDef>,
    scenarios: Vec<ScenarioDef>,
    achievements: Vec<AchievementDef>,
    courses: Vec<CourseDef>,
    actions: Vec<ActionDef>,
    traits: Vec<TraitDef>,
    clubs: Vec<ClubDef>,

    event_index: AHashMap<String, usize>,
    scenario_index: AHashMap<String, usize>,
    course_index: AHashMap<String, usize>,
    action_index: AHashMap<String, usize>,
    trait_index: AHashMap<String, usize>,
    club_index: AHashMap<String, usize>,
}

impl ContentCatalog {
    /// Load every content file from `dir`
    pub fn load(dir: &Path) -> Self {
        let mut events: Vec<EventDef> = load_list(&dir.join(EVENTS_FILE));
        let mut childhood: Vec<EventDef> = load_list(&dir.join(CHILDHOOD_EVENTS_FILE));
        for event in &mut childhood {
            event.is_repeatable = false;
        }
        events.append(&mut childhood);

        let catalog = Self::default()
            .with_events(events)
            .with_scenarios(load_list(&dir.join(SCENARIOS_FILE)))
            .with_achievements(load_list(&dir.join(ACHIEVEMENTS_FILE)))
            .with_courses(load_list(&dir.join(COURSES_FILE)))
            .with_actions(load_list(&dir.join(ACTIONS_FILE)))
            .with_traits(load_list(&dir.join(TRAITS_FILE)))
            .with_clubs(load_list(&dir.join(CLUBS_FILE)));

        tracing::info!(
            target: "alt_life::content",
            dir = %dir.display(),
            events = catalog.events.len(),
            scenarios = catalog.scenarios.len(),
            achievements = catalog.achievements.len(),
            courses = catalog.courses.len(),
            actions = catalog.actions.len(),
            traits = catalog.traits.len(),
            clubs = catalog.clubs.len(),
            "catalog.loaded"
        );
        catalog
    }

    pub fn with_events(mut self, events: Vec<EventDef>) -> Self {
        (self.events, self.event_index) = dedup_by_id(events, |e| e.id.as_str(), "event");
        self
    }

    pub fn with_scenarios(mut self, scenarios: Vec<ScenarioDef>) -> Self {
        (self.scenarios, self.scenario_index) =
            dedup_by_id(scenarios, |s| s.id.as_str(), "scenario");
        self
    }

    pub fn with_achievements(mut self, achievements: Vec<AchievementDef>) -> Self {
        (self.achievements, _) = dedup_by_id(achievements, |a| a.id.as_str(), "achievement");
        self
    }

    pub fn with_courses(mut self, courses: Vec<CourseDef>) -> Self {
        (self.courses, self.course_index) = dedup_by_id(courses, |c| c.id.as_str(), "course");
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionDef>) -> Self {
        (self.actions, self.action_index) = dedup_by_id(actions, |a| a.id.as_str(), "action");
        self
    }

    pub fn with_traits(mut self, traits: Vec<TraitDef>) -> Self {
        (self.traits, self.trait_index) = dedup_by_id(traits, |t| t.id.as_str(), "trait");
        self
    }

    pub fn with_clubs(mut self, clubs: Vec<ClubDef>) -> Self {
        (self.clubs, self.club_index) = dedup_by_id(clubs, |c| c.id.as_str(), "club");
        self
    }

    pub fn events(&self) -> &[EventDef] {
        &self.events
    }

    pub fn scenarios(&self) -> &[ScenarioDef] {
        &self.scenarios
    }

    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    pub fn courses(&self) -> &[CourseDef] {
        &self.courses
    }

    pub fn actions(&self) -> &[ActionDef] {
        &self.actions
    }

    pub fn traits(&self) -> &[TraitDef] {
        &self.traits
    }

    pub fn clubs(&self) -> &[ClubDef] {
        &self.clubs
    }

    pub fn event(&self, id: &str) -> Option<&EventDef> {
        self.event_index.get(id).map(|&i| &self.events[i])
    }

    pub fn scenario(&self, id: &str) -> Option<&ScenarioDef> {
        self.scenario_index.get(id).map(|&i| &self.scenarios[i])
    }

    pub fn course(&self, id: &str) -> Option<&CourseDef> {
        self.course_index.get(id).map(|&i| &self.courses[i])
    }

    pub fn action(&self, id: &str) -> Option<&ActionDef> {
        self.action_index.get(id).map(|&i| &self.actions[i])
    }

    pub fn trait_def(&self, id: &str) -> Option<&TraitDef> {
        self.trait_index.get(id).map(|&i| &self.traits[i])
    }

    pub fn club(&self, id: &str) -> Option<&ClubDef> {
        self.club_index.get(id).map(|&i| &self.clubs[i])
    }
}
