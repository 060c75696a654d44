//! GameSession - single-owner state holder for one life
//!
//! Every mutation goes through `&mut self`. After each successful mutation
//! the session bumps its revision, publishes a fresh [`LifeSnapshot`] on a
//! `tokio::sync::watch` channel and, when a store is attached and autosave is
//! on, writes the [`AUTOSAVE_SLOT`].

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::sync::watch;

use super::engine::{ChoiceReport, EventPrompt, LifeEngine, LifeStart, YearReport};
use crate::character::{Character, Gender};
use crate::education::{ActionOutcome, EducationTracker, TermPhase};
use crate::error::Result;
use crate::save::{unix_now, GameSave, SaveStore, AUTOSAVE_SLOT};

/// Observable state published after every mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeSnapshot {
    pub revision: u64,
    pub character: Character,
    pub education: EducationTracker,
    pub pending_event: Option<EventPrompt>,
}

pub struct GameSession {
    engine: Arc<LifeEngine>,
    character: Character,
    education: EducationTracker,
    rng: StdRng,
    pending_event: Option<EventPrompt>,
    revision: u64,
    store: Option<SaveStore>,
    autosave: bool,
    updates: watch::Sender<LifeSnapshot>,
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl GameSession {
    fn from_parts(
        engine: Arc<LifeEngine>,
        character: Character,
        education: EducationTracker,
        pending_event: Option<EventPrompt>,
        rng: StdRng,
    ) -> Self {
        let autosave = engine.settings().autosave;
        let initial = LifeSnapshot {
            revision: 0,
            character: character.clone(),
            education: education.clone(),
            pending_event: pending_event.clone(),
        };
        let (updates, _) = watch::channel(initial);
        Self {
            engine,
            character,
            education,
            rng,
            pending_event,
            revision: 0,
            store: None,
            autosave,
            updates,
        }
    }

    /// Start a new life
    pub fn start(
        engine: Arc<LifeEngine>,
        name: &str,
        gender: Gender,
        scenario_id: Option<&str>,
        traits: &[String],
    ) -> Result<(Self, LifeStart)> {
        let mut rng = seeded_rng(engine.settings().seed);
        let start = engine.start_life(name, gender, scenario_id, traits, &mut rng)?;
        let session = Self::from_parts(
            engine,
            start.character.clone(),
            EducationTracker::new(),
            None,
            rng,
        );
        Ok((session, start))
    }

    /// Resume from a save, restoring the unanswered event if it still exists
    pub fn from_save(engine: Arc<LifeEngine>, save: GameSave) -> Self {
        let rng = seeded_rng(engine.settings().seed);
        let pending = save
            .pending_event
            .as_deref()
            .and_then(|id| engine.catalog().event(id))
            .map(EventPrompt::from);
        Self::from_parts(engine, save.character, save.education, pending, rng)
    }

    /// Resume from a slot of `store`, keeping the store attached
    pub fn load(engine: Arc<LifeEngine>, store: SaveStore, name: &str) -> Result<Self> {
        let save = store.try_load(name)?;
        Ok(Self::from_save(engine, save).with_store(store))
    }

    pub fn with_store(mut self, store: SaveStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn education(&self) -> &EducationTracker {
        &self.education
    }

    pub fn pending_event(&self) -> Option<&EventPrompt> {
        self.pending_event.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receiver that always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<LifeSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> LifeSnapshot {
        LifeSnapshot {
            revision: self.revision,
            character: self.character.clone(),
            education: self.education.clone(),
            pending_event: self.pending_event.clone(),
        }
    }

    pub fn to_save(&self, name: &str) -> GameSave {
        GameSave::new(name, self.character.clone(), self.education.clone())
            .with_pending_event(self.pending_event.as_ref().map(|e| e.id.clone()))
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.updates.send_replace(self.snapshot());

        if !self.autosave {
            return;
        }
        if let Some(store) = &self.store {
            store.save(&self.to_save(AUTOSAVE_SLOT));
        }
    }

    /// True while a drawn event with choices waits for an answer
    fn awaiting_answer(&self) -> bool {
        self.pending_event.as_ref().map_or(false, |e| !e.choices.is_empty())
    }

    /// Advance one year. The drawn event, if any, becomes the pending event.
    ///
    /// Returns `None` while the pending event is unanswered.
    pub fn advance_year(&mut self) -> Option<YearReport> {
        if self.awaiting_answer() {
            tracing::debug!(
                target: "alt_life::simulator",
                event = self.pending_event.as_ref().map(|e| e.id.as_str()),
                "year blocked: event awaiting answer"
            );
            return None;
        }
        let report =
            self.engine
                .advance_year(&mut self.character, &mut self.education, &mut self.rng)?;
        self.pending_event = report.event.clone();
        self.commit();
        Some(report)
    }

    /// Answer the pending event. Only the drawn event can be answered, once.
    pub fn resolve_choice(&mut self, choice_index: usize) -> Option<ChoiceReport> {
        let event_id = self.pending_event.as_ref()?.id.clone();
        let report = self.engine.resolve_choice(
            &mut self.character,
            &self.education,
            &event_id,
            choice_index,
            &mut self.rng,
        )?;
        self.pending_event = None;
        self.commit();
        Some(report)
    }

    pub fn enroll(&mut self, course_id: &str) -> bool {
        let enrolled = self
            .engine
            .enroll(&mut self.character, &mut self.education, course_id)
            .is_some();
        if enrolled {
            self.commit();
        }
        enrolled
    }

    /// Perform a study action now
    pub fn perform_action(&mut self, action_id: &str, skill_score: Option<u32>) -> Option<ActionOutcome> {
        self.perform_action_at(action_id, unix_now(), skill_score)
    }

    /// Perform a study action at an explicit unix time
    pub fn perform_action_at(
        &mut self,
        action_id: &str,
        now: u64,
        skill_score: Option<u32>,
    ) -> Option<ActionOutcome> {
        let outcome = self.engine.perform_action(
            &mut self.character,
            &mut self.education,
            action_id,
            now,
            skill_score,
            &mut self.rng,
        )?;
        self.commit();
        Some(outcome)
    }

    pub fn advance_week(&mut self) -> Option<TermPhase> {
        let phase = self.engine.advance_week(&mut self.education)?;
        self.commit();
        Some(phase)
    }

    pub fn join_club(&mut self, club_id: &str) -> bool {
        let joined = self
            .engine
            .join_club(&mut self.character, &self.education, club_id);
        if joined {
            self.commit();
        }
        joined
    }

    /// Write a named slot to the attached store
    pub fn save(&self, name: &str) -> Result<Option<PathBuf>> {
        match &self.store {
            Some(store) => store.try_save(&self.to_save(name)).map(Some),
            None => Ok(None),
        }
    }

    /// Write a named slot on tokio's blocking pool
    pub async fn save_async(&self, name: &str) -> Result<Option<PathBuf>> {
        match &self.store {
            Some(store) => store.save_async(self.to_save(name)).await.map(Some),
            None => Ok(None),
        }
    }
}
