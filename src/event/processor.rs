//! Event choice resolution

use crate::character::{Character, StatChanges};
use crate::config::{ContentCatalog, OutcomeDef};
use crate::event::selector::weighted_random;
use rand::Rng;
use serde::Serialize;

/// What happened when a choice was resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeReport {
    pub event_id: String,
    pub choice_index: usize,
    /// `None` when the choice carries no outcome
    pub outcome_index: Option<usize>,
    pub text: String,
    pub stat_changes: StatChanges,
    pub age_progression: u32,
}

/// Pick one outcome, weighted when there are several. Falls back to the first
/// outcome when no weight is positive.
pub fn pick_outcome<R: Rng + ?Sized>(outcomes: &[OutcomeDef], rng: &mut R) -> Option<usize> {
    match outcomes.len() {
        0 => None,
        1 => Some(0),
        _ => {
            let weighted: Vec<(usize, f64)> = outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| (i, o.weight))
                .collect();
            weighted_random(&weighted, rng).or(Some(0))
        }
    }
}

/// Apply the chosen option of an event to the character.
///
/// Unknown event ids and out-of-range choice indexes are ignored and return
/// `None`. Otherwise the event is recorded in the history, the outcome's stat
/// changes are applied with one clamp, and age progresses.
pub fn resolve_choice<R: Rng + ?Sized>(
    catalog: &ContentCatalog,
    character: &mut Character,
    event_id: &str,
    choice_index: usize,
    rng: &mut R,
) -> Option<OutcomeReport> {
    let Some(event) = catalog.event(event_id) else {
        tracing::debug!(target: "alt_life::event", event = event_id, "unknown event ignored");
        return None;
    };
    let Some(choice) = event.choices.get(choice_index) else {
        tracing::debug!(
            target: "alt_life::event",
            event = event_id,
            choice_index,
            "choice index out of range"
        );
        return None;
    };

    character.mark_shown(&event.id);

    let outcome_index = pick_outcome(&choice.outcomes, rng);
    let report = match outcome_index.and_then(|i| choice.outcomes.get(i)) {
        Some(outcome) => {
            character.apply_change_map(&outcome.stat_changes);
            character.age = character.age.saturating_add(outcome.age_progression);
            OutcomeReport {
                event_id: event.id.clone(),
                choice_index,
                outcome_index,
                text: outcome.display_text().to_string(),
                stat_changes: outcome.stat_changes.clone(),
                age_progression: outcome.age_progression,
            }
        }
        None => OutcomeReport {
            event_id: event.id.clone(),
            choice_index,
            outcome_index: None,
            text: String::new(),
            stat_changes: StatChanges::new(),
            age_progression: 0,
        },
    };

    tracing::debug!(
        target: "alt_life::event",
        event = %report.event_id,
        choice_index,
        outcome = ?report.outcome_index,
        "event.resolved"
    );
    Some(report)
}
