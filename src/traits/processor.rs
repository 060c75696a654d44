//! Trait assignment and yearly trait triggers

use crate::character::{Character, StatChanges};
use crate::condition::{condition_holds, LifeView};
use crate::config::{ContentCatalog, TraitDef};
use serde::Serialize;

/// A trait that fired this year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitTrigger {
    pub trait_id: String,
    pub name: String,
    pub description: String,
    pub effect: StatChanges,
}

/// Return the id of a held trait that conflicts with `candidate`, checking
/// both exclude lists
pub fn check_exclusion<'a>(
    held: &'a [String],
    candidate: &TraitDef,
    catalog: &ContentCatalog,
) -> Option<&'a str> {
    held.iter().map(String::as_str).find(|&held_id| {
        candidate.exclude.iter().any(|e| e == held_id)
            || catalog
                .trait_def(held_id)
                .map_or(false, |t| t.exclude.iter().any(|e| *e == candidate.id))
    })
}

/// Build a trait list from requested ids, in order. Unknown ids, repeats and
/// traits excluded by an earlier pick are skipped.
pub fn assign_traits<'a, I>(requested: I, catalog: &ContentCatalog) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assigned: Vec<String> = Vec::new();

    for id in requested {
        if assigned.iter().any(|t| t == id) {
            continue;
        }
        let Some(def) = catalog.trait_def(id) else {
            tracing::debug!(target: "alt_life::traits", trait_id = id, "unknown trait skipped");
            continue;
        };
        if let Some(conflict) = check_exclusion(&assigned, def, catalog) {
            tracing::debug!(
                target: "alt_life::traits",
                trait_id = id,
                conflict,
                "excluded trait skipped"
            );
            continue;
        }
        assigned.push(def.id.clone());
    }

    assigned
}

/// Fire every held trait whose condition holds and whose trigger budget is
/// not spent. Conditions see the state from before any effect is applied.
pub fn process_traits(
    character: &mut Character,
    catalog: &ContentCatalog,
    gpa: Option<f64>,
) -> Vec<TraitTrigger> {
    let mut fired: Vec<&TraitDef> = Vec::with_capacity(character.traits.len());
    {
        let view = LifeView::new(character, gpa);
        for id in &character.traits {
            let Some(def) = catalog.trait_def(id) else {
                continue;
            };
            let count = character.trait_triggers.get(id).copied().unwrap_or(0);
            if def.max_triggers != 0 && count >= def.max_triggers {
                continue;
            }
            if !condition_holds(def.condition.as_deref(), &view) {
                continue;
            }
            fired.push(def);
        }
    }

    fired
        .into_iter()
        .map(|def| {
            *character.trait_triggers.entry(def.id.clone()).or_insert(0) += 1;
            character.apply_change_map(&def.effect);
            TraitTrigger {
                trait_id: def.id.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                effect: def.effect.clone(),
            }
        })
        .collect()
}
