//! Achievement checking logic

use crate::character::Character;
use crate::condition::{condition_holds, ConditionScope, LifeView};
use crate::config::{ContentCatalog, Opportunity};
use serde::Serialize;

/// Achievement info for results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Achievements of `opportunity` whose condition holds and that are not in
/// `unlocked` yet, in catalog order
pub fn check_achievements<S: ConditionScope + ?Sized>(
    opportunity: Opportunity,
    scope: &S,
    unlocked: &[String],
    catalog: &ContentCatalog,
) -> Vec<AchievementInfo> {
    catalog
        .achievements()
        .iter()
        .filter(|a| a.opportunity() == Some(opportunity))
        .filter(|a| !unlocked.iter().any(|u| *u == a.id))
        .filter(|a| condition_holds(Some(a.condition.as_str()), scope))
        .map(|a| AchievementInfo {
            id: a.id.clone(),
            name: a.name.clone(),
            description: a.description.clone(),
        })
        .collect()
}

/// Check and record newly unlocked achievements on the character
pub fn unlock_achievements(
    character: &mut Character,
    opportunity: Opportunity,
    catalog: &ContentCatalog,
    gpa: Option<f64>,
) -> Vec<AchievementInfo> {
    let unlocked = {
        let view = LifeView::new(character, gpa);
        check_achievements(opportunity, &view, &character.achievements, catalog)
    };

    for info in &unlocked {
        tracing::info!(
            target: "alt_life::achievement",
            character = %character.id,
            achievement = %info.id,
            "achievement.unlocked"
        );
        character.achievements.push(info.id.clone());
    }
    unlocked
}
