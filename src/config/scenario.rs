//! Scenario and trait definitions

use crate::character::{Relationship, StatChanges};
use serde::{Deserialize, Serialize};

/// Starting preset for a new life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "starting_age")]
    pub starting_age: u32,
    /// Absolute starting values, not deltas
    #[serde(default)]
    pub stats: StatChanges,
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

fn default_max_triggers() -> u32 {
    1
}

/// Personality trait configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect: StatChanges,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// 0 fires every year
    #[serde(default = "default_max_triggers", alias = "max_triggers")]
    pub max_triggers: u32,
    /// Traits that cannot be held together with this one
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_parsing() {
        let scenario: ScenarioDef = serde_json::from_str(
            r#"{
                "id": "rich_kid",
                "name": "Born Rich",
                "startingAge": 0,
                "stats": {"health": 80, "looks": 70},
                "money": 1000000,
                "traits": ["spoiled"],
                "relationships": [{"name": "Dad", "kind": "parent", "closeness": 40}]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.money, 1_000_000);
        assert_eq!(scenario.stats.get("health"), Some(&80));
        assert_eq!(scenario.relationships[0].closeness, 40);
    }

    #[test]
    fn test_trait_defaults() {
        let def: TraitDef =
            serde_json::from_str(r#"{"id": "genius", "name": "Genius"}"#).unwrap();
        assert_eq!(def.max_triggers, 1);
        assert!(def.effect.is_empty());
        assert!(def.exclude.is_empty());
    }
}
