//! Education program, action and club definitions

use crate::character::StatChanges;
use serde::{Deserialize, Serialize};

/// Level of an education program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationTier {
    #[serde(alias = "high_school", alias = "highSchool")]
    HighSchool,
    #[serde(alias = "college")]
    College,
    #[serde(alias = "university")]
    University,
    #[serde(alias = "graduate")]
    Graduate,
}

impl EducationTier {
    pub fn key(self) -> &'static str {
        match self {
            EducationTier::HighSchool => "HIGH_SCHOOL",
            EducationTier::College => "COLLEGE",
            EducationTier::University => "UNIVERSITY",
            EducationTier::Graduate => "GRADUATE",
        }
    }
}

fn default_duration_years() -> u32 {
    4
}

/// Course / program definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDef {
    pub id: String,
    pub name: String,
    pub tier: EducationTier,
    #[serde(default)]
    pub cost: i64,
    #[serde(default = "default_duration_years", alias = "duration_years", alias = "duration")]
    pub duration_years: u32,
    #[serde(default, alias = "required_gpa")]
    pub required_gpa: f64,
    /// Action ids offered by this course. Empty offers every action.
    #[serde(default)]
    pub actions: Vec<String>,
}

impl CourseDef {
    pub fn offers(&self, action_id: &str) -> bool {
        self.actions.is_empty() || self.actions.iter().any(|a| a == action_id)
    }
}

/// Study action a student can take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDef {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "cooldown_seconds", alias = "cooldown")]
    pub cooldown_seconds: u64,
    /// Uses allowed per character age, 0 means unlimited
    #[serde(default, alias = "max_uses_per_age")]
    pub max_uses_per_age: u32,
    #[serde(alias = "gpa_delta_min")]
    pub gpa_delta_min: f64,
    #[serde(alias = "gpa_delta_max")]
    pub gpa_delta_max: f64,
    #[serde(default, alias = "stat_changes")]
    pub stat_changes: StatChanges,
    #[serde(default, alias = "mini_game", skip_serializing_if = "Option::is_none")]
    pub mini_game: Option<MiniGameDef>,
}

impl ActionDef {
    /// Multiplier for a mini-game score, 1.0 when not applicable
    pub fn multiplier(&self, skill_score: Option<u32>) -> f64 {
        match (&self.mini_game, skill_score) {
            (Some(game), Some(score)) => game.multiplier_for(score),
            _ => 1.0,
        }
    }
}

/// Mini-game reward tiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiniGameDef {
    #[serde(default)]
    pub tiers: Vec<MiniGameTier>,
}

/// Score bucket producing a multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniGameTier {
    /// Minimum score for this tier
    #[serde(alias = "min_score")]
    pub min_score: u32,
    pub multiplier: f64,
    #[serde(default)]
    pub label: String,
}

impl MiniGameDef {
    /// Tier reached by a score: the highest `min_score` not above it
    pub fn tier_for(&self, score: u32) -> Option<&MiniGameTier> {
        self.tiers
            .iter()
            .filter(|t| t.min_score <= score)
            .max_by_key(|t| t.min_score)
    }

    pub fn multiplier_for(&self, score: u32) -> f64 {
        self.tier_for(score)
            .map(|t| t.multiplier.max(0.0))
            .unwrap_or(1.0)
    }
}

/// Extracurricular club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Tier the member must be enrolled in, any when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<EducationTier>,
    #[serde(default, alias = "min_gpa")]
    pub min_gpa: f64,
    #[serde(default, alias = "stat_changes")]
    pub stat_changes: StatChanges,
}
