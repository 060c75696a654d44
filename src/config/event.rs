//! Event content definitions

use crate::character::StatChanges;
use serde::{Deserialize, Serialize};

fn default_max_age() -> u32 {
    200
}

fn default_probability() -> f64 {
    1.0
}

fn default_weight() -> f64 {
    1.0
}

/// `text`, else `description`, else empty
#[inline]
fn text_or_description<'a>(text: &'a Option<String>, description: &'a Option<String>) -> &'a str {
    text.as_deref()
        .or(description.as_deref())
        .unwrap_or_default()
}

/// Static event definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDef {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "min_age")]
    pub min_age: u32,
    #[serde(default = "default_max_age", alias = "max_age")]
    pub max_age: u32,
    /// Selection weight for the yearly draw
    #[serde(default = "default_probability")]
    pub probability: f64,
    #[serde(default, alias = "is_repeatable", alias = "repeatable")]
    pub is_repeatable: bool,
    /// Extra eligibility condition, e.g. `MONEY>1000`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChoiceDef>,
}

impl EventDef {
    pub fn display_text(&self) -> &str {
        text_or_description(&self.text, &self.description)
    }

    #[inline]
    pub fn in_age_window(&self, age: u32) -> bool {
        self.min_age <= age && age <= self.max_age
    }
}

/// Player-facing option of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDef {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub outcomes: Vec<OutcomeDef>,
}

/// Effect of a choice on the character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "stat_changes", alias = "effects")]
    pub stat_changes: StatChanges,
    #[serde(default, alias = "age_progression")]
    pub age_progression: u32,
    /// Relative weight when a choice carries several outcomes
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl OutcomeDef {
    pub fn display_text(&self) -> &str {
        text_or_description(&self.text, &self.description)
    }
}
