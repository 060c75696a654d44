//! Achievement configuration structures

use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_opportunity() -> String {
    "YEARLY".to_string()
}

/// Achievement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Opportunity: "START", "YEARLY", "DEATH"
    #[serde(default = "default_opportunity")]
    pub opportunity: String,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl AchievementDef {
    pub fn opportunity(&self) -> Option<Opportunity> {
        self.opportunity.parse().ok()
    }
}

/// When an achievement condition is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opportunity {
    /// Right after a life starts
    Start,
    /// After every year and every resolved event
    Yearly,
    /// When the character dies
    Death,
}

impl FromStr for Opportunity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "START" => Ok(Opportunity::Start),
            "YEARLY" => Ok(Opportunity::Yearly),
            "DEATH" => Ok(Opportunity::Death),
            other => Err(format!("unknown opportunity: {other}")),
        }
    }
}
