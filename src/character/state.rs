//! Character record and stat application

use crate::config::EducationTier;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Lower bound of every bounded stat
pub const STAT_MIN: i32 = 0;
/// Upper bound of every bounded stat
pub const STAT_MAX: i32 = 100;
/// Starting value of bounded stats when no scenario overrides them
pub const DEFAULT_STAT: i32 = 50;

/// Stat-name to delta mapping as it appears in content files
pub type StatChanges = BTreeMap<String, i64>;

/// Deltas resolved against the known stat vocabulary
pub type ResolvedDeltas = SmallVec<[(Stat, i64); 6]>;

/// Life stats a character carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Health,
    Happiness,
    Intelligence,
    Looks,
    Money,
}

impl Stat {
    pub const BOUNDED: [Stat; 4] = [Stat::Health, Stat::Happiness, Stat::Intelligence, Stat::Looks];

    /// Map a content key to a stat. Matching is case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.eq_ignore_ascii_case("health") {
            Some(Stat::Health)
        } else if key.eq_ignore_ascii_case("happiness") {
            Some(Stat::Happiness)
        } else if key.eq_ignore_ascii_case("intelligence") || key.eq_ignore_ascii_case("smarts") {
            Some(Stat::Intelligence)
        } else if key.eq_ignore_ascii_case("looks") {
            Some(Stat::Looks)
        } else if key.eq_ignore_ascii_case("money") {
            Some(Stat::Money)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    #[serde(alias = "non_binary", alias = "nonbinary")]
    NonBinary,
}

/// A person in the character's life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub name: String,
    pub kind: String,
    #[serde(default = "default_closeness")]
    pub closeness: i32,
}

fn default_closeness() -> i32 {
    DEFAULT_STAT
}

impl Relationship {
    pub fn adjust_closeness(&mut self, delta: i64) {
        self.closeness = clamp_stat(i64::from(self.closeness).saturating_add(delta));
    }
}

/// A completed course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    pub course_id: String,
    pub tier: EducationTier,
    pub gpa: f64,
    pub graduated_at_age: u32,
}

/// Stat changes split into recognized deltas and an age progression
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub deltas: ResolvedDeltas,
    pub age: u32,
    /// Number of recognized keys, `age` included
    pub recognized: usize,
}

/// Resolve content keys against the stat vocabulary.
///
/// Unknown keys are dropped here; they never reach the character.
pub fn resolve_deltas<'a, I>(changes: I) -> Resolved
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut resolved = Resolved::default();

    for (key, delta) in changes {
        if key.trim().eq_ignore_ascii_case("age") {
            // Age only moves forward
            let step = u32::try_from(delta.max(0)).unwrap_or(u32::MAX);
            resolved.age = resolved.age.saturating_add(step);
            resolved.recognized += 1;
            continue;
        }
        match Stat::from_key(key) {
            Some(stat) => {
                resolved.deltas.push((stat, delta));
                resolved.recognized += 1;
            }
            None => {
                tracing::debug!(target: "alt_life::stats", key, "ignoring unknown stat key");
            }
        }
    }

    resolved
}

#[inline]
fn clamp_stat(value: i64) -> i32 {
    // Bounds fit in i32, so the cast after clamping is lossless
    value.clamp(i64::from(STAT_MIN), i64::from(STAT_MAX)) as i32
}

/// Mutable life record of the player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub age: u32,
    #[serde(default = "default_alive")]
    pub alive: bool,

    pub health: i32,
    pub happiness: i32,
    pub intelligence: i32,
    pub looks: i32,
    pub money: i64,

    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub trait_triggers: BTreeMap<String, u32>,
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Ids of events already shown, in order
    #[serde(default)]
    pub event_history: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub degrees: Vec<Degree>,
    #[serde(default)]
    pub clubs: Vec<String>,
}

fn default_alive() -> bool {
    true
}

impl Default for Character {
    fn default() -> Self {
        Self::new(String::new(), String::new(), Gender::default())
    }
}

impl Character {
    /// A newborn with every bounded stat at the default value
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            age: 0,
            alive: true,
            health: DEFAULT_STAT,
            happiness: DEFAULT_STAT,
            intelligence: DEFAULT_STAT,
            looks: DEFAULT_STAT,
            money: 0,
            traits: Vec::new(),
            trait_triggers: BTreeMap::new(),
            achievements: Vec::new(),
            event_history: Vec::with_capacity(64),
            relationships: Vec::new(),
            degrees: Vec::new(),
            clubs: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Health => i64::from(self.health),
            Stat::Happiness => i64::from(self.happiness),
            Stat::Intelligence => i64::from(self.intelligence),
            Stat::Looks => i64::from(self.looks),
            Stat::Money => self.money,
        }
    }

    fn slot(&mut self, stat: Stat) -> Option<&mut i32> {
        match stat {
            Stat::Health => Some(&mut self.health),
            Stat::Happiness => Some(&mut self.happiness),
            Stat::Intelligence => Some(&mut self.intelligence),
            Stat::Looks => Some(&mut self.looks),
            Stat::Money => None,
        }
    }

    /// Apply a named delta map, then clamp once.
    ///
    /// Returns how many keys were recognized (including `age`).
    pub fn apply_stat_changes<'a, I>(&mut self, changes: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let resolved = resolve_deltas(changes);
        self.apply_deltas(&resolved.deltas);
        self.age = self.age.saturating_add(resolved.age);
        resolved.recognized
    }

    /// Apply a content stat-change map (one outcome, one clamp)
    pub fn apply_change_map(&mut self, changes: &StatChanges) -> usize {
        self.apply_stat_changes(changes.iter().map(|(key, delta)| (key.as_str(), *delta)))
    }

    /// Apply already resolved deltas additively and clamp bounded stats once
    /// at the end, so intermediate overshoot within one batch is kept.
    pub fn apply_deltas(&mut self, deltas: &[(Stat, i64)]) {
        let mut raw = [
            i64::from(self.health),
            i64::from(self.happiness),
            i64::from(self.intelligence),
            i64::from(self.looks),
        ];

        for &(stat, delta) in deltas {
            match stat {
                Stat::Health => raw[0] = raw[0].saturating_add(delta),
                Stat::Happiness => raw[1] = raw[1].saturating_add(delta),
                Stat::Intelligence => raw[2] = raw[2].saturating_add(delta),
                Stat::Looks => raw[3] = raw[3].saturating_add(delta),
                Stat::Money => self.money = self.money.saturating_add(delta),
            }
        }

        self.health = clamp_stat(raw[0]);
        self.happiness = clamp_stat(raw[1]);
        self.intelligence = clamp_stat(raw[2]);
        self.looks = clamp_stat(raw[3]);
    }

    /// Single-stat change with immediate clamping
    pub fn adjust(&mut self, stat: Stat, delta: i64) {
        self.apply_deltas(&[(stat, delta)]);
    }

    /// Force every bounded stat back into range
    pub fn clamp_stats(&mut self) {
        for stat in Stat::BOUNDED {
            if let Some(value) = self.slot(stat) {
                *value = clamp_stat(i64::from(*value));
            }
        }
        for relationship in &mut self.relationships {
            relationship.adjust_closeness(0);
        }
    }

    #[inline]
    pub fn has_trait(&self, id: &str) -> bool {
        self.traits.iter().any(|t| t == id)
    }

    #[inline]
    pub fn has_seen(&self, event_id: &str) -> bool {
        self.event_history.iter().any(|e| e == event_id)
    }

    /// Record an event as shown. Repeats are recorded once.
    pub fn mark_shown(&mut self, event_id: &str) {
        if !self.has_seen(event_id) {
            self.event_history.push(event_id.to_string());
        }
    }

    #[inline]
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Best GPA among completed courses, 0.0 without any
    pub fn best_gpa(&self) -> f64 {
        self.degrees.iter().map(|d| d.gpa).fold(0.0, f64::max)
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(pairs: &[(&'static str, i64)]) -> Vec<(&'static str, i64)> {
        pairs.to_vec()
    }

    #[test]
    fn test_new_character() {
        let c = Character::new("c1", "Alex", Gender::Female);
        assert_eq!(c.age, 0);
        assert!(c.alive);
        assert_eq!(c.health, DEFAULT_STAT);
        assert_eq!(c.money, 0);
    }

    #[test]
    fn test_health_clamped_at_max() {
        let mut c = Character::default();
        c.health = 95;
        c.apply_stat_changes(changes(&[("health", 10)]));
        assert_eq!(c.health, 100);
    }

    #[test]
    fn test_clamped_at_min() {
        let mut c = Character::default();
        c.happiness = 3;
        c.apply_stat_changes(changes(&[("happiness", -40)]));
        assert_eq!(c.happiness, 0);
    }

    #[test]
    fn test_clamp_happens_once_per_batch() {
        let mut c = Character::default();
        c.looks = 95;
        // +20 then -20 inside one outcome nets zero before clamping
        c.apply_stat_changes(changes(&[("looks", 20), ("LOOKS", -20)]));
        assert_eq!(c.looks, 95);

        // the same deltas applied separately hit the ceiling first
        c.adjust(Stat::Looks, 20);
        c.adjust(Stat::Looks, -20);
        assert_eq!(c.looks, 80);
    }

    #[test]
    fn test_money_unbounded() {
        let mut c = Character::default();
        c.apply_stat_changes(changes(&[("money", 250_000)]));
        assert_eq!(c.money, 250_000);
        c.apply_stat_changes(changes(&[("money", -300_000)]));
        assert_eq!(c.money, -50_000);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut c = Character::default();
        let before = c.clone();
        let recognized = c.apply_stat_changes(changes(&[("charisma", 10), ("karma", -3)]));
        assert_eq!(recognized, 0);
        assert_eq!(c, before);
    }

    #[test]
    fn test_age_progression_key() {
        let mut c = Character::default();
        c.age = 10;
        let recognized = c.apply_stat_changes(changes(&[("age", 2), ("smarts", 5)]));
        assert_eq!(recognized, 2);
        assert_eq!(c.age, 12);
        assert_eq!(c.intelligence, 55);

        // negative age progression is ignored
        c.apply_stat_changes(changes(&[("age", -5)]));
        assert_eq!(c.age, 12);
    }

    #[test]
    fn test_mark_shown_once() {
        let mut c = Character::default();
        c.mark_shown("evt_school");
        c.mark_shown("evt_school");
        assert_eq!(c.event_history, vec!["evt_school".to_string()]);
        assert!(c.has_seen("evt_school"));
    }

    #[test]
    fn test_best_gpa() {
        let mut c = Character::default();
        assert_eq!(c.best_gpa(), 0.0);
        c.degrees.push(Degree {
            course_id: "hs".into(),
            tier: EducationTier::HighSchool,
            gpa: 3.1,
            graduated_at_age: 18,
        });
        c.degrees.push(Degree {
            course_id: "ba".into(),
            tier: EducationTier::University,
            gpa: 3.6,
            graduated_at_age: 22,
        });
        assert!((c.best_gpa() - 3.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_relationship_closeness_bounded() {
        let mut c = Character::default();
        c.relationships.push(Relationship {
            name: "Mom".into(),
            kind: "parent".into(),
            closeness: 140,
        });
        c.clamp_stats();
        assert_eq!(c.relationships[0].closeness, 100);

        c.relationships[0].adjust_closeness(-250);
        assert_eq!(c.relationships[0].closeness, 0);
    }
}
