//! Property tests for save slots

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::character::{Character, Degree, Gender, Relationship};
use crate::config::{ActionDef, CourseDef, EducationRules, EducationTier};
use crate::education::EducationTracker;
use crate::save::{GameSave, SaveStore};

fn gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::NonBinary)]
}

fn tier() -> impl Strategy<Value = EducationTier> {
    prop_oneof![
        Just(EducationTier::HighSchool),
        Just(EducationTier::College),
        Just(EducationTier::University),
        Just(EducationTier::Graduate),
    ]
}

fn relationship() -> impl Strategy<Value = Relationship> {
    ("\\PC{0,12}", "[a-z]{1,8}", 0..=100i32).prop_map(|(name, kind, closeness)| Relationship {
        name,
        kind,
        closeness,
    })
}

fn degree() -> impl Strategy<Value = Degree> {
    ("[a-z_]{1,10}", tier(), 0.0..=4.0f64, 0..=120u32).prop_map(
        |(course_id, tier, gpa, graduated_at_age)| Degree {
            course_id,
            tier,
            gpa,
            graduated_at_age,
        },
    )
}

prop_compose! {
    fn character()(
        name in "\\PC{0,20}",
        gender in gender(),
        age in 0..=120u32,
        stats in prop::array::uniform4(0..=100i32),
        money in any::<i64>(),
        traits in prop::collection::vec("[a-z_]{1,10}", 0..4),
        triggers in prop::collection::btree_map("[a-z_]{1,10}", 0..=5u32, 0..4),
        history in prop::collection::vec("evt_[a-z]{1,8}", 0..12),
        relationships in prop::collection::vec(relationship(), 0..3),
        degrees in prop::collection::vec(degree(), 0..3),
        clubs in prop::collection::vec("[a-z]{1,8}", 0..3),
    ) -> Character {
        let mut c = Character::new("char-1", name, gender);
        c.age = age;
        [c.health, c.happiness, c.intelligence, c.looks] = stats;
        c.money = money;
        c.traits = traits;
        c.trait_triggers = triggers;
        for id in &history {
            c.mark_shown(id);
        }
        c.relationships = relationships;
        c.degrees = degrees;
        c.clubs = clubs;
        c
    }
}

fn course(tier: EducationTier) -> CourseDef {
    CourseDef {
        id: "course".into(),
        name: "Course".into(),
        tier,
        cost: 0,
        duration_years: 4,
        required_gpa: 0.0,
        actions: Vec::new(),
    }
}

fn action(min: f64, max: f64) -> ActionDef {
    ActionDef {
        id: "study".into(),
        name: "Study".into(),
        cooldown_seconds: 0,
        max_uses_per_age: 0,
        gpa_delta_min: min,
        gpa_delta_max: max,
        stat_changes: Default::default(),
        mini_game: None,
    }
}

prop_compose! {
    /// A tracker with real progress: enrolled, studied and some weeks in
    fn education(character: Character)(
        tier in tier(),
        deltas in prop::collection::vec((-1.0..=1.0f64, -1.0..=1.0f64), 0..8),
        weeks in 0..30u32,
        seed in any::<u64>(),
    ) -> EducationTracker {
        let rules = EducationRules::default();
        let course = course(tier);
        let mut c = character.clone();
        c.money = c.money.max(0);
        let mut tracker = EducationTracker::new();
        let mut rng = StdRng::seed_from_u64(seed);
        tracker.enroll(&course, &mut c, &rules);
        for (now, (a, b)) in deltas.into_iter().enumerate() {
            tracker.perform_action(&course, &action(a, b), &mut c, now as u64, None, &mut rng);
        }
        for _ in 0..weeks {
            tracker.advance_week(&rules);
        }
        tracker
    }
}

fn save() -> impl Strategy<Value = GameSave> {
    character().prop_flat_map(|c| {
        (
            Just(c.clone()),
            education(c),
            prop::option::of("evt_[a-z]{1,8}"),
        )
            .prop_map(|(c, education, pending)| {
                GameSave::new("slot", c, education).with_pending_event(pending)
            })
    })
}

fn temp_store() -> SaveStore {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    SaveStore::new(std::env::temp_dir().join(format!("alt_life_save_props_{nanos}")))
}

proptest! {
    #[test]
    fn prop_save_json_round_trip(save in save()) {
        let json = serde_json::to_string(&save).unwrap();
        let back: GameSave = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, save);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_store_round_trip(save in save()) {
        let store = temp_store();
        store.try_save(&save).unwrap();
        let loaded = store.try_load("slot").unwrap();
        prop_assert_eq!(&loaded, &save);
        prop_assert!(store.delete("slot").unwrap());
    }
}
