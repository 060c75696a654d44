//! Benchmark for simulation performance
//!
//! Target: a full life from birth to max_age should complete in <15ms

use alt_life_core::character::{Character, Gender};
use alt_life_core::condition::LifeView;
use alt_life_core::config::{
    AchievementDef, ChoiceDef, ContentCatalog, EventDef, GameSettings, OutcomeDef, TraitDef,
};
use alt_life_core::education::EducationTracker;
use alt_life_core::event::eligible_events;
use alt_life_core::simulator::LifeEngine;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn changes(pairs: &[(&str, i64)]) -> alt_life_core::character::StatChanges {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Create a realistic content catalog
fn create_test_catalog() -> ContentCatalog {
    let stats = ["health", "happiness", "smarts", "looks"];

    // 100 traits, every fifth one conditional
    let traits: Vec<TraitDef> = (1..=100)
        .map(|i| TraitDef {
            id: format!("trait_{i}"),
            name: format!("Trait {i}"),
            description: String::new(),
            effect: changes(&[(stats[i % 4], 1)]),
            condition: (i % 5 == 0).then(|| format!("AGE>={}", i % 50)),
            max_triggers: if i % 10 == 0 { 3 } else { 1 },
            exclude: if i % 15 == 0 {
                vec![format!("trait_{}", i % 100 + 1)]
            } else {
                Vec::new()
            },
        })
        .collect();

    // 500 events spread across age windows
    let events: Vec<EventDef> = (1..=500)
        .map(|i| {
            let min_age = (i % 80) as u32;
            EventDef {
                id: format!("evt_{i}"),
                title: format!("Event {i}"),
                text: Some(format!("Event {i} happened")),
                description: None,
                min_age,
                max_age: min_age + 20,
                probability: 1.0 + (i % 4) as f64,
                is_repeatable: i % 3 == 0,
                condition: match i % 10 {
                    0 => Some(format!("SMARTS>{}", i % 40)),
                    5 => Some("TRT?[trait_1,trait_2] | MONEY>100".to_string()),
                    _ => None,
                },
                category: None,
                choices: vec![
                    ChoiceDef {
                        text: "Yes".to_string(),
                        outcomes: vec![
                            OutcomeDef {
                                stat_changes: changes(&[(stats[i % 4], 5), ("money", 50)]),
                                weight: 3.0,
                                ..OutcomeDef::default()
                            },
                            OutcomeDef {
                                stat_changes: changes(&[("health", -8)]),
                                weight: 1.0,
                                ..OutcomeDef::default()
                            },
                        ],
                    },
                    ChoiceDef {
                        text: "No".to_string(),
                        outcomes: Vec::new(),
                    },
                ],
            }
        })
        .collect();

    // 50 achievements across all opportunities
    let achievements: Vec<AchievementDef> = (1..=50)
        .map(|i| AchievementDef {
            id: format!("ach_{i}"),
            name: format!("Achievement {i}"),
            description: String::new(),
            opportunity: match i % 3 {
                0 => "START".to_string(),
                1 => "YEARLY".to_string(),
                _ => "DEATH".to_string(),
            },
            condition: format!("AGE>={} & HAPPINESS>{}", i, i % 10),
            category: None,
        })
        .collect();

    ContentCatalog::default()
        .with_traits(traits)
        .with_events(events)
        .with_achievements(achievements)
}

fn create_engine() -> LifeEngine {
    let settings = GameSettings {
        autosave: false,
        ..GameSettings::default()
    };
    LifeEngine::new(Arc::new(create_test_catalog()), settings)
}

fn benchmark_full_life(c: &mut Criterion) {
    let engine = create_engine();
    let requested: Vec<String> = vec!["trait_1".into(), "trait_2".into(), "trait_3".into()];

    c.bench_function("simulate_full_life", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let mut character = engine
                .start_life("Bench", Gender::Female, None, black_box(&requested), &mut rng)
                .map(|start| start.character)
                .unwrap_or_else(|_| Character::new("bench", "Bench", Gender::Female));
            let mut education = EducationTracker::new();
            while let Some(report) = engine.advance_year(&mut character, &mut education, &mut rng) {
                if let Some(event) = report.event {
                    engine.resolve_choice(&mut character, &education, &event.id, 0, &mut rng);
                }
            }
            black_box(character)
        })
    });
}

fn benchmark_single_year(c: &mut Criterion) {
    let engine = create_engine();
    let mut rng = StdRng::seed_from_u64(11);
    let mut base = Character::new("bench", "Bench", Gender::Male);
    base.age = 30;

    c.bench_function("advance_single_year", |b| {
        b.iter(|| {
            let mut character = base.clone();
            let mut education = EducationTracker::new();
            black_box(engine.advance_year(&mut character, &mut education, &mut rng))
        })
    });

    let catalog = create_test_catalog();
    c.bench_function("eligible_events_age_30", |b| {
        b.iter(|| {
            let view = LifeView::new(&base, None);
            black_box(eligible_events(black_box(catalog.events()), &view).len())
        })
    });
}

fn benchmark_condition_parsing(c: &mut Criterion) {
    use alt_life_core::condition::cache::{clear_cache, get_or_parse};
    use alt_life_core::condition::parser::parse;

    let conditions = vec![
        "SMARTS>50",
        "SMARTS>50 & HEALTH<10",
        "SMARTS>50 | HEALTH<10",
        "AGE>=18 & LOOKS>50 & (TRT?[genius] | EVT?[evt_lottery])",
        "GPA>=3.5 & DEG?[UNIVERSITY] & MONEY>10000",
    ];

    c.bench_function("condition_parsing_cold", |b| {
        b.iter(|| {
            for cond in &conditions {
                let _ = black_box(parse(cond));
            }
        })
    });

    c.bench_function("condition_parsing_cached", |b| {
        clear_cache();
        for cond in &conditions {
            let _ = get_or_parse(cond);
        }

        b.iter(|| {
            for cond in &conditions {
                let _ = black_box(get_or_parse(cond));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_full_life,
    benchmark_single_year,
    benchmark_condition_parsing
);
criterion_main!(benches);
