//! Property tests for trait processing

use proptest::prelude::*;

use crate::character::Character;
use crate::config::{ContentCatalog, TraitDef};
use crate::traits::{assign_traits, check_exclusion, process_traits};

fn trait_def(id: String, max_triggers: u32, exclude: Vec<String>) -> TraitDef {
    TraitDef {
        name: format!("Trait {}", id),
        id,
        description: String::new(),
        effect: [("happiness".to_string(), 1)].into_iter().collect(),
        condition: None,
        max_triggers,
        exclude,
    }
}

proptest! {
    #[test]
    fn prop_trait_trigger_limit(max_triggers in 1..=10u32, years in 1..=30usize) {
        let catalog = ContentCatalog::default()
            .with_traits(vec![trait_def("t".into(), max_triggers, Vec::new())]);
        let mut c = Character::default();
        c.traits = vec!["t".into()];

        let total: usize = (0..years)
            .map(|_| process_traits(&mut c, &catalog, None).len())
            .sum();

        prop_assert_eq!(total, years.min(max_triggers as usize));
        prop_assert!(c.trait_triggers["t"] <= max_triggers);
    }

    #[test]
    fn prop_assigned_traits_never_conflict(
        excludes in prop::collection::vec(prop::collection::vec(0..8usize, 0..3), 8),
        requested in prop::collection::vec(0..8usize, 0..12)
    ) {
        let defs: Vec<TraitDef> = excludes
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                trait_def(format!("t{i}"), 1, ex.iter().map(|j| format!("t{j}")).collect())
            })
            .collect();
        let catalog = ContentCatalog::default().with_traits(defs);

        let ids: Vec<String> = requested.iter().map(|i| format!("t{i}")).collect();
        let assigned = assign_traits(ids.iter().map(String::as_str), &catalog);

        for (i, id) in assigned.iter().enumerate() {
            let def = catalog.trait_def(id).unwrap();
            prop_assert!(
                check_exclusion(&assigned[..i], def, &catalog).is_none(),
                "{} conflicts with an earlier trait in {:?}", id, assigned
            );
        }
    }
}
