//! Event eligibility and weighted drawing

use crate::character::Character;
use crate::condition::{condition_holds, LifeView};
use crate::config::{ContentCatalog, EventDef};
use rand::Rng;

/// Events the character may see right now: inside the age window, condition
/// satisfied, and repeatable or not yet shown
pub fn eligible_events<'a>(events: &'a [EventDef], view: &LifeView<'_>) -> Vec<&'a EventDef> {
    let character = view.character;
    events
        .iter()
        .filter(|e| e.in_age_window(character.age))
        .filter(|e| e.is_repeatable || !character.has_seen(&e.id))
        .filter(|e| condition_holds(e.condition.as_deref(), view))
        .collect()
}

/// Weighted random selection. Non-positive weights never win.
#[inline]
pub fn weighted_random<T: Copy, R: Rng + ?Sized>(items: &[(T, f64)], rng: &mut R) -> Option<T> {
    let total_weight: f64 = items.iter().map(|(_, w)| w.max(0.0)).sum();
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return None;
    }

    let mut random_value = rng.gen::<f64>() * total_weight;
    let mut last_positive = None;
    for &(item, weight) in items {
        if weight <= 0.0 {
            continue;
        }
        last_positive = Some(item);
        random_value -= weight;
        if random_value < 0.0 {
            return Some(item);
        }
    }

    // Float rounding can leave a sliver at the end
    last_positive
}

/// Draw this year's event and mark it shown immediately
pub fn draw_event<'a, R: Rng + ?Sized>(
    catalog: &'a ContentCatalog,
    character: &mut Character,
    gpa: Option<f64>,
    rng: &mut R,
) -> Option<&'a EventDef> {
    let drawn = {
        let view = LifeView::new(character, gpa);
        let pool: Vec<(&EventDef, f64)> = eligible_events(catalog.events(), &view)
            .into_iter()
            .map(|e| (e, e.probability))
            .collect();
        weighted_random(&pool, rng)?
    };

    character.mark_shown(&drawn.id);
    tracing::debug!(
        target: "alt_life::event",
        event = %drawn.id,
        age = character.age,
        "event.drawn"
    );
    Some(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn event(id: &str, min_age: u32, max_age: u32, repeatable: bool) -> EventDef {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "minAge": min_age,
            "maxAge": max_age,
            "isRepeatable": repeatable,
        }))
        .unwrap()
    }

    #[test]
    fn test_weighted_random_single() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(weighted_random(&[(1, 1.0)], &mut rng), Some(1));
    }

    #[test]
    fn test_weighted_random_empty_or_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: [(i32, f64); 0] = [];
        assert_eq!(weighted_random(&empty, &mut rng), None);
        assert_eq!(weighted_random(&[(1, 0.0), (2, -3.0)], &mut rng), None);
    }

    #[test]
    fn test_zero_weight_never_wins() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_eq!(weighted_random(&[(1, 0.0), (2, 0.5), (3, -1.0)], &mut rng), Some(2));
        }
    }

    #[test]
    fn test_weighted_random_distribution() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = [(0usize, 1.0), (1usize, 1.0)];
        let mut counts = [0, 0];
        for _ in 0..2000 {
            if let Some(i) = weighted_random(&items, &mut rng) {
                counts[i] += 1;
            }
        }
        let ratio = counts[0] as f64 / counts[1] as f64;
        assert!(ratio > 0.8 && ratio < 1.25, "ratio {ratio}");
    }

    #[test]
    fn test_age_window_and_history() {
        let events = vec![
            event("teen", 13, 19, false),
            event("college", 18, 25, false),
            event("any", 0, 200, true),
        ];
        let mut c = Character::default();
        c.age = 18;
        c.mark_shown("teen");
        c.mark_shown("any");

        let ids: Vec<&str> = eligible_events(&events, &LifeView::new(&c, None))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["college", "any"]);
    }

    #[test]
    fn test_draw_marks_shown() {
        let catalog = ContentCatalog::default().with_events(vec![event("once", 0, 10, false)]);
        let mut c = Character::default();
        let mut rng = StdRng::seed_from_u64(3);

        let drawn = draw_event(&catalog, &mut c, None, &mut rng).unwrap();
        assert_eq!(drawn.id, "once");
        assert!(c.has_seen("once"));
        assert!(draw_event(&catalog, &mut c, None, &mut rng).is_none());
    }
}
