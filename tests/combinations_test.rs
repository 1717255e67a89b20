#[macro_use]
extern crate assert_float_eq;

use std::collections::HashSet;

use calorie_mate_rs::error::MealError;
use calorie_mate_rs::models::{Combination, Dish, Portion};
use calorie_mate_rs::planner::{FinderConfig, SearchOutcome, ToleranceBand, find_combinations, search};

fn south_breakfast() -> Vec<Dish> {
    vec![
        Dish::new("Idli", 120.0, "piece"),
        Dish::new("Sambar", 80.0, "bowl"),
    ]
}

fn mixed_catalog() -> Vec<Dish> {
    vec![
        Dish::new("Poha", 180.0, "plate"),
        Dish::new("Chai", 90.0, "cup"),
        Dish::new("Upma", 210.0, "bowl"),
        Dish::new("Banana", 105.0, "piece"),
        Dish::new("Boiled Egg", 78.0, "piece"),
    ]
}

#[test]
fn test_idli_sambar_pair_found() {
    let found = find_combinations(&south_breakfast(), 300.0, &FinderConfig::default()).unwrap();

    let expected = Combination::new(vec![
        Portion::new(Dish::new("Idli", 120.0, "piece"), 2),
        Portion::new(Dish::new("Sambar", 80.0, "bowl"), 1),
    ])
    .unwrap();
    let hit = found.iter().find(|c| **c == expected).expect("Idli x2 + Sambar x1 missing");
    assert_float_absolute_eq!(hit.total_calories(), 320.0, 1e-9);
}

#[test]
fn test_pair_equality_ignores_order() {
    let found = find_combinations(&south_breakfast(), 300.0, &FinderConfig::default()).unwrap();
    let reversed = Combination::new(vec![
        Portion::new(Dish::new("Sambar", 80.0, "bowl"), 1),
        Portion::new(Dish::new("Idli", 120.0, "piece"), 2),
    ])
    .unwrap();
    assert!(found.contains(&reversed));
}

#[test]
fn test_paratha_overshoots_to_empty() {
    let catalog = [Dish::new("Paratha", 250.0, "piece")];
    let outcome = search(&catalog, 100.0, &FinderConfig::default()).unwrap();
    assert_eq!(outcome, SearchOutcome::Empty);
    assert!(find_combinations(&catalog, 100.0, &FinderConfig::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_empty_catalog_is_stable() {
    let config = FinderConfig::default();
    let first = find_combinations(&[], 400.0, &config).unwrap();
    let second = find_combinations(&[], 400.0, &config).unwrap();
    assert!(first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_matches_sit_inside_band() {
    let config = FinderConfig::default();
    for target in [150.0, 300.0, 400.0, 550.0] {
        let band = ToleranceBand::new(target, config.tolerance).unwrap();
        if let SearchOutcome::Matched(found) = search(&mixed_catalog(), target, &config).unwrap() {
            assert!(!found.is_empty());
            for combo in &found {
                assert!(
                    band.contains(combo.total_calories()),
                    "{} kcal outside [{}, {}]",
                    combo.total_calories(),
                    band.min,
                    band.max
                );
                assert!((1..=2).contains(&combo.len()));
            }
        }
    }
}

#[test]
fn test_no_duplicate_combinations() {
    let found = find_combinations(&mixed_catalog(), 400.0, &FinderConfig::default()).unwrap();
    let keys: HashSet<_> = found.iter().map(Combination::key).collect();
    assert_eq!(keys.len(), found.len());
}

#[test]
fn test_wider_tolerance_keeps_narrow_matches() {
    let catalog = mixed_catalog();
    let narrow = search(&catalog, 400.0, &FinderConfig::new(0.05, 2)).unwrap();
    let wide = search(&catalog, 400.0, &FinderConfig::new(0.25, 2)).unwrap();

    let (SearchOutcome::Matched(narrow), SearchOutcome::Matched(wide)) = (narrow, wide) else {
        panic!("expected both searches to match");
    };
    let wide_keys: HashSet<_> = wide.iter().map(Combination::key).collect();
    assert!(narrow.iter().all(|c| wide_keys.contains(&c.key())));
    assert!(wide.len() >= narrow.len());
}

#[test]
fn test_degraded_result_is_under_target() {
    // Band [595, 605] is unreachable with these dishes.
    let catalog = [Dish::new("Curd Rice", 350.0, "bowl"), Dish::new("Rasam", 90.0, "bowl")];
    let outcome = search(&catalog, 600.0, &FinderConfig::new(0.0083, 1)).unwrap();
    assert!(outcome.is_degraded());

    let best = outcome.into_combinations();
    assert_eq!(best.len(), 1);
    assert!(best[0].total_calories() < 600.0);
    assert_float_absolute_eq!(best[0].total_calories(), 440.0, 1e-9);
}

#[test]
fn test_totals_on_band_edges_match() {
    let config = FinderConfig::default();
    for (target, edges) in [(100.0, [85.0, 115.0]), (200.0, [170.0, 230.0]), (400.0, [340.0, 460.0])] {
        for calories in edges {
            let catalog = [Dish::new("Thali", calories, "plate")];
            let found = find_combinations(&catalog, target, &config).unwrap();
            assert_eq!(found.len(), 1, "{} kcal at target {}", calories, target);
            assert_float_absolute_eq!(found[0].total_calories(), calories, 1e-9);
        }
    }
}

#[test]
fn test_tiny_dish_huge_target_stays_realistic() {
    let catalog = [Dish::new("Tiny", 1.0, "piece")];
    let found = find_combinations(&catalog, 1e12, &FinderConfig::new(0.0, 2)).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].portions()[0].quantity <= 2);
}

#[test]
fn test_invalid_target_is_an_error() {
    for target in [0.0, -250.0, f64::NAN] {
        let result = find_combinations(&south_breakfast(), target, &FinderConfig::default());
        assert!(matches!(result, Err(MealError::InvalidTarget(_))));
    }
}
