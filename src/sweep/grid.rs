use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{MealError, Result};
use crate::planner::constants::{SWEEP_MAX_QUANTITIES, SWEEP_TARGETS, SWEEP_TOLERANCES};
use crate::planner::{FinderConfig, SearchOutcome, search};
use crate::state::CatalogManager;

/// Configuration for a tolerance × max-quantity sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub tolerances: Vec<f64>,
    pub max_quantities: Vec<u32>,
    /// Per-slot targets evaluated for every catalog slice.
    pub targets: Vec<f64>,
    /// Extra targets drawn uniformly from `target_range`.
    pub random_targets: usize,
    pub target_range: (f64, f64),
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            tolerances: SWEEP_TOLERANCES.to_vec(),
            max_quantities: SWEEP_MAX_QUANTITIES.to_vec(),
            targets: SWEEP_TARGETS.to_vec(),
            random_targets: 0,
            target_range: (100.0, 1000.0),
            seed: 123,
        }
    }
}

impl SweepConfig {
    /// Fixed targets followed by the seeded random ones.
    pub fn all_targets(&self) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (low, high) = self.target_range;
        let mut targets = self.targets.clone();
        targets.extend((0..self.random_targets).map(|_| rng.gen_range(low..=high).round()));
        targets
    }

    pub fn validate(&self) -> Result<()> {
        let (low, high) = self.target_range;
        if self.random_targets > 0 && !(low > 0.0 && low <= high && high.is_finite()) {
            return Err(MealError::InvalidInput(format!(
                "invalid target range {}..{}",
                low, high
            )));
        }
        if self.tolerances.is_empty() || self.max_quantities.is_empty() {
            return Err(MealError::InvalidInput(
                "sweep needs at least one tolerance and one max quantity".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregate outcome of one (tolerance, max quantity) cell over all cases.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub config: FinderConfig,
    /// Number of (slice, target) cases evaluated.
    pub cases: usize,
    pub matched: usize,
    pub degraded: usize,
    pub empty: usize,
    /// Mean candidate-set size over matched cases.
    pub avg_candidates: f64,
    /// Mean |best total − target| / target over non-empty cases.
    pub avg_relative_error: f64,
}

impl SweepResult {
    fn rate(&self, count: usize) -> f64 {
        if self.cases == 0 {
            0.0
        } else {
            count as f64 / self.cases as f64
        }
    }

    pub fn match_rate(&self) -> f64 {
        self.rate(self.matched)
    }

    pub fn degraded_rate(&self) -> f64 {
        self.rate(self.degraded)
    }

    pub fn empty_rate(&self) -> f64 {
        self.rate(self.empty)
    }

    /// Lexicographic: higher match rate, then lower relative error, then
    /// more candidates to shuffle through.
    pub fn cmp_score(&self, other: &Self) -> Ordering {
        match self.match_rate().partial_cmp(&other.match_rate()) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        match other
            .avg_relative_error
            .partial_cmp(&self.avg_relative_error)
        {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        self.avg_candidates
            .partial_cmp(&other.avg_candidates)
            .unwrap_or(Ordering::Equal)
    }
}

/// Evaluate one finder config over every catalog slice and target.
pub fn evaluate(
    catalog: &CatalogManager,
    config: &FinderConfig,
    targets: &[f64],
) -> Result<SweepResult> {
    let mut result = SweepResult {
        config: *config,
        cases: 0,
        matched: 0,
        degraded: 0,
        empty: 0,
        avg_candidates: 0.0,
        avg_relative_error: 0.0,
    };
    let mut candidate_sum = 0usize;
    let mut error_sum = 0.0;

    for (_region, _slot, dishes) in catalog.slices() {
        for &target in targets {
            result.cases += 1;
            let outcome = search(dishes, target, config)?;
            match &outcome {
                SearchOutcome::Matched(found) => {
                    result.matched += 1;
                    candidate_sum += found.len();
                }
                SearchOutcome::Degraded(_) => result.degraded += 1,
                SearchOutcome::Empty => {
                    result.empty += 1;
                    continue;
                }
            }

            let best_error = outcome
                .into_combinations()
                .iter()
                .map(|c| (c.total_calories() - target).abs() / target)
                .fold(f64::INFINITY, f64::min);
            error_sum += best_error;
        }
    }

    if result.matched > 0 {
        result.avg_candidates = candidate_sum as f64 / result.matched as f64;
    }
    let non_empty = result.matched + result.degraded;
    if non_empty > 0 {
        result.avg_relative_error = error_sum / non_empty as f64;
    }

    debug!(
        tolerance = config.tolerance,
        max_quantity = config.max_quantity,
        matched = result.matched,
        degraded = result.degraded,
        empty = result.empty,
        "evaluated sweep cell"
    );
    Ok(result)
}

/// Evaluate the full grid; results come back best first.
pub fn run_sweep(config: &SweepConfig, catalog: &CatalogManager) -> Result<Vec<SweepResult>> {
    config.validate()?;
    let targets = config.all_targets();

    info!(
        cells = config.tolerances.len() * config.max_quantities.len(),
        targets = targets.len(),
        slices = catalog.slices().count(),
        "running sweep"
    );

    let mut results = Vec::with_capacity(config.tolerances.len() * config.max_quantities.len());
    for &tolerance in &config.tolerances {
        for &max_quantity in &config.max_quantities {
            let finder = FinderConfig::new(tolerance, max_quantity);
            results.push(evaluate(catalog, &finder, &targets)?);
        }
    }

    results.sort_by(|a, b| b.cmp_score(a));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dish, MealSlot};

    fn sample_catalog() -> CatalogManager {
        let mut catalog = CatalogManager::new();
        catalog.insert("West India", MealSlot::Snacks, Dish::new("Dhokla", 50.0, "piece"));
        catalog.insert("West India", MealSlot::Snacks, Dish::new("Khakhra", 120.0, "piece"));
        catalog.insert("West India", MealSlot::Lunch, Dish::new("Thali", 800.0, "plate"));
        catalog
    }

    #[test]
    fn test_all_targets_deterministic() {
        let config = SweepConfig {
            random_targets: 5,
            ..Default::default()
        };
        let a = config.all_targets();
        let b = config.all_targets();
        assert_eq!(a, b);
        assert_eq!(a.len(), SWEEP_TARGETS.len() + 5);
        assert!(a[SWEEP_TARGETS.len()..].iter().all(|t| (100.0..=1000.0).contains(t)));
    }

    #[test]
    fn test_evaluate_counts_cases() {
        let catalog = sample_catalog();
        // Snacks: 100 matches via Dhokla x2; Lunch: 100 finds nothing under target.
        let result = evaluate(&catalog, &FinderConfig::default(), &[100.0]).unwrap();
        assert_eq!(result.cases, 2);
        assert_eq!(result.matched, 1);
        assert_eq!(result.empty, 1);
        assert_eq!(result.degraded, 0);
        assert!((result.match_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_wider_tolerance_never_matches_less() {
        let catalog = sample_catalog();
        let targets = SweepConfig::default().all_targets();
        let narrow = evaluate(&catalog, &FinderConfig::new(0.05, 2), &targets).unwrap();
        let wide = evaluate(&catalog, &FinderConfig::new(0.30, 2), &targets).unwrap();
        assert!(wide.matched >= narrow.matched);
    }

    #[test]
    fn test_run_sweep_sorted_best_first() {
        let catalog = sample_catalog();
        let results = run_sweep(&SweepConfig::default(), &catalog).unwrap();
        assert_eq!(results.len(), SWEEP_TOLERANCES.len() * SWEEP_MAX_QUANTITIES.len());
        for pair in results.windows(2) {
            assert_ne!(pair[0].cmp_score(&pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = SweepConfig {
            tolerances: vec![],
            ..Default::default()
        };
        assert!(run_sweep(&config, &sample_catalog()).is_err());
    }
}
