use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{MealError, Result};
use crate::models::{Combination, CombinationKey, Dish};
use crate::planner::constants::{DEFAULT_MAX_QUANTITY, DEFAULT_TOLERANCE, MAX_REPEAT_QUANTITY};

/// Relative slack on the band edges so totals landing exactly on a bound
/// survive `target × (1 ± tol)` rounding.
const BAND_EPSILON: f64 = 1e-9;

/// Search parameters for the combination finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderConfig {
    /// Half-width of the acceptable band, as a fraction of the target.
    pub tolerance: f64,
    /// Largest per-dish quantity tried in the bounded passes.
    pub max_quantity: u32,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }
}

impl FinderConfig {
    pub fn new(tolerance: f64, max_quantity: u32) -> Self {
        Self {
            tolerance,
            max_quantity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || !(0.0..1.0).contains(&self.tolerance) {
            return Err(MealError::InvalidTolerance(self.tolerance));
        }
        if self.max_quantity == 0 {
            return Err(MealError::InvalidQuantity(self.max_quantity));
        }
        Ok(())
    }
}

/// Inclusive calorie window `[target × (1 − tol), target × (1 + tol)]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceBand {
    pub target: f64,
    pub min: f64,
    pub max: f64,
}

impl ToleranceBand {
    pub fn new(target: f64, tolerance: f64) -> Result<Self> {
        if !target.is_finite() || target <= 0.0 {
            return Err(MealError::InvalidTarget(target));
        }
        Ok(Self {
            target,
            min: target * (1.0 - tolerance),
            max: target * (1.0 + tolerance),
        })
    }

    #[inline]
    pub fn contains(&self, calories: f64) -> bool {
        let slack = self.target * BAND_EPSILON;
        calories >= self.min - slack && calories <= self.max + slack
    }
}

/// Result of a search over one catalog slice.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Distinct combinations inside the tolerance band, in generation order.
    Matched(Vec<Combination>),
    /// Nothing fit the band; the closest combination strictly under target.
    Degraded(Combination),
    /// Nothing fit the band and nothing came in under target.
    Empty,
}

impl SearchOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, SearchOutcome::Degraded(_))
    }

    pub fn len(&self) -> usize {
        match self {
            SearchOutcome::Matched(found) => found.len(),
            SearchOutcome::Degraded(_) => 1,
            SearchOutcome::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_combinations(self) -> Vec<Combination> {
        match self {
            SearchOutcome::Matched(found) => found,
            SearchOutcome::Degraded(best) => vec![best],
            SearchOutcome::Empty => Vec::new(),
        }
    }
}

/// A candidate visited during enumeration, materialized only when kept.
#[derive(Debug, Clone, Copy)]
enum Candidate<'a> {
    Single(&'a Dish, u32),
    Pair(&'a Dish, u32, &'a Dish, u32),
}

impl Candidate<'_> {
    fn total(&self) -> f64 {
        match *self {
            Candidate::Single(dish, qty) => dish.calories_for(qty),
            Candidate::Pair(a, qa, b, qb) => a.calories_for(qa) + b.calories_for(qb),
        }
    }

    fn to_combination(self) -> Combination {
        match self {
            Candidate::Single(dish, qty) => Combination::single(dish, qty),
            Candidate::Pair(a, qa, b, qb) => Combination::pair(a, qa, b, qb),
        }
    }
}

/// Quantity that brings a dish closest to the target on its own, when that
/// lies beyond the bounded quantity range but within `MAX_REPEAT_QUANTITY`.
fn repeat_quantity(dish: &Dish, target: f64, max_quantity: u32) -> Option<u32> {
    let q = (target / dish.calories_per_unit).round();
    if !q.is_finite() || q <= max_quantity as f64 || q > MAX_REPEAT_QUANTITY as f64 {
        return None;
    }
    u32::try_from(q as u64).ok()
}

/// Visit every single and pairwise candidate in generation order.
///
/// Singles come first in catalog order, then unordered pairs `(i, j)` with
/// `i < j`. Pairs of identical dishes are skipped since they collapse into a
/// single entry with a summed quantity.
fn enumerate<'a, F>(catalog: &'a [Dish], target: f64, max_quantity: u32, mut visit: F)
where
    F: FnMut(Candidate<'a>),
{
    for dish in catalog {
        for qty in 1..=max_quantity {
            visit(Candidate::Single(dish, qty));
        }
        if let Some(qty) = repeat_quantity(dish, target, max_quantity) {
            visit(Candidate::Single(dish, qty));
        }
    }

    for (i, first) in catalog.iter().enumerate() {
        for second in &catalog[i + 1..] {
            if first == second {
                continue;
            }
            for q1 in 1..=max_quantity {
                for q2 in 1..=max_quantity {
                    visit(Candidate::Pair(first, q1, second, q2));
                }
            }
        }
    }
}

/// Find combinations for one catalog slice.
///
/// Returns every distinct in-band combination, or failing that the single
/// closest combination strictly under target. Ties on distance keep the first
/// one found.
pub fn search(catalog: &[Dish], target: f64, config: &FinderConfig) -> Result<SearchOutcome> {
    config.validate()?;
    let band = ToleranceBand::new(target, config.tolerance)?;

    if catalog.is_empty() {
        return Ok(SearchOutcome::Empty);
    }

    debug!(
        target,
        min = band.min,
        max = band.max,
        dishes = catalog.len(),
        "searching combinations"
    );

    let mut found = Vec::new();
    let mut seen: HashSet<CombinationKey> = HashSet::new();
    enumerate(catalog, target, config.max_quantity, |candidate| {
        if band.contains(candidate.total()) {
            let combo = candidate.to_combination();
            if seen.insert(combo.key()) {
                found.push(combo);
            }
        }
    });

    if !found.is_empty() {
        debug!(count = found.len(), "combinations within band");
        return Ok(SearchOutcome::Matched(found));
    }

    let mut best: Option<(f64, Candidate)> = None;
    enumerate(catalog, target, config.max_quantity, |candidate| {
        let total = candidate.total();
        if total >= target {
            return;
        }
        let gap = target - total;
        if best.as_ref().is_none_or(|(best_gap, _)| gap < *best_gap) {
            best = Some((gap, candidate));
        }
    });

    match best {
        Some((gap, candidate)) => {
            info!(target, gap, "no combination within band, using closest under target");
            Ok(SearchOutcome::Degraded(candidate.to_combination()))
        }
        None => {
            info!(target, "no combination within band or under target");
            Ok(SearchOutcome::Empty)
        }
    }
}

/// Find combinations for one catalog slice as a flat list.
///
/// An empty catalog, or one where every option overshoots, yields an empty
/// list. Only a non-positive target or bad config is an error.
pub fn find_combinations(
    catalog: &[Dish],
    target: f64,
    config: &FinderConfig,
) -> Result<Vec<Combination>> {
    Ok(search(catalog, target, config)?.into_combinations())
}
