use std::collections::BTreeMap;

use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::error::{MealError, Result};
use crate::models::{Dish, MealSlot};

/// Minimum Jaro-Winkler score for a fuzzy region match.
const REGION_MATCH_THRESHOLD: f64 = 0.85;

/// Dish catalog grouped by region and meal slot.
///
/// Only valid dishes are admitted, so every slice handed to the planner is
/// well-formed.
#[derive(Debug, Clone, Default)]
pub struct CatalogManager {
    regions: BTreeMap<String, BTreeMap<MealSlot, Vec<Dish>>>,
}

impl CatalogManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dish under (region, slot). Invalid dishes are dropped with a warning.
    ///
    /// Returns whether the dish was admitted.
    pub fn insert(&mut self, region: &str, slot: MealSlot, dish: Dish) -> bool {
        if !dish.is_valid() {
            warn!(region, %slot, dish = %dish.debug_string(), "skipping invalid dish");
            return false;
        }
        self.regions
            .entry(region.trim().to_string())
            .or_default()
            .entry(slot)
            .or_default()
            .push(dish);
        true
    }

    /// Register a region with no dishes yet.
    pub fn add_region(&mut self, region: &str) {
        self.regions.entry(region.trim().to_string()).or_default();
    }

    /// Region names in sorted order.
    pub fn regions(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    /// Map a user-supplied region name onto a catalog region.
    ///
    /// Tries a case-insensitive exact match, then a unique match on the first
    /// word ("south" for "South India"), then the closest fuzzy match.
    pub fn resolve_region(&self, query: &str) -> Result<&str> {
        let wanted = query.trim().to_lowercase();
        if wanted.is_empty() {
            return Err(MealError::RegionNotFound(query.to_string()));
        }

        if let Some(name) = self.regions.keys().find(|r| r.to_lowercase() == wanted) {
            return Ok(name.as_str());
        }

        let by_first_word: Vec<&String> = self
            .regions
            .keys()
            .filter(|r| {
                r.split_whitespace()
                    .next()
                    .is_some_and(|w| w.to_lowercase() == wanted)
            })
            .collect();
        if let [name] = by_first_word.as_slice() {
            debug!(query, region = %name, "resolved region by first word");
            return Ok(name.as_str());
        }

        let best = self
            .regions
            .keys()
            .map(|r| (r, jaro_winkler(&r.to_lowercase(), &wanted)))
            .filter(|(_, score)| *score > REGION_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((name, score)) => {
                debug!(query, region = %name, score, "resolved region by fuzzy match");
                Ok(name.as_str())
            }
            None => Err(MealError::RegionNotFound(query.to_string())),
        }
    }

    /// Dishes for one (region, slot). A known region without that slot yields
    /// an empty slice.
    pub fn slice(&self, region: &str, slot: MealSlot) -> Result<&[Dish]> {
        let name = self.resolve_region(region)?;
        Ok(self
            .regions
            .get(name)
            .and_then(|slots| slots.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Every non-empty (region, slot, dishes) triple.
    pub fn slices(&self) -> impl Iterator<Item = (&str, MealSlot, &[Dish])> {
        self.regions.iter().flat_map(|(region, slots)| {
            slots
                .iter()
                .filter(|(_, dishes)| !dishes.is_empty())
                .map(move |(slot, dishes)| (region.as_str(), *slot, dishes.as_slice()))
        })
    }

    /// Number of dishes in one slot of an exact region name.
    pub fn dish_count(&self, region: &str, slot: MealSlot) -> usize {
        self.regions
            .get(region)
            .and_then(|slots| slots.get(&slot))
            .map_or(0, Vec::len)
    }

    /// Total dishes across all regions and slots.
    pub fn len(&self) -> usize {
        self.regions
            .values()
            .flat_map(|slots| slots.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
