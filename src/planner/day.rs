use tracing::debug;

use crate::error::{MealError, Result};
use crate::models::{Combination, Dish, MealSlot};
use crate::planner::combinations::search;
use crate::planner::variety::{SelectionCursor, SelectionMode, select_n};
use crate::settings::Settings;
use crate::state::{CatalogManager, CursorStore};

/// Suggestions for one meal slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPlan {
    pub slot: MealSlot,
    pub target: f64,
    /// No combination fit the band; `chosen` holds the closest under target.
    pub degraded: bool,
    /// Size of the candidate set the selection was drawn from.
    pub candidates: usize,
    pub chosen: Vec<Combination>,
    pub next_cursor: SelectionCursor,
}

impl SlotPlan {
    /// Calories of the leading suggestion, or 0 when there is none.
    pub fn lead_calories(&self) -> f64 {
        self.chosen.first().map_or(0.0, Combination::total_calories)
    }
}

/// Suggestions for every slot of one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub region: String,
    pub daily_target: f64,
    pub slots: Vec<SlotPlan>,
}

impl DayPlan {
    /// Sum of the leading suggestion of each slot.
    pub fn total_calories(&self) -> f64 {
        self.slots.iter().map(SlotPlan::lead_calories).sum()
    }

    /// Per-slot (slot, lead calories, target).
    pub fn breakdown(&self) -> Vec<(MealSlot, f64, f64)> {
        self.slots
            .iter()
            .map(|s| (s.slot, s.lead_calories(), s.target))
            .collect()
    }
}

/// Find and select combinations for one slot.
pub fn plan_slot(
    slice: &[Dish],
    slot: MealSlot,
    target: f64,
    settings: &Settings,
    cursor: &SelectionCursor,
    mode: &SelectionMode,
) -> Result<SlotPlan> {
    let outcome = search(slice, target, &settings.finder_config())?;
    let degraded = outcome.is_degraded();
    let candidates = outcome.into_combinations();
    let selection = select_n(&candidates, cursor, mode, settings.suggestions_per_slot);

    debug!(
        %slot,
        target,
        candidates = candidates.len(),
        degraded,
        "planned slot"
    );

    Ok(SlotPlan {
        slot,
        target,
        degraded,
        candidates: candidates.len(),
        chosen: selection.chosen,
        next_cursor: selection.next_cursor,
    })
}

/// Target for one slot as its share of the daily target.
///
/// `None` when the slot's share is zero; such a slot gets no suggestion.
pub fn slot_target(settings: &Settings, slot: MealSlot, daily_target: f64) -> Result<Option<f64>> {
    if !daily_target.is_finite() || daily_target <= 0.0 {
        return Err(MealError::InvalidTarget(daily_target));
    }
    let target = settings.slot_split.target_for(slot, daily_target);
    Ok((target > 0.0).then_some(target))
}

/// Plan every slot of a day for one user.
///
/// Slot targets come from the configured split. Slots whose share is zero
/// are left out. Cursors in `cursors` are advanced in place.
pub fn plan_day(
    catalog: &CatalogManager,
    region: &str,
    daily_target: f64,
    settings: &Settings,
    user: &str,
    cursors: &mut CursorStore,
    mode: &SelectionMode,
) -> Result<DayPlan> {
    if !daily_target.is_finite() || daily_target <= 0.0 {
        return Err(MealError::InvalidTarget(daily_target));
    }
    let region = catalog.resolve_region(region)?.to_string();

    let mut slots = Vec::with_capacity(MealSlot::ALL.len());
    for slot in MealSlot::ALL {
        let Some(target) = slot_target(settings, slot, daily_target)? else {
            debug!(%slot, "slot has no calorie share, skipping");
            continue;
        };

        let slot_mode = mode.for_slot(slot);
        let slice = catalog.slice(&region, slot)?;
        let cursor = cursors.get(user, &region, slot);
        let plan = plan_slot(slice, slot, target, settings, &cursor, &slot_mode)?;
        cursors.set(user, &region, slot, plan.next_cursor.clone());
        slots.push(plan);
    }

    Ok(DayPlan {
        region,
        daily_target,
        slots,
    })
}
