use serde::Serialize;
use serde_json::{Value, json};

use crate::models::{Combination, MealSlot};
use crate::planner::{DayPlan, SlotPlan};
use crate::state::CatalogManager;

/// Display-ready view of one combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationSummary {
    /// Dish names with quantities, e.g. `Idli x2 + Sambar x1`.
    pub name: String,
    /// Serving units, e.g. `2 × piece + 1 × bowl`.
    pub units: String,
    pub total_calories: u32,
}

pub fn summarize(combo: &Combination) -> CombinationSummary {
    let name = combo
        .portions()
        .iter()
        .map(|p| format!("{} x{}", p.dish.name, p.quantity))
        .collect::<Vec<_>>()
        .join(" + ");
    let units = combo
        .portions()
        .iter()
        .map(|p| format!("{} × {}", p.quantity, p.dish.unit))
        .collect::<Vec<_>>()
        .join(" + ");

    CombinationSummary {
        name,
        units,
        total_calories: combo.total_calories().round() as u32,
    }
}

/// JSON view of one slot: summaries plus the raw combinations.
pub fn slot_plan_json(plan: &SlotPlan) -> Value {
    let suggestions: Vec<CombinationSummary> = plan.chosen.iter().map(summarize).collect();
    json!({
        "slot": plan.slot,
        "target": plan.target.round() as u32,
        "degraded": plan.degraded,
        "candidates": plan.candidates,
        "suggestions": suggestions,
        "combinations": plan.chosen,
    })
}

/// JSON view of a day: per-slot views plus a calorie summary.
pub fn day_plan_json(plan: &DayPlan) -> Value {
    let slots: Vec<Value> = plan.slots.iter().map(slot_plan_json).collect();
    let breakdown: serde_json::Map<String, Value> = plan
        .breakdown()
        .into_iter()
        .map(|(slot, calories, target)| {
            (
                slot.to_string(),
                json!({
                    "calories": calories.round() as u32,
                    "target": target.round() as u32,
                }),
            )
        })
        .collect();

    json!({
        "region": plan.region,
        "daily_target": plan.daily_target.round() as u32,
        "slots": slots,
        "summary": {
            "total_calories": plan.total_calories().round() as u32,
            "breakdown": breakdown,
        },
    })
}

/// Print one slot's suggestions as cards.
pub fn display_slot_plan(plan: &SlotPlan) {
    println!();
    println!(
        "=== {} (target {:.0} cal) ===",
        plan.slot.label(),
        plan.target
    );

    if plan.chosen.is_empty() {
        println!("  No suggestion available.");
        return;
    }

    if plan.degraded {
        println!("  (no exact match; showing the closest option under target)");
    }

    for (i, combo) in plan.chosen.iter().enumerate() {
        let summary = summarize(combo);
        println!(
            "{:>3}. {} - {} cal",
            i + 1,
            summary.name,
            summary.total_calories
        );
        println!("     {}", summary.units);
    }
    println!("  ({} candidate combinations)", plan.candidates);
}

/// Print every slot of a day followed by a calorie summary.
pub fn display_day_plan(plan: &DayPlan) {
    println!();
    println!(
        "Meal suggestions for {} ({:.0} cal/day)",
        plan.region, plan.daily_target
    );

    for slot in &plan.slots {
        display_slot_plan(slot);
    }

    println!();
    println!("--- Summary ---");
    for (slot, calories, target) in plan.breakdown() {
        println!("{:<10} {:>5.0} / {:.0} cal", slot.label(), calories, target);
    }
    println!("Total: {:.0} cal", plan.total_calories());
    println!();
}

/// Print the catalog's regions and dish counts per slot.
pub fn display_regions(catalog: &CatalogManager) {
    if catalog.regions().is_empty() {
        println!("Catalog has no regions.");
        return;
    }

    println!();
    println!("=== Regions ({} dishes) ===", catalog.len());
    println!();
    for region in catalog.regions() {
        let counts: Vec<String> = MealSlot::ALL
            .iter()
            .map(|slot| format!("{} {}", slot, catalog.dish_count(region, *slot)))
            .collect();
        println!("  {} - {}", region, counts.join(", "));
    }
    println!();
}
