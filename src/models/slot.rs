use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MealError;

/// A meal period with its own calorie sub-target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snacks,
        MealSlot::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snacks => "snacks",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Snacks => "Snacks",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = MealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "snack" | "snacks" => Ok(MealSlot::Snacks),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(MealError::InvalidInput(format!("unknown meal slot '{}'", other))),
        }
    }
}

/// Fractions of the daily calorie target assigned to each slot.
///
/// Supplied by the caller; the planner uses them as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSplit {
    pub breakfast: f64,
    pub lunch: f64,
    pub snacks: f64,
    pub dinner: f64,
}

impl Default for SlotSplit {
    fn default() -> Self {
        Self {
            breakfast: 0.30,
            lunch: 0.30,
            snacks: 0.10,
            dinner: 0.30,
        }
    }
}

impl SlotSplit {
    pub fn fraction(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Snacks => self.snacks,
            MealSlot::Dinner => self.dinner,
        }
    }

    /// Calorie target for one slot given the daily target.
    pub fn target_for(&self, slot: MealSlot, daily_target: f64) -> f64 {
        daily_target * self.fraction(slot)
    }

    /// All fractions finite and non-negative.
    pub fn is_valid(&self) -> bool {
        MealSlot::ALL
            .iter()
            .map(|s| self.fraction(*s))
            .all(|f| f.is_finite() && f >= 0.0)
    }
}
