mod combination;
mod dish;
mod slot;

pub use combination::{Combination, CombinationKey, Portion};
pub use dish::Dish;
pub use slot::{MealSlot, SlotSplit};
