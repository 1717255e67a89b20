pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod settings;
pub mod state;
pub mod sweep;

pub use error::{MealError, Result};
pub use models::{Combination, Dish, MealSlot, Portion};
pub use planner::{FinderConfig, SelectionCursor, SelectionMode, find_combinations, select};
