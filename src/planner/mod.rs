pub mod combinations;
pub mod constants;
pub mod day;
pub mod variety;

pub use combinations::{FinderConfig, SearchOutcome, ToleranceBand, find_combinations, search};
pub use constants::*;
pub use day::{DayPlan, SlotPlan, plan_day, plan_slot, slot_target};
pub use variety::{
    Selection, SelectionCursor, SelectionMode, daily_seed_key, select, select_n, select_with_rng,
};
