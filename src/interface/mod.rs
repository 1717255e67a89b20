pub mod prompts;
pub mod render;

pub use prompts::{prompt_slot, prompt_target, prompt_yes_no};
pub use render::{
    CombinationSummary, day_plan_json, display_day_plan, display_regions, display_slot_plan,
    slot_plan_json, summarize,
};
