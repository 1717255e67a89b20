//! Tolerance and quantity sensitivity sweep over a catalog.

pub mod grid;
pub mod output;

pub use grid::{SweepConfig, SweepResult, evaluate, run_sweep};
pub use output::{print_topk, write_best_settings, write_csv};
