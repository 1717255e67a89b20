use std::path::PathBuf;

use clap::{ArgAction, Parser};

use calorie_mate_rs::error::{MealError, Result};
use calorie_mate_rs::logging::init_tracing;
use calorie_mate_rs::state::load_catalog;
use calorie_mate_rs::sweep::{SweepConfig, print_topk, run_sweep, write_best_settings, write_csv};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Tolerance and max-quantity sweep for the combination finder")]
struct Args {
    /// Path to the dish catalog (JSON, or CSV by extension)
    #[arg(long, default_value = "meals.json")]
    catalog: PathBuf,

    /// Per-slot targets to evaluate (comma-separated); defaults to a built-in set
    #[arg(long)]
    targets: Option<String>,

    /// Extra random targets drawn between 100 and 1000 kcal
    #[arg(long, default_value = "0")]
    random_targets: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Output CSV file for all results
    #[arg(long, default_value = "sweep_results.csv")]
    csv: PathBuf,

    /// Settings file to write the best cell into
    #[arg(long)]
    best: Option<PathBuf>,

    /// Number of top results to display
    #[arg(long, default_value = "5")]
    topk: usize,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_targets(s: &str) -> Vec<f64> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .filter(|t: &f64| t.is_finite() && *t > 0.0)
        .collect()
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let catalog = load_catalog(&args.catalog)?;
    println!(
        "Loaded {} dishes across {} regions from {:?}",
        catalog.len(),
        catalog.regions().len(),
        args.catalog
    );

    let mut config = SweepConfig {
        random_targets: args.random_targets,
        seed: args.seed,
        ..Default::default()
    };
    if let Some(raw) = &args.targets {
        config.targets = parse_targets(raw);
        if config.targets.is_empty() && config.random_targets == 0 {
            return Err(MealError::InvalidInput("no valid targets provided".to_string()));
        }
    }

    let results = run_sweep(&config, &catalog)?;
    print_topk(&results, args.topk);

    write_csv(&results, &args.csv)?;
    println!("Wrote all results to {:?}", args.csv);

    if let (Some(path), Some(best)) = (&args.best, results.first()) {
        write_best_settings(best, path)?;
        println!("Wrote best settings to {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!(parse_targets("300, 450,abc,-5,0"), vec![300.0, 450.0]);
        assert!(parse_targets("").is_empty());
    }
}
