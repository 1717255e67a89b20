use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::sweep::grid::SweepResult;

fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all results to a CSV file, best first.
pub fn write_csv(results: &[SweepResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "tolerance",
        "max_quantity",
        "cases",
        "match_rate",
        "degraded_rate",
        "empty_rate",
        "avg_candidates",
        "avg_relative_error",
    ])?;

    for (i, result) in results.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            format!("{:.2}", result.config.tolerance),
            result.config.max_quantity.to_string(),
            result.cases.to_string(),
            format!("{:.3}", result.match_rate()),
            format!("{:.3}", result.degraded_rate()),
            format!("{:.3}", result.empty_rate()),
            format!("{:.2}", result.avg_candidates),
            format!("{:.4}", result.avg_relative_error),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the best cell as a settings file the main binary can load.
pub fn write_best_settings(best: &SweepResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "tolerance": truncate(best.config.tolerance, 3),
        "max_quantity": best.config.max_quantity,
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print top-k results to stdout.
pub fn print_topk(results: &[SweepResult], k: usize) {
    println!("\n=== Top {} Settings (by match rate) ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: tolerance={:.2} max_quantity={}",
            i + 1,
            result.config.tolerance,
            result.config.max_quantity
        );
        println!(
            "    matched={:.1}% degraded={:.1}% empty={:.1}% candidates={:.1} error={:.2}%",
            result.match_rate() * 100.0,
            result.degraded_rate() * 100.0,
            result.empty_rate() * 100.0,
            result.avg_candidates,
            result.avg_relative_error * 100.0
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::FinderConfig;
    use crate::settings::Settings;
    use tempfile::NamedTempFile;

    fn result(tolerance: f64, matched: usize) -> SweepResult {
        SweepResult {
            config: FinderConfig::new(tolerance, 2),
            cases: 4,
            matched,
            degraded: 4 - matched,
            empty: 0,
            avg_candidates: 3.5,
            avg_relative_error: 0.0412,
        }
    }

    #[test]
    fn test_write_csv() {
        let file = NamedTempFile::new().unwrap();
        write_csv(&[result(0.15, 3), result(0.05, 1)], file.path()).unwrap();

        let mut rdr = csv::Reader::from_path(file.path()).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[1], "tolerance");

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][1], "0.15");
        assert_eq!(&rows[0][4], "0.750");
        assert_eq!(&rows[1][4], "0.250");
    }

    #[test]
    fn test_best_settings_loadable() {
        let file = NamedTempFile::new().unwrap();
        write_best_settings(&result(0.2, 4), file.path()).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert!((settings.tolerance - 0.2).abs() < 1e-9);
        assert_eq!(settings.max_quantity, 2);
    }
}
