use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MealError, Result};
use crate::models::SlotSplit;
use crate::planner::constants::{DEFAULT_MAX_QUANTITY, DEFAULT_TOLERANCE, SUGGESTIONS_PER_SLOT};
use crate::planner::FinderConfig;

/// Tunable suggestion settings, loaded from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tolerance: f64,
    pub max_quantity: u32,
    pub suggestions_per_slot: usize,
    pub slot_split: SlotSplit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_quantity: DEFAULT_MAX_QUANTITY,
            suggestions_per_slot: SUGGESTIONS_PER_SLOT,
            slot_split: SlotSplit::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, tolerance: Option<f64>, max_quantity: Option<u32>) -> Result<Self> {
        if let Some(tolerance) = tolerance {
            self.tolerance = tolerance;
        }
        if let Some(max_quantity) = max_quantity {
            self.max_quantity = max_quantity;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::new(self.tolerance, self.max_quantity)
    }

    pub fn validate(&self) -> Result<()> {
        self.finder_config().validate()?;
        if self.suggestions_per_slot == 0 {
            return Err(MealError::InvalidInput(
                "suggestions_per_slot must be at least 1".to_string(),
            ));
        }
        if !self.slot_split.is_valid() {
            return Err(MealError::InvalidInput(
                "slot fractions must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"tolerance": 0.2, "slot_split": {"snacks": 0.05}}"#)
            .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert!((settings.tolerance - 0.2).abs() < 1e-9);
        assert_eq!(settings.max_quantity, DEFAULT_MAX_QUANTITY);
        assert!((settings.slot_split.snacks - 0.05).abs() < 1e-9);
        assert!((settings.slot_split.lunch - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"tolerance": 1.5}"#).unwrap();
        assert!(matches!(
            Settings::load(file.path()),
            Err(MealError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().with_overrides(Some(0.1), Some(3)).unwrap();
        assert_eq!(settings.finder_config(), FinderConfig::new(0.1, 3));
        assert!(Settings::default().with_overrides(None, Some(0)).is_err());
    }
}
