use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("Invalid calorie target: {0} (must be positive and finite)")]
    InvalidTarget(f64),

    #[error("Invalid tolerance: {0} (must be in [0, 1))")]
    InvalidTolerance(f64),

    #[error("Invalid max quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MealError>;
