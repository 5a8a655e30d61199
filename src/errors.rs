use thiserror::Error;

/// Error type that captures catalog, ledger, and ingestion failures.
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("{table} table is missing required columns: {}", .missing.join(", "))]
    Schema {
        table: &'static str,
        missing: Vec<String>,
    },
    #[error("Area not found: {0}")]
    AreaNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Item not found: {category} / {item}")]
    ItemNotFound { category: String, item: String },
    #[error("Item `{item}` is already committed for area `{area}`")]
    ItemCompleted { area: String, item: String },
    #[error("No committed entry for item `{item}` in area `{area}`")]
    EntryNotFound { area: String, item: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

impl From<std::io::Error> for EstimatorError {
    fn from(err: std::io::Error) -> Self {
        EstimatorError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for EstimatorError {
    fn from(err: serde_json::Error) -> Self {
        EstimatorError::Storage(err.to_string())
    }
}
