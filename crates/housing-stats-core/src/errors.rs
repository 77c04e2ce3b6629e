use thiserror::Error;

/// Errors that can occur while loading, fitting or summarizing a dataset
#[derive(Error, Debug)]
pub enum StatsError {
    // Dataset errors
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Malformed metadata line: {0:?}")]
    MalformedMetadata(String),

    // Configuration errors
    #[error("Column index {index} out of range ({n_features} features available)")]
    ColumnOutOfRange { index: usize, n_features: usize },

    #[error("Column {0} selected more than once")]
    DuplicateColumn(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // Input validation errors
    #[error("Insufficient data: {rows} rows, {cols} features (need rows > features + 1)")]
    InsufficientData { rows: usize, cols: usize },

    #[error("Dimension mismatch: y has {y_len} elements, X has {x_rows} rows")]
    DimensionMismatch { y_len: usize, x_rows: usize },

    #[error("Empty input: {field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Non-finite value in {field} at row {row}")]
    NonFiniteValue { field: String, row: usize },

    // Internal errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("regress-rs error: {0}")]
    RegressError(String),
}

/// Result type for summary operations
pub type StatsResult<T> = Result<T, StatsError>;
