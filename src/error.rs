use thiserror::Error;

#[derive(Error, Debug)]
pub enum TendieError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No row at position {0}")]
    NoSuchRow(usize),

    #[error("Remove is disabled: select a row and keep at least one")]
    RemoveDisabled,

    #[error("Bad field name: {0}")]
    BadFieldName(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid {name}: {reason}")]
    InvalidField { name: String, reason: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown payer: {0}")]
    UnknownPayer(String),

    #[error("Rows must be numbered 1..{expected}, found {found}")]
    NonContiguous { expected: usize, found: usize },

    #[error("{0}")]
    Budget(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TendieError>;
