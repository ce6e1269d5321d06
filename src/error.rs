use thiserror::Error;

#[derive(Debug, Error)]
pub enum CraftError {
    #[error("{what} {value} is outside of [{min}, {max}]")]
    Range {
        what: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Recipe not found: {0}")]
    UnknownRecipe(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CraftError {
    /// Shorthand for a fatal configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CraftError::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CraftError>;
