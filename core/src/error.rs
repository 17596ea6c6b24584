use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("Model artifact '{path}' failed to load: {reason}")]
    ArtifactLoad { path: String, reason: String },

    #[error("Customer not found: {account}")]
    NotFound { account: String },

    #[error("No matching account numbers")]
    NoMatches,

    #[error("Analytics unavailable: no snapshot has been computed")]
    AnalyticsUnavailable,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
