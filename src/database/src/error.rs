use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed player file: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("invalid negotiation settings: {0}")]
    Negotiation(#[from] engine::NegotiationError),
    #[error("player file has no header row")]
    MissingHeader,
    #[error("player file is missing column '{0}'")]
    MissingColumn(String),
    #[error("club '{0}' not found")]
    ClubNotFound(String),
}

pub type DataResult<T> = Result<T, DataError>;
