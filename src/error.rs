use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemarkError {
    #[error("remark table error: {0}")]
    Table(#[from] serde_json::Error),
    #[error("remark table is empty")]
    EmptyTable,
    #[error("invalid sentiment '{0}', expected 'positive' or 'negative'")]
    InvalidSentiment(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RemarkError>;
