use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Fixture file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fixture parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Invalid fixture data: {0}")]
    InvalidInput(String),
}
