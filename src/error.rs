use thiserror::Error;

use crate::models::ReportStatus;
use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Media storage error: {0}")]
    Media(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Status transition not allowed: {from} -> {to}")]
    TransitionNotAllowed {
        from: ReportStatus,
        to: ReportStatus,
    },
}

impl AppError {
    /// Input was refused and nothing changed
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::TransitionNotAllowed { .. }
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
