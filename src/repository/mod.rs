mod error;
mod in_memory;

use crate::models::{Report, Reward, Site};

pub use error::RepositoryError;
pub use in_memory::{Fixtures, InMemoryRepository};

/// Data access for the dashboard listings.
pub trait ReportRepository: Send + Sync {
    fn sites(&self) -> Result<Vec<Site>, RepositoryError>;

    fn reports(&self) -> Result<Vec<Report>, RepositoryError>;

    fn find_report(&self, id: &str) -> Result<Option<Report>, RepositoryError>;

    fn rewards(&self) -> Result<Vec<Reward>, RepositoryError>;

    fn find_reward(&self, id: &str) -> Result<Option<Reward>, RepositoryError>;
}
