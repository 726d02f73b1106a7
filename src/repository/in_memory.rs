use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::{ReportRepository, RepositoryError};
use crate::models::{Report, Reward, Site};

const BUILTIN_FIXTURES: &str = include_str!("../../fixtures/dashboard.json");

/// Seed data for the in-memory repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl Fixtures {
    pub fn builtin() -> Result<Self, RepositoryError> {
        Self::parse(BUILTIN_FIXTURES)
    }

    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, RepositoryError> {
        let fixtures: Fixtures = serde_json::from_str(content)?;
        fixtures.check()?;
        Ok(fixtures)
    }

    fn check(&self) -> Result<(), RepositoryError> {
        ensure_unique("site", self.sites.iter().map(|s| s.id.as_str()))?;
        ensure_unique("report", self.reports.iter().map(|r| r.id.as_str()))?;
        ensure_unique("reward", self.rewards.iter().map(|r| r.id.as_str()))?;

        if let Some(reward) = self.rewards.iter().find(|r| r.amount == 0) {
            return Err(RepositoryError::InvalidInput(format!(
                "reward {} has a zero amount",
                reward.id
            )));
        }
        Ok(())
    }
}

fn ensure_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), RepositoryError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RepositoryError::Duplicate(format!("{} {}", kind, id)));
        }
    }
    Ok(())
}

/// Read-only repository over a fixture set held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    sites: Vec<Site>,
    reports: Vec<Report>,
    rewards: Vec<Reward>,
}

impl InMemoryRepository {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            sites: fixtures.sites,
            reports: fixtures.reports,
            rewards: fixtures.rewards,
        }
    }

    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports,
            ..Self::default()
        }
    }
}

impl ReportRepository for InMemoryRepository {
    fn sites(&self) -> Result<Vec<Site>, RepositoryError> {
        Ok(self.sites.clone())
    }

    fn reports(&self) -> Result<Vec<Report>, RepositoryError> {
        Ok(self.reports.clone())
    }

    fn find_report(&self, id: &str) -> Result<Option<Report>, RepositoryError> {
        Ok(self.reports.iter().find(|r| r.id == id).cloned())
    }

    fn rewards(&self) -> Result<Vec<Reward>, RepositoryError> {
        Ok(self.rewards.clone())
    }

    fn find_reward(&self, id: &str) -> Result<Option<Reward>, RepositoryError> {
        Ok(self.rewards.iter().find(|r| r.id == id).cloned())
    }
}

#[cfg(test)]
#[path = "in_memory_test.rs"]
mod tests;
