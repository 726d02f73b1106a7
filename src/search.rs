use time::Date;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Report, ReportStatus, Reward, RewardStatus, SiteScope};

/// Listing filter for reports.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub site: SiteScope,
    pub query: Option<String>,
    pub status: Option<ReportStatus>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.site.contains(&report.site_id)
            && self.status.map_or(true, |status| report.status == status)
            && in_range(report.date, self.from, self.to)
            && matches_query(
                self.query.as_deref(),
                &[
                    report.site_name.as_str(),
                    report.report_type.as_str(),
                    report.location.as_str(),
                    report.description.as_str(),
                ],
            )
    }

    pub fn apply<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Listing filter for rewards.
#[derive(Debug, Clone, Default)]
pub struct RewardFilter {
    pub site: SiteScope,
    pub query: Option<String>,
    pub status: Option<RewardStatus>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl RewardFilter {
    /// `status_label` renders the status the way the viewer reads it, so a search for
    /// the displayed label finds the reward.
    pub fn matches<F>(&self, reward: &Reward, status_label: F) -> bool
    where
        F: Fn(RewardStatus) -> String,
    {
        if !self.site.contains(&reward.site_id)
            || !self.status.map_or(true, |status| reward.status == status)
            || !in_range(reward.date, self.from, self.to)
        {
            return false;
        }

        let amount = reward.amount.to_string();
        let label = status_label(reward.status);
        let date = reward.date.to_string();
        matches_query(
            self.query.as_deref(),
            &[
                reward.site_name.as_str(),
                reward.report_title.as_str(),
                reward.user_id.as_str(),
                amount.as_str(),
                label.as_str(),
                date.as_str(),
            ],
        )
    }

    pub fn apply<'a, F>(&self, rewards: &'a [Reward], status_label: F) -> Vec<&'a Reward>
    where
        F: Fn(RewardStatus) -> String,
    {
        rewards
            .iter()
            .filter(|r| self.matches(r, &status_label))
            .collect()
    }
}

fn in_range(date: Date, from: Option<Date>, to: Option<Date>) -> bool {
    from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
}

/// Composed and decomposed Hangul compare equal after this.
fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

fn matches_query(query: Option<&str>, fields: &[&str]) -> bool {
    let needle = match query.map(|q| fold(q.trim())) {
        Some(needle) if !needle.is_empty() => needle,
        _ => return true,
    };
    let haystack = fields
        .iter()
        .map(|f| fold(f))
        .collect::<Vec<_>>()
        .join(" ");
    haystack.contains(&needle)
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
