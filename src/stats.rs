use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Report, ReportStatus, SiteScope};

/// Report counts per status for one site scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub total: usize,
}

impl StatusSummary {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a Report>) -> Self {
        reports
            .into_iter()
            .fold(Self::default(), |mut summary, report| {
                match report.status {
                    ReportStatus::Completed => summary.completed += 1,
                    ReportStatus::InProgress => summary.in_progress += 1,
                    ReportStatus::Pending => summary.pending += 1,
                }
                summary.total += 1;
                summary
            })
    }

    pub fn count(&self, status: ReportStatus) -> usize {
        match status {
            ReportStatus::Completed => self.completed,
            ReportStatus::InProgress => self.in_progress,
            ReportStatus::Pending => self.pending,
        }
    }
}

/// Incidents filed per calendar month, keyed by `(year, month)`.
pub fn monthly_incidents<'a>(
    reports: impl IntoIterator<Item = &'a Report>,
) -> BTreeMap<(i32, u8), usize> {
    let mut monthly = BTreeMap::new();
    for report in reports {
        let key = (report.date.year(), u8::from(report.date.month()));
        *monthly.entry(key).or_insert(0) += 1;
    }
    monthly
}

pub fn in_scope<'a>(reports: &'a [Report], scope: &'a SiteScope) -> impl Iterator<Item = &'a Report> {
    reports.iter().filter(move |r| scope.contains(&r.site_id))
}
