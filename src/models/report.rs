use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use time::Date;

use super::MediaRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportStatus {
    Completed,
    InProgress,
    Pending,
}

impl ReportStatus {
    pub fn all() -> &'static [ReportStatus] {
        &[
            ReportStatus::Pending,
            ReportStatus::InProgress,
            ReportStatus::Completed,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReportStatus::Completed => "completed",
            ReportStatus::InProgress => "inProgress",
            ReportStatus::Pending => "pending",
        }
    }

    /// Fluent message id of the human-readable label
    pub fn label_key(&self) -> &'static str {
        match self {
            ReportStatus::Completed => "report-status-completed",
            ReportStatus::InProgress => "report-status-in-progress",
            ReportStatus::Pending => "report-status-pending",
        }
    }
}

impl Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" | "done" | "완료" => Ok(ReportStatus::Completed),
            "inprogress" | "in-progress" | "in_progress" | "진행중" => {
                Ok(ReportStatus::InProgress)
            }
            "pending" | "대기" | "대기중" => Ok(ReportStatus::Pending),
            _ => Err(format!("Unknown report status: {}", s)),
        }
    }
}

/// A filed safety observation. Supplied by the repository and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub site_name: String,
    pub site_id: String,
    pub location: String,
    pub date: Date,
    pub status: ReportStatus,
    #[serde(rename = "type")]
    pub report_type: String,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<MediaRef>,
}
