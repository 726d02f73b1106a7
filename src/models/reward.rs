use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewardStatus {
    Completed,
    InProgress,
    Pending,
}

impl RewardStatus {
    pub fn code(&self) -> &'static str {
        match self {
            RewardStatus::Completed => "completed",
            RewardStatus::InProgress => "inProgress",
            RewardStatus::Pending => "pending",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            RewardStatus::Completed => "reward-status-completed",
            RewardStatus::InProgress => "reward-status-in-progress",
            RewardStatus::Pending => "reward-status-pending",
        }
    }
}

impl Display for RewardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for RewardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" | "완료" => Ok(RewardStatus::Completed),
            "inprogress" | "in-progress" | "in_progress" | "진행중" => {
                Ok(RewardStatus::InProgress)
            }
            "pending" | "대기중" => Ok(RewardStatus::Pending),
            _ => Err(format!("Unknown reward status: {}", s)),
        }
    }
}

/// Points paid out to a reporter for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub report_id: String,
    pub report_title: String,
    pub site_id: String,
    pub site_name: String,
    pub user_id: String,
    pub amount: u64,
    pub status: RewardStatus,
    pub date: Date,
}
