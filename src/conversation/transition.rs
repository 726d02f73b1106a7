use std::collections::HashSet;

use crate::models::ReportStatus;

/// Allowed `(from, to)` status changes. Staying in the same status is always allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    allowed: HashSet<(ReportStatus, ReportStatus)>,
}

impl TransitionTable {
    /// Every status may move to every other status
    pub fn unrestricted() -> Self {
        let statuses = ReportStatus::all();
        let allowed = statuses
            .iter()
            .flat_map(|from| statuses.iter().map(move |to| (*from, *to)))
            .collect();
        Self { allowed }
    }

    /// A completed report stays completed
    pub fn no_reopen() -> Self {
        let mut table = Self::unrestricted();
        table
            .allowed
            .retain(|(from, to)| *from != ReportStatus::Completed || *to == ReportStatus::Completed);
        table
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (ReportStatus, ReportStatus)>) -> Self {
        Self {
            allowed: pairs.into_iter().collect(),
        }
    }

    pub fn allows(&self, from: ReportStatus, to: ReportStatus) -> bool {
        from == to || self.allowed.contains(&(from, to))
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::unrestricted()
    }
}
