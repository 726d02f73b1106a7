use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Config;
use crate::conversation::{
    Clock, ConversationContext, ReportConversation, SystemClock, TransitionTable,
};
use crate::error::{AppError, AppResult};
use crate::i18n::{I18n, Localizer, SupportedLanguage};
use crate::media::MediaStore;
use crate::models::{Report, Reward, Site, SiteScope};
use crate::repository::ReportRepository;
use crate::search::{ReportFilter, RewardFilter};
use crate::stats::{self, StatusSummary};

/// Shared capabilities of the report desk.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ReportRepository>,
    pub media: Arc<dyn MediaStore>,
    pub localizer: Arc<Localizer>,
    pub clock: Arc<dyn Clock>,
    pub language: SupportedLanguage,
    pub manager_name: String,
    pub transitions: TransitionTable,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        media: Arc<dyn MediaStore>,
        localizer: Arc<Localizer>,
    ) -> Self {
        let language = localizer.default_language();
        let manager_name = localizer.get_string_for_language(&language, "manager-default-name");
        Self {
            repository,
            media,
            localizer,
            clock: Arc::new(SystemClock),
            language,
            manager_name,
            transitions: TransitionTable::default(),
        }
    }

    /// Apply the conversation settings from the configuration
    pub fn configured(mut self, config: &Config) -> Self {
        if let Some(name) = &config.conversation.manager_name {
            self.manager_name = name.clone();
        }
        if !config.conversation.reopen_allowed {
            self.transitions = TransitionTable::no_reopen();
        }
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_transitions(mut self, transitions: TransitionTable) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn i18n(&self) -> I18n {
        I18n::new(self.localizer.clone(), self.language)
    }

    pub fn conversation_context(&self) -> ConversationContext {
        ConversationContext {
            i18n: self.i18n(),
            clock: self.clock.clone(),
            media: self.media.clone(),
            transitions: self.transitions.clone(),
        }
    }

    /// Look up a report within the selected site and open its conversation. A report
    /// filed under another site is not found.
    pub fn open_conversation(
        &self,
        scope: &SiteScope,
        report_id: &str,
    ) -> AppResult<ReportConversation> {
        let report = self
            .repository
            .find_report(report_id)?
            .filter(|report| scope.contains(&report.site_id))
            .ok_or_else(|| AppError::NotFound(format!("report {} in {}", report_id, scope)))?;
        Ok(ReportConversation::initialize(report, self.conversation_context()))
    }

    pub fn sites(&self) -> AppResult<Vec<Site>> {
        Ok(self.repository.sites()?)
    }

    pub fn search_reports(&self, filter: &ReportFilter) -> AppResult<Vec<Report>> {
        let reports = self.repository.reports()?;
        let found: Vec<Report> = filter.apply(&reports).into_iter().cloned().collect();
        tracing::debug!(matched = found.len(), total = reports.len(), "Searched reports");
        Ok(found)
    }

    pub fn search_rewards(&self, filter: &RewardFilter) -> AppResult<Vec<Reward>> {
        let rewards = self.repository.rewards()?;
        let i18n = self.i18n();
        let found: Vec<Reward> = filter
            .apply(&rewards, |status| i18n.get(status.label_key()))
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(matched = found.len(), total = rewards.len(), "Searched rewards");
        Ok(found)
    }

    pub fn find_reward(&self, reward_id: &str) -> AppResult<Reward> {
        self.repository
            .find_reward(reward_id)?
            .ok_or_else(|| AppError::NotFound(format!("reward {}", reward_id)))
    }

    pub fn report_summary(&self, scope: &SiteScope) -> AppResult<StatusSummary> {
        let reports = self.repository.reports()?;
        Ok(StatusSummary::from_reports(stats::in_scope(&reports, scope)))
    }

    pub fn monthly_incidents(&self, scope: &SiteScope) -> AppResult<BTreeMap<(i32, u8), usize>> {
        let reports = self.repository.reports()?;
        Ok(stats::monthly_incidents(stats::in_scope(&reports, scope)))
    }
}
