use serde::Serialize;

use crate::models::{Message, Report, ReportStatus};

/// View-state of one open report. Lives only as long as the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub(super) report_id: String,
    pub(super) status: ReportStatus,
    pub(super) decided_reward: Option<u64>,
    pub(super) messages: Vec<Message>,
}

impl ConversationState {
    pub(super) fn new(report: &Report) -> Self {
        Self {
            report_id: report.id.clone(),
            status: report.status,
            decided_reward: None,
            messages: Vec::new(),
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn decided_reward(&self) -> Option<u64> {
        self.decided_reward
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Gets told about every change to a conversation, after it happened.
pub trait ConversationObserver {
    fn conversation_changed(&self, state: &ConversationState, appended: &Message);
}

impl<F> ConversationObserver for F
where
    F: Fn(&ConversationState, &Message),
{
    fn conversation_changed(&self, state: &ConversationState, appended: &Message) {
        self(state, appended)
    }
}
