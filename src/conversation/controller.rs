use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use validator::Validate;

use super::{Clock, ConversationObserver, ConversationState, TransitionTable};
use crate::error::{AppError, AppResult};
use crate::fluent_args;
use crate::i18n::{I18n, SupportedLanguage};
use crate::media::{MediaStore, MediaUpload};
use crate::models::{Author, MediaAttachment, MediaRef, Message, Report, ReportStatus};

/// Capabilities a conversation borrows from its surroundings.
#[derive(Clone)]
pub struct ConversationContext {
    pub i18n: I18n,
    pub clock: Arc<dyn Clock>,
    pub media: Arc<dyn MediaStore>,
    pub transitions: TransitionTable,
}

#[derive(Debug, Validate)]
struct TextInput {
    #[validate(length(min = 1, message = "message text is empty"))]
    text: String,
}

#[derive(Debug, Validate)]
struct MediaInput {
    #[validate(length(min = 1, message = "media url is empty"))]
    url: String,
}

#[derive(Debug, Validate)]
struct RewardInput {
    #[validate(range(min = 1, message = "reward amount must be a positive integer"))]
    amount: i64,
}

/// Chat log, status and reward decision for one report.
///
/// Every successful mutation appends exactly one message and then notifies the
/// subscribed observers. Rejected input returns an error and leaves the state as it was.
pub struct ReportConversation {
    report: Report,
    state: ConversationState,
    i18n: I18n,
    clock: Arc<dyn Clock>,
    media: Arc<dyn MediaStore>,
    transitions: TransitionTable,
    observers: Vec<Box<dyn ConversationObserver>>,
}

impl ReportConversation {
    /// Open the conversation with the opener, the reporter's description and any
    /// attachments filed with the report. Seed messages carry the filing date.
    pub fn initialize(report: Report, ctx: ConversationContext) -> Self {
        let filed_at = report.date.midnight().assume_utc();
        let state = ConversationState::new(&report);

        let mut conversation = Self {
            report,
            state,
            i18n: ctx.i18n,
            clock: ctx.clock,
            media: ctx.media,
            transitions: ctx.transitions,
            observers: Vec::new(),
        };

        let opener = conversation.i18n.get_with_args(
            "conversation-started",
            &fluent_args! { "report_id" => conversation.report.id.clone() },
        );
        let reporter = conversation.i18n.get("reporter-default-name");
        let description = if conversation.report.description.trim().is_empty() {
            conversation.i18n.get("description-missing")
        } else {
            conversation.report.description.clone()
        };

        conversation.append(Author::System, None, Some(opener), None, filed_at);
        conversation.append(
            Author::Reporter,
            Some(reporter.clone()),
            Some(description),
            None,
            filed_at,
        );
        for media in conversation.report.attachments.clone() {
            conversation.append(
                Author::Reporter,
                Some(reporter.clone()),
                None,
                Some(media.into()),
                filed_at,
            );
        }

        info!(
            report_id = %conversation.report.id,
            status = %conversation.state.status,
            seeded = conversation.state.messages.len(),
            "Opened report conversation"
        );
        conversation
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn status(&self) -> ReportStatus {
        self.state.status
    }

    pub fn decided_reward(&self) -> Option<u64> {
        self.state.decided_reward
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn language(&self) -> SupportedLanguage {
        self.i18n.language()
    }

    /// System messages appended from now on use this language
    pub fn set_language(&mut self, language: SupportedLanguage) {
        self.i18n.set_language(language);
    }

    pub fn subscribe(&mut self, observer: impl ConversationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn post_text(
        &mut self,
        author: Author,
        name: Option<&str>,
        text: &str,
    ) -> AppResult<&Message> {
        let input = TextInput {
            text: text.trim().to_string(),
        };
        if let Err(errors) = input.validate() {
            warn!(report_id = %self.report.id, %author, "Ignoring empty message");
            return Err(errors.into());
        }

        let at = self.clock.now();
        Ok(self.append(author, clean_name(name), Some(input.text), None, at))
    }

    pub fn post_media(
        &mut self,
        author: Author,
        name: Option<&str>,
        media: MediaRef,
    ) -> AppResult<&Message> {
        let input = MediaInput {
            url: media.url.trim().to_string(),
        };
        if let Err(errors) = input.validate() {
            warn!(report_id = %self.report.id, %author, "Ignoring media message without url");
            return Err(errors.into());
        }

        let attachment = MediaAttachment::from(MediaRef::new(input.url, media.content_type));
        let at = self.clock.now();
        Ok(self.append(author, clean_name(name), None, Some(attachment), at))
    }

    /// Store the upload through the media store, then post the stored reference
    pub fn upload_media(
        &mut self,
        author: Author,
        name: Option<&str>,
        upload: MediaUpload,
    ) -> AppResult<&Message> {
        let media = self.media.store(upload)?;
        self.post_media(author, name, media)
    }

    pub fn change_status(&mut self, new_status: ReportStatus) -> AppResult<&Message> {
        let from = self.state.status;
        if !self.transitions.allows(from, new_status) {
            warn!(
                report_id = %self.report.id,
                %from,
                to = %new_status,
                "Status transition rejected"
            );
            return Err(AppError::TransitionNotAllowed {
                from,
                to: new_status,
            });
        }

        self.state.status = new_status;
        let label = self.i18n.get(new_status.label_key());
        let text = self
            .i18n
            .get_with_args("status-changed", &fluent_args! { "status" => label });

        info!(report_id = %self.report.id, %from, to = %new_status, "Report status changed");
        let at = self.clock.now();
        Ok(self.append(Author::System, None, Some(text), None, at))
    }

    pub fn decide_reward(&mut self, amount: i64) -> AppResult<&Message> {
        let input = RewardInput { amount };
        if let Err(errors) = input.validate() {
            warn!(report_id = %self.report.id, amount, "Ignoring non-positive reward");
            return Err(errors.into());
        }
        let amount = u64::try_from(input.amount)
            .map_err(|e| AppError::Validation(format!("reward amount: {}", e)))?;

        let previous = self.state.decided_reward.replace(amount);
        let text = match previous {
            None => self
                .i18n
                .get_with_args("reward-granted", &fluent_args! { "amount" => amount }),
            Some(previous) => self.i18n.get_with_args(
                "reward-changed",
                &fluent_args! { "previous" => previous, "amount" => amount },
            ),
        };

        info!(report_id = %self.report.id, ?previous, amount, "Reward decided");
        let at = self.clock.now();
        Ok(self.append(Author::System, None, Some(text), None, at))
    }

    fn append(
        &mut self,
        author: Author,
        name: Option<String>,
        text: Option<String>,
        media: Option<MediaAttachment>,
        at: OffsetDateTime,
    ) -> &Message {
        // never earlier than the previous entry
        let created_at = match self.state.messages.last() {
            Some(last) if last.created_at > at => last.created_at,
            _ => at,
        };
        let position = self.state.messages.len();
        let message = Message {
            id: format!("{}-{}", author.id_prefix(), position),
            author,
            name,
            text,
            created_at,
            media,
        };

        debug!(report_id = %self.report.id, message_id = %message.id, %author, "Appended message");
        self.state.messages.push(message);

        let appended = &self.state.messages[position];
        for observer in &self.observers {
            observer.conversation_changed(&self.state, appended);
        }
        appended
    }
}

fn clean_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
