use super::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use time::macros::{date, datetime};
use time::Duration;

use crate::conversation::ManualClock;
use crate::i18n::Localizer;
use crate::media::InMemoryMediaStore;
use crate::models::MediaKind;

fn report(id: &str, description: &str) -> Report {
    Report {
        id: id.to_string(),
        site_name: "민이앤아이 1 현장".to_string(),
        site_id: "site1".to_string(),
        location: "다운타운 메인가 123번지".to_string(),
        date: date!(2025 - 08 - 28),
        status: ReportStatus::Pending,
        report_type: "낙하물 위험".to_string(),
        description: description.to_string(),
        attachments: Vec::new(),
    }
}

fn context_with(clock: Arc<ManualClock>, transitions: TransitionTable) -> ConversationContext {
    let localizer = Arc::new(Localizer::embedded(SupportedLanguage::Korean).unwrap());
    ConversationContext {
        i18n: I18n::new(localizer, SupportedLanguage::Korean),
        clock,
        media: Arc::new(InMemoryMediaStore::new()),
        transitions,
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(datetime!(2025-09-01 09:00 UTC)))
}

fn open(description: &str) -> ReportConversation {
    ReportConversation::initialize(
        report("1", description),
        context_with(clock(), TransitionTable::unrestricted()),
    )
}

#[test]
fn initialize_seeds_opener_and_description() {
    let conversation = open("안전망 미설치");
    let messages = conversation.messages();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].author, Author::System);
    assert_eq!(messages[0].text.as_deref(), Some("제보 #1 채팅이 시작되었습니다."));
    assert_eq!(messages[1].author, Author::Reporter);
    assert_eq!(messages[1].name.as_deref(), Some("제보자"));
    assert_eq!(messages[1].text.as_deref(), Some("안전망 미설치"));

    assert_eq!(conversation.status(), ReportStatus::Pending);
    assert_eq!(conversation.decided_reward(), None);
    assert_eq!(conversation.state().report_id(), "1");
}

#[test]
fn seed_messages_carry_the_filing_date() {
    let conversation = open("안전망 미설치");
    for message in conversation.messages() {
        assert_eq!(message.created_at, datetime!(2025-08-28 00:00 UTC));
    }
}

#[test]
fn blank_description_uses_placeholder() {
    let conversation = open("   ");
    assert_eq!(conversation.messages()[1].text.as_deref(), Some("설명이 없습니다."));
}

#[test]
fn attachments_are_seeded_as_reporter_media() {
    let mut filed = report("7", "통로 확보 필요");
    filed.attachments = vec![
        MediaRef::new("https://cdn.example/clip", "video/mp4"),
        MediaRef::new("https://cdn.example/photo.jpg", "image/jpeg"),
    ];
    let conversation =
        ReportConversation::initialize(filed, context_with(clock(), TransitionTable::default()));
    let messages = conversation.messages();

    assert_eq!(messages.len(), 4);
    let video = messages[2].media.as_ref().unwrap();
    assert_eq!(video.kind, MediaKind::Video);
    assert_eq!(video.url, "https://cdn.example/clip");
    assert_eq!(messages[3].media.as_ref().unwrap().kind, MediaKind::Image);
    assert!(messages[2].text.is_none());
    assert_eq!(messages[3].author, Author::Reporter);
}

#[test]
fn whitespace_text_is_rejected_without_appending() {
    let mut conversation = open("안전망 미설치");
    for text in ["", " ", "\t", "\n  \r\n", "\u{3000}"] {
        let result = conversation.post_text(Author::Manager, Some("담당자"), text);
        assert!(matches!(result, Err(AppError::Validation(_))), "{:?}", text);
    }
    assert_eq!(conversation.messages().len(), 2);
}

#[test]
fn post_text_trims_and_stamps_current_time() {
    let clock = clock();
    let mut conversation = ReportConversation::initialize(
        report("1", "안전망 미설치"),
        context_with(clock.clone(), TransitionTable::default()),
    );
    clock.advance(Duration::minutes(5));

    let message = conversation
        .post_text(Author::Manager, Some(" 담당자 "), "  확인했습니다  ")
        .unwrap();

    assert_eq!(message.author, Author::Manager);
    assert_eq!(message.name.as_deref(), Some("담당자"));
    assert_eq!(message.text.as_deref(), Some("확인했습니다"));
    assert_eq!(message.created_at, datetime!(2025-09-01 09:05 UTC));
    assert!(message.media.is_none());
}

#[test]
fn post_media_derives_kind_from_content_type() {
    let mut conversation = open("안전망 미설치");

    let video = conversation
        .post_media(Author::Manager, None, MediaRef::new("media://a", "video/quicktime"))
        .unwrap();
    assert_eq!(video.media.as_ref().unwrap().kind, MediaKind::Video);
    assert!(video.text.is_none());

    let other = conversation
        .post_media(Author::Manager, None, MediaRef::new("media://b", "application/pdf"))
        .unwrap();
    assert_eq!(other.media.as_ref().unwrap().kind, MediaKind::Image);

    assert_eq!(conversation.messages().len(), 4);
}

#[test]
fn post_media_without_url_is_rejected() {
    let mut conversation = open("안전망 미설치");
    let result = conversation.post_media(Author::Manager, None, MediaRef::new("  ", "image/png"));
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(conversation.messages().len(), 2);
}

#[test]
fn upload_media_goes_through_the_store() {
    let mut conversation = open("안전망 미설치");
    let message = conversation
        .upload_media(
            Author::Manager,
            Some("담당자"),
            MediaUpload {
                file_name: "scaffold.mp4".to_string(),
                content_type: "video/mp4".to_string(),
                bytes: vec![1, 2, 3],
            },
        )
        .unwrap();

    let media = message.media.as_ref().unwrap();
    assert!(media.url.starts_with("media://"));
    assert_eq!(media.kind, MediaKind::Video);
}

#[test]
fn failed_upload_appends_nothing() {
    let mut conversation = open("안전망 미설치");
    let result = conversation.upload_media(
        Author::Manager,
        None,
        MediaUpload {
            file_name: "empty.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Vec::new(),
        },
    );
    assert!(result.is_err());
    assert_eq!(conversation.messages().len(), 2);
}

#[test]
fn change_status_always_appends_one_system_message() {
    let mut conversation = open("안전망 미설치");

    let message = conversation.change_status(ReportStatus::Completed).unwrap();
    assert_eq!(message.author, Author::System);
    assert_eq!(message.text.as_deref(), Some("상태가 완료로 변경되었습니다."));
    assert_eq!(conversation.status(), ReportStatus::Completed);

    // same status again still leaves a trace
    conversation.change_status(ReportStatus::Completed).unwrap();
    assert_eq!(conversation.messages().len(), 4);

    conversation.change_status(ReportStatus::Pending).unwrap();
    assert_eq!(conversation.status(), ReportStatus::Pending);
    assert_eq!(conversation.messages().len(), 5);
}

#[test]
fn no_reopen_table_rejects_leaving_completed() {
    let mut conversation = ReportConversation::initialize(
        report("1", "안전망 미설치"),
        context_with(clock(), TransitionTable::no_reopen()),
    );
    conversation.change_status(ReportStatus::Completed).unwrap();

    let result = conversation.change_status(ReportStatus::InProgress);
    assert!(matches!(
        result,
        Err(AppError::TransitionNotAllowed {
            from: ReportStatus::Completed,
            to: ReportStatus::InProgress
        })
    ));
    assert_eq!(conversation.status(), ReportStatus::Completed);
    assert_eq!(conversation.messages().len(), 3);
}

#[test]
fn first_reward_is_a_grant_and_later_ones_are_changes() {
    let mut conversation = open("안전망 미설치");

    let granted = conversation.decide_reward(100_000).unwrap();
    assert_eq!(
        granted.text.as_deref(),
        Some("포상금 100000 포인트 지급이 결정되었습니다.")
    );

    let changed = conversation.decide_reward(150_000).unwrap();
    assert_eq!(
        changed.text.as_deref(),
        Some("포상금이 100000 → 150000 포인트로 변경되었습니다.")
    );

    assert_eq!(conversation.decided_reward(), Some(150_000));
    assert_eq!(conversation.messages().len(), 4);
    assert!(conversation.messages()[2..].iter().all(Message::is_system));
}

#[test]
fn non_positive_rewards_are_rejected() {
    let mut conversation = open("안전망 미설치");
    for amount in [0, -5, i64::MIN] {
        let err = conversation.decide_reward(amount).unwrap_err();
        assert!(err.is_rejected_input());
    }
    assert_eq!(conversation.decided_reward(), None);
    assert_eq!(conversation.messages().len(), 2);

    conversation.decide_reward(70_000).unwrap();
    assert!(conversation.decide_reward(0).is_err());
    assert_eq!(conversation.decided_reward(), Some(70_000));
    assert_eq!(conversation.messages().len(), 3);
}

#[test]
fn timestamps_never_go_backwards() {
    let clock = clock();
    let mut conversation = ReportConversation::initialize(
        report("1", "안전망 미설치"),
        context_with(clock.clone(), TransitionTable::default()),
    );

    conversation.post_text(Author::Manager, None, "하나").unwrap();
    clock.set(datetime!(2020-01-01 00:00 UTC));
    conversation.post_text(Author::Reporter, None, "둘").unwrap();
    conversation.post_text(Author::Manager, None, "셋").unwrap();

    let messages = conversation.messages();
    for pair in messages.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }
}

#[test]
fn message_ids_are_unique() {
    let mut conversation = open("안전망 미설치");
    conversation.post_text(Author::Manager, None, "a").unwrap();
    conversation.change_status(ReportStatus::InProgress).unwrap();
    conversation.decide_reward(10).unwrap();
    conversation
        .post_media(Author::Reporter, None, MediaRef::new("media://x", "image/png"))
        .unwrap();

    let ids: HashSet<&str> = conversation.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids.len(), conversation.messages().len());
}

#[test]
fn observers_see_each_successful_mutation() {
    let mut conversation = open("안전망 미설치");
    let seen: Rc<RefCell<Vec<(String, usize)>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = seen.clone();
    conversation.subscribe(move |state: &ConversationState, appended: &Message| {
        assert_eq!(state.last_message(), Some(appended));
        sink.borrow_mut()
            .push((appended.id.clone(), state.messages().len()));
    });

    conversation.post_text(Author::Manager, None, "확인").unwrap();
    assert!(conversation.post_text(Author::Manager, None, " ").is_err());
    assert!(conversation.decide_reward(-1).is_err());
    conversation.change_status(ReportStatus::InProgress).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], ("mgr-2".to_string(), 3));
    assert_eq!(seen[1], ("sys-3".to_string(), 4));
}

#[test]
fn system_messages_follow_the_active_language() {
    let mut conversation = open("Missing guardrail");
    conversation.set_language(SupportedLanguage::English);
    assert_eq!(conversation.language(), SupportedLanguage::English);

    let status = conversation.change_status(ReportStatus::InProgress).unwrap();
    assert_eq!(status.text.as_deref(), Some("Status changed to In progress."));

    let reward = conversation.decide_reward(5_000).unwrap();
    assert_eq!(
        reward.text.as_deref(),
        Some("A reward of 5000 points has been granted.")
    );

    // the opener was written in Korean before the switch
    assert_eq!(
        conversation.messages()[0].text.as_deref(),
        Some("제보 #1 채팅이 시작되었습니다.")
    );
}
