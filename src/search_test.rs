use super::*;
use time::macros::date;

use crate::repository::Fixtures;

fn reports() -> Vec<Report> {
    Fixtures::builtin().unwrap().reports
}

fn rewards() -> Vec<Reward> {
    Fixtures::builtin().unwrap().rewards
}

fn korean_label(status: RewardStatus) -> String {
    match status {
        RewardStatus::Completed => "완료",
        RewardStatus::InProgress => "진행중",
        RewardStatus::Pending => "대기중",
    }
    .to_string()
}

fn report_ids<'a>(found: Vec<&'a Report>) -> Vec<&'a str> {
    found.into_iter().map(|r| r.id.as_str()).collect()
}

fn reward_ids<'a>(found: Vec<&'a Reward>) -> Vec<&'a str> {
    found.into_iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn empty_filter_returns_everything() {
    let reports = reports();
    assert_eq!(ReportFilter::default().apply(&reports).len(), reports.len());
}

#[test]
fn site_scope_narrows_reports() {
    let reports = reports();
    let filter = ReportFilter {
        site: SiteScope::Site("site1".to_string()),
        ..ReportFilter::default()
    };
    let found = filter.apply(&reports);
    assert_eq!(report_ids(found), vec!["1", "6"]);
}

#[test]
fn query_matches_type_location_and_description_case_insensitively() {
    let mut reports = reports();
    reports[3].description = "Welding SPARKS near fuel".to_string();

    let by_type = ReportFilter {
        query: Some("  전기 ".to_string()),
        ..ReportFilter::default()
    };
    assert_eq!(report_ids(by_type.apply(&reports)), vec!["2"]);

    let by_description = ReportFilter {
        query: Some("sparks".to_string()),
        ..ReportFilter::default()
    };
    assert_eq!(report_ids(by_description.apply(&reports)), vec!["4"]);

    let by_location = ReportFilter {
        query: Some("중앙역".to_string()),
        ..ReportFilter::default()
    };
    assert_eq!(by_location.apply(&reports).len(), 1);

    let blank = ReportFilter {
        query: Some("   ".to_string()),
        ..ReportFilter::default()
    };
    assert_eq!(blank.apply(&reports).len(), reports.len());
}

#[test]
fn status_and_inclusive_date_range() {
    let reports = reports();
    let filter = ReportFilter {
        status: Some(ReportStatus::InProgress),
        from: Some(date!(2025 - 03 - 24)),
        to: Some(date!(2025 - 06 - 27)),
        ..ReportFilter::default()
    };
    assert_eq!(report_ids(filter.apply(&reports)), vec!["2", "5"]);
}

#[test]
fn filters_combine() {
    let reports = reports();
    let filter = ReportFilter {
        site: SiteScope::Site("site2".to_string()),
        query: Some("소음".to_string()),
        status: Some(ReportStatus::InProgress),
        from: None,
        to: Some(date!(2025 - 02 - 01)),
    };
    assert_eq!(report_ids(filter.apply(&reports)), vec!["7"]);
}

#[test]
fn reward_query_covers_amount_user_and_label() {
    let rewards = rewards();

    let by_amount = RewardFilter {
        query: Some("70000".to_string()),
        ..RewardFilter::default()
    };
    assert_eq!(
        reward_ids(by_amount.apply(&rewards, korean_label)),
        vec!["rw2"]
    );

    let by_user = RewardFilter {
        query: Some("U31OP".to_string()),
        ..RewardFilter::default()
    };
    assert_eq!(
        reward_ids(by_user.apply(&rewards, korean_label)),
        vec!["rw3"]
    );

    let by_label = RewardFilter {
        query: Some("대기중".to_string()),
        ..RewardFilter::default()
    };
    assert_eq!(
        reward_ids(by_label.apply(&rewards, korean_label)),
        vec!["rw3"]
    );

    let by_date = RewardFilter {
        query: Some("2025-08".to_string()),
        ..RewardFilter::default()
    };
    assert_eq!(
        reward_ids(by_date.apply(&rewards, korean_label)),
        vec!["rw1"]
    );
}

#[test]
fn reward_site_status_and_range() {
    let rewards = rewards();
    let filter = RewardFilter {
        site: SiteScope::All,
        status: Some(RewardStatus::Completed),
        from: Some(date!(2025 - 08 - 28)),
        to: Some(date!(2025 - 08 - 28)),
        ..RewardFilter::default()
    };
    assert_eq!(filter.apply(&rewards, korean_label).len(), 1);

    let elsewhere = RewardFilter {
        site: SiteScope::Site("site5".to_string()),
        ..RewardFilter::default()
    };
    assert!(elsewhere.apply(&rewards, korean_label).is_empty());
}

#[test]
fn decomposed_hangul_query_matches_composed_text() {
    let reports = reports();
    // 낙하 typed as conjoining jamo
    let decomposed = "\u{1102}\u{1161}\u{11A8}\u{1112}\u{1161}";
    let composed = ReportFilter {
        query: Some("낙하".to_string()),
        ..ReportFilter::default()
    };
    let jamo = ReportFilter {
        query: Some(decomposed.to_string()),
        ..ReportFilter::default()
    };
    assert_eq!(report_ids(composed.apply(&reports)), vec!["1"]);
    assert_eq!(report_ids(jamo.apply(&reports)), vec!["1"]);

    let mut stored_decomposed = reports[0].clone();
    stored_decomposed.report_type = format!("{}물 위험", decomposed);
    stored_decomposed.description = String::new();
    assert!(composed.matches(&stored_decomposed));
}
