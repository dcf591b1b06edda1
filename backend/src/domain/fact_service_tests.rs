//! Tests for the fact service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{ImageResolverError, MockFactRepository, MockImageResolver};
use crate::domain::{Approval, ErrorCode, ModerationDecision};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 24, 10, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn sample_draft() -> FactSubmissionDraft {
    FactSubmissionDraft {
        place_id: Some("p1".to_owned()),
        submitted_by: Some("u1".to_owned()),
        description: Some("x".to_owned()),
        image: Some("img1".to_owned()),
        tags: Some(vec!["history".to_owned()]),
        source: Some("book".to_owned()),
    }
}

#[fixture]
fn draft() -> FactSubmissionDraft {
    sample_draft()
}

fn pending_fact(now: DateTime<Utc>) -> Fact {
    let submission = FactSubmission::try_from(sample_draft()).expect("valid draft");
    Fact::submit(submission, FactId::generate(), now)
}

fn signing_resolver() -> MockImageResolver {
    let mut resolver = MockImageResolver::new();
    resolver
        .expect_resolve()
        .returning(|image| Ok(format!("https://img.test/{}", image.object_key())));
    resolver
}

fn service(
    repo: MockFactRepository,
    resolver: MockImageResolver,
    now: DateTime<Utc>,
) -> FactService<MockFactRepository> {
    FactService::new(
        Arc::new(repo),
        Arc::new(resolver),
        Arc::new(FixtureClock { utc_now: now }),
    )
}

fn moderate_request(fact: &Fact, decision: ModerationDecision) -> ModerateFactRequest {
    ModerateFactRequest {
        place_id: fact.place_id().to_string(),
        fact_id: fact.fact_id().to_string(),
        decision,
        moderator_id: Some("mod-1".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn submit_stores_pending_fact_stamped_with_clock(draft: FactSubmissionDraft, now: DateTime<Utc>) {
    let mut repo = MockFactRepository::new();
    repo.expect_insert()
        .withf(move |fact| {
            fact.approval_state() == ApprovalState::Pending
                && fact.created_at() == now
                && fact.like_count() == 0
                && fact.dislike_count() == 0
        })
        .times(1)
        .return_once(|_| Ok(()));

    let response = service(repo, MockImageResolver::new(), now)
        .submit(draft)
        .await
        .expect("submission succeeds");

    assert_eq!(response.message, FACT_SUBMITTED_MESSAGE);
    assert!(uuid::Uuid::parse_str(&response.fact_id).is_ok());
}

#[rstest]
#[tokio::test]
async fn submit_reports_missing_field_before_persisting(mut draft: FactSubmissionDraft, now: DateTime<Utc>) {
    draft.tags = None;
    let mut repo = MockFactRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo, MockImageResolver::new(), now)
        .submit(draft)
        .await
        .expect_err("missing tags");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details present");
    assert_eq!(details["field"], "tags");
    assert_eq!(details["code"], "missing_field");
}

#[rstest]
#[case(FactRepositoryError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
#[case(FactRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(FactRepositoryError::duplicate("f1"), ErrorCode::Conflict)]
#[tokio::test]
async fn submit_maps_repository_errors(
    draft: FactSubmissionDraft,
    now: DateTime<Utc>,
    #[case] failure: FactRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockFactRepository::new();
    repo.expect_insert().return_once(move |_| Err(failure));

    let error = service(repo, MockImageResolver::new(), now)
        .submit(draft)
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn list_by_place_attaches_image_urls(now: DateTime<Utc>) {
    let fact = pending_fact(now);
    let mut repo = MockFactRepository::new();
    repo.expect_list_by_place()
        .return_once(move |_| Ok(vec![fact]));

    let place_id = PlaceId::new("p1").expect("valid place id");
    let facts = service(repo, signing_resolver(), now)
        .list_by_place(&place_id)
        .await
        .expect("listing succeeds");

    assert_eq!(facts.len(), 1);
    let first = facts.first().expect("one fact");
    assert_eq!(first.approval_state, ApprovalState::Pending);
    assert_eq!(first.image_url.as_deref(), Some("https://img.test/img1.jpeg"));
}

#[rstest]
#[tokio::test]
async fn list_by_place_returns_empty_for_unknown_place(now: DateTime<Utc>) {
    let mut repo = MockFactRepository::new();
    repo.expect_list_by_place().return_once(|_| Ok(Vec::new()));

    let place_id = PlaceId::new("nowhere").expect("valid place id");
    let facts = service(repo, MockImageResolver::new(), now)
        .list_by_place(&place_id)
        .await
        .expect("listing succeeds");

    assert!(facts.is_empty());
}

#[rstest]
#[tokio::test]
async fn approved_only_listing_hides_pending_facts(now: DateTime<Utc>) {
    let pending = pending_fact(now);
    let approved = pending_fact(now)
        .moderate(ModerationDecision::Approved, "mod-1".to_owned())
        .expect("pending facts accept a decision");
    let approved_id = approved.fact_id().to_string();
    let mut repo = MockFactRepository::new();
    repo.expect_list_by_place()
        .return_once(move |_| Ok(vec![pending, approved]));

    let place_id = PlaceId::new("p1").expect("valid place id");
    let facts = service(repo, signing_resolver(), now)
        .with_approved_only(true)
        .list_by_place(&place_id)
        .await
        .expect("listing succeeds");

    let ids: Vec<&str> = facts.iter().map(|fact| fact.fact_id.as_str()).collect();
    assert_eq!(ids, vec![approved_id.as_str()]);
}

#[rstest]
#[tokio::test]
async fn list_by_place_fails_when_resolution_fails(now: DateTime<Utc>) {
    let fact = pending_fact(now);
    let mut repo = MockFactRepository::new();
    repo.expect_list_by_place()
        .return_once(move |_| Ok(vec![fact]));
    let mut resolver = MockImageResolver::new();
    resolver
        .expect_resolve()
        .returning(|_| Err(ImageResolverError::backend("no credentials")));

    let place_id = PlaceId::new("p1").expect("valid place id");
    let error = service(repo, resolver, now)
        .list_by_place(&place_id)
        .await
        .expect_err("resolution failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(ModerationDecision::Approved, ApprovalState::Approved)]
#[case(ModerationDecision::Rejected, ApprovalState::Rejected)]
#[tokio::test]
async fn moderate_applies_decision_once(
    now: DateTime<Utc>,
    #[case] decision: ModerationDecision,
    #[case] expected: ApprovalState,
) {
    let fact = pending_fact(now);
    let request = moderate_request(&fact, decision);
    let mut repo = MockFactRepository::new();
    repo.expect_find().return_once(move |_, _| Ok(Some(fact)));
    repo.expect_apply_moderation()
        .withf(move |_, _, approval| approval.state() == expected)
        .times(1)
        .return_once(|_, _, _| Ok(true));

    let payload = service(repo, signing_resolver(), now)
        .moderate(request)
        .await
        .expect("moderation succeeds");

    assert_eq!(payload.approval_state, expected);
    let moderator = match decision {
        ModerationDecision::Approved => payload.approved_by.as_deref(),
        ModerationDecision::Rejected => payload.rejected_by.as_deref(),
    };
    assert_eq!(moderator, Some("mod-1"));
}

#[rstest]
#[tokio::test]
async fn moderating_a_decided_fact_conflicts(now: DateTime<Utc>) {
    let approved = pending_fact(now)
        .moderate(ModerationDecision::Approved, "mod-0".to_owned())
        .expect("pending facts accept a decision");
    let request = moderate_request(&approved, ModerationDecision::Rejected);
    let mut repo = MockFactRepository::new();
    repo.expect_find().return_once(move |_, _| Ok(Some(approved)));
    repo.expect_apply_moderation().times(0);

    let error = service(repo, MockImageResolver::new(), now)
        .moderate(request)
        .await
        .expect_err("second decision conflicts");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn lost_compare_and_set_conflicts(now: DateTime<Utc>) {
    let fact = pending_fact(now);
    let request = moderate_request(&fact, ModerationDecision::Approved);
    let mut repo = MockFactRepository::new();
    repo.expect_find().return_once(move |_, _| Ok(Some(fact)));
    repo.expect_apply_moderation()
        .return_once(|_, _, _| Ok(false));

    let error = service(repo, MockImageResolver::new(), now)
        .moderate(request)
        .await
        .expect_err("concurrent moderation conflicts");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn moderating_unknown_fact_is_not_found(now: DateTime<Utc>) {
    let mut repo = MockFactRepository::new();
    repo.expect_find().return_once(|_, _| Ok(None));

    let error = service(repo, MockImageResolver::new(), now)
        .moderate(ModerateFactRequest {
            place_id: "p1".to_owned(),
            fact_id: "missing".to_owned(),
            decision: ModerationDecision::Approved,
            moderator_id: Some("mod-1".to_owned()),
        })
        .await
        .expect_err("unknown fact");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(None)]
#[case(Some("  ".to_owned()))]
#[tokio::test]
async fn blank_moderator_is_rejected(now: DateTime<Utc>, #[case] moderator_id: Option<String>) {
    let mut repo = MockFactRepository::new();
    repo.expect_find().times(0);

    let error = service(repo, MockImageResolver::new(), now)
        .moderate(ModerateFactRequest {
            place_id: "p1".to_owned(),
            fact_id: "f1".to_owned(),
            decision: ModerationDecision::Rejected,
            moderator_id,
        })
        .await
        .expect_err("moderator required");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn approval_passed_to_repository_names_moderator(now: DateTime<Utc>) {
    let approval = pending_fact(now)
        .moderate(ModerationDecision::Rejected, "mod-9".to_owned())
        .expect("pending facts accept a decision")
        .approval()
        .clone();
    assert_eq!(
        approval,
        Approval::Rejected {
            moderator: "mod-9".to_owned()
        }
    );
}
