//! Tests for the financial record service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

use super::*;
use crate::domain::ports::MockFinancialRecordRepository;
use crate::domain::{ErrorCode, RecordDraft, RecordName};
use crate::test_support::{FixedClock, fixture_clock, fixture_timestamp};

#[fixture]
fn draft() -> RecordDraft {
    RecordDraft {
        income: "1000".parse().expect("income"),
        percentage: "20".parse().expect("percentage"),
        name: RecordName::new("Emergency Fund").expect("name"),
    }
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn stored_record(owner: &UserId, draft: RecordDraft) -> FinancialRecord {
    let created = fixture_timestamp() - Duration::days(1);
    FinancialRecord::create(RecordId::random(), owner.clone(), draft, created)
}

fn service(repo: MockFinancialRecordRepository) -> FinancialRecordService<MockFinancialRecordRepository> {
    FinancialRecordService::new(Arc::new(repo), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn create_record_persists_owned_record(owner: UserId, draft: RecordDraft) {
    let expected_owner = owner.clone();
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_insert()
        .withf(move |record| {
            record.is_owned_by(&expected_owner)
                && record.created_at() == fixture_timestamp()
                && record.updated_at() == fixture_timestamp()
                && record.transfer_amount() == Decimal::new(200, 0)
        })
        .times(1)
        .return_once(|_| Ok(()));

    service(repo)
        .create_record(CreateRecordRequest { owner, draft })
        .await
        .expect("create succeeds");
}

#[rstest]
#[case(FinancialRecordRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(FinancialRecordRepositoryError::query("bad sql"), ErrorCode::InternalError)]
#[tokio::test]
async fn create_record_maps_repository_errors(
    owner: UserId,
    draft: RecordDraft,
    #[case] failure: FinancialRecordRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_insert().return_once(move |_| Err(failure));

    let err = service(repo)
        .create_record(CreateRecordRequest { owner, draft })
        .await
        .expect_err("repository failure");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_record_revises_in_place(owner: UserId, draft: RecordDraft) {
    let existing = stored_record(&owner, draft);
    let record_id = existing.id();
    let created_at = existing.created_at();
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_find_by_id()
        .with(eq(record_id))
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update()
        .withf(move |record| {
            record.id() == record_id
                && record.created_at() == created_at
                && record.updated_at() == fixture_timestamp()
                && record.name().as_ref() == "Holiday"
                && record.transfer_amount() == Decimal::new(150, 0)
        })
        .times(1)
        .return_once(|_| Ok(true));

    service(repo)
        .update_record(UpdateRecordRequest {
            owner,
            record_id,
            draft: RecordDraft {
                income: "1500".parse().expect("income"),
                percentage: "10".parse().expect("percentage"),
                name: RecordName::new("Holiday").expect("name"),
            },
        })
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn update_record_unknown_id_is_not_found(owner: UserId, draft: RecordDraft) {
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_update().times(0);

    let err = service(repo)
        .update_record(UpdateRecordRequest {
            owner,
            record_id: RecordId::random(),
            draft,
        })
        .await
        .expect_err("missing record");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_record_foreign_record_is_not_found(owner: UserId, draft: RecordDraft) {
    let foreign = stored_record(&UserId::random(), draft.clone());
    let record_id = foreign.id();
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));
    repo.expect_update().times(0);

    let err = service(repo)
        .update_record(UpdateRecordRequest {
            owner,
            record_id,
            draft,
        })
        .await
        .expect_err("foreign record");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_record_reports_concurrent_delete(owner: UserId, draft: RecordDraft) {
    let existing = stored_record(&owner, draft.clone());
    let record_id = existing.id();
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update().return_once(|_| Ok(false));

    let err = service(repo)
        .update_record(UpdateRecordRequest {
            owner,
            record_id,
            draft,
        })
        .await
        .expect_err("vanished record");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_record_is_scoped_to_owner(
    owner: UserId,
    #[case] deleted: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let record_id = RecordId::random();
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_delete()
        .with(eq(record_id), eq(owner.clone()))
        .times(1)
        .return_once(move |_, _| Ok(deleted));

    let result = service(repo)
        .delete_record(DeleteRecordRequest { owner, record_id })
        .await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn list_records_returns_store_order(owner: UserId, draft: RecordDraft) {
    let first = stored_record(&owner, draft.clone());
    let second = stored_record(&owner, draft);
    let expected = vec![first.id(), second.id()];
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_list_for_user()
        .with(eq(owner.clone()))
        .return_once(move |_| Ok(vec![first, second]));

    let listed = FinancialRecordService::new(Arc::new(repo), Arc::new(FixedClock::new(Utc::now())))
        .list_records(&owner)
        .await
        .expect("list succeeds");

    assert_eq!(listed.iter().map(FinancialRecord::id).collect::<Vec<_>>(), expected);
}

#[rstest]
#[tokio::test]
async fn list_records_maps_connection_failure(owner: UserId) {
    let mut repo = MockFinancialRecordRepository::new();
    repo.expect_list_for_user()
        .return_once(|_| Err(FinancialRecordRepositoryError::connection("pool timeout")));

    let err = service(repo)
        .list_records(&owner)
        .await
        .expect_err("connection failure");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
