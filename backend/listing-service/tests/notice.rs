//! Admin notice board flows against the in-memory store.

mod common;

use std::sync::Arc;

use bson::oid::ObjectId;
use bson::DateTime;

use common::{FailingNoticeRepository, TestApp};
use listing_service::domain::input::NoticeInput;
use listing_service::domain::models::{Notice, NoticeCategory, NoticeStatus};
use listing_service::error::ServiceError;
use listing_service::services::NoticeService;

fn notice_input(title: &str) -> NoticeInput {
    NoticeInput {
        notice_category: NoticeCategory::Notice,
        notice_title: title.into(),
        notice_content: "content".into(),
    }
}

fn seeded_notice(title: &str, status: NoticeStatus, created_ms: i64) -> Notice {
    Notice {
        id: ObjectId::new(),
        notice_category: NoticeCategory::Event,
        notice_status: status,
        notice_title: title.into(),
        notice_content: "content".into(),
        member_id: ObjectId::new(),
        created_at: DateTime::from_millis(created_ms),
        updated_at: DateTime::from_millis(created_ms),
    }
}

#[tokio::test]
async fn creating_a_notice_publishes_it_to_the_board() {
    let app = TestApp::new();
    let admin = ObjectId::new();

    let created = app
        .notices
        .create_notice(&admin, notice_input("Maintenance window"))
        .await
        .unwrap();
    assert_eq!(created.notice_status, NoticeStatus::Active);
    assert_eq!(created.member_id, admin);

    let board = app.notices.get_notices().await.unwrap();
    assert_eq!(board.total(), 1);
    assert_eq!(board.list[0].id, created.id);
    assert_eq!(board.list[0].notice_title, "Maintenance window");
}

#[tokio::test]
async fn the_board_lists_only_active_notices_newest_first() {
    let app = TestApp::new();
    {
        let mut notices = app.db.notices.lock().unwrap();
        notices.push(seeded_notice("oldest", NoticeStatus::Active, 1_000));
        notices.push(seeded_notice("newest", NoticeStatus::Active, 3_000));
        notices.push(seeded_notice("hidden", NoticeStatus::Hold, 2_000));
    }

    let board = app.notices.get_notices().await.unwrap();
    assert_eq!(board.total(), 2);
    assert_eq!(board.list[0].notice_title, "newest");
    assert_eq!(board.list[1].notice_title, "oldest");
}

#[tokio::test]
async fn an_empty_board_still_reads_as_zero() {
    let app = TestApp::new();

    let board = app.notices.get_notices().await.unwrap();
    assert_eq!(board.total(), 0);
    assert!(board.list.is_empty());
}

#[tokio::test]
async fn a_failing_notice_store_surfaces_create_failed() {
    let notices = NoticeService::new(Arc::new(FailingNoticeRepository));

    let err = notices
        .create_notice(&ObjectId::new(), notice_input("Maintenance window"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CreateFailed));
    assert_eq!(err.to_string(), "Create failed!");
}
