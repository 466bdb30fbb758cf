//! Admin-authored notice board. Notices are broadcast content, not
//! per-member notifications: anyone can read the ACTIVE board and only
//! admins write to it.

use std::sync::Arc;

use bson::oid::ObjectId;

use crate::domain::input::NoticeInput;
use crate::domain::models::Notice;
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;
use crate::repository::notices::NoticeRepository;

#[derive(Clone)]
pub struct NoticeService {
    notices: Arc<dyn NoticeRepository>,
}

impl NoticeService {
    pub fn new(notices: Arc<dyn NoticeRepository>) -> Self {
        Self { notices }
    }

    pub async fn create_notice(
        &self,
        member_id: &ObjectId,
        input: NoticeInput,
    ) -> ServiceResult<Notice> {
        let notice = input.into_notice(*member_id);
        self.notices
            .insert_one(&notice)
            .await
            .map_err(|_| ServiceError::CreateFailed)?;
        Ok(notice)
    }

    /// The whole ACTIVE board, newest first.
    pub async fn get_notices(&self) -> ServiceResult<FacetPage<Notice>> {
        self.notices.list_active().await
    }
}
