use async_trait::async_trait;
use bson::{doc, Bson};
use mongodb::Collection;

use super::mongo::run_facet;
use crate::domain::models::{Notice, NoticeStatus};
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{MatchStage, SortStage};
use crate::query::FacetPage;

#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn insert_one(&self, notice: &Notice) -> ServiceResult<()>;

    /// Every ACTIVE notice, newest first; the board is served whole,
    /// not paginated.
    async fn list_active(&self) -> ServiceResult<FacetPage<Notice>>;
}

#[derive(Clone)]
pub struct MongoNoticeRepository {
    notices: Collection<Notice>,
}

impl MongoNoticeRepository {
    pub fn new(notices: Collection<Notice>) -> Self {
        Self { notices }
    }
}

#[async_trait]
impl NoticeRepository for MongoNoticeRepository {
    async fn insert_one(&self, notice: &Notice) -> ServiceResult<()> {
        self.notices
            .insert_one(notice)
            .await
            .map(|_| ())
            .map_err(ServiceError::database)
    }

    async fn list_active(&self) -> ServiceResult<FacetPage<Notice>> {
        let pipeline = vec![
            MatchStage::new()
                .eq("noticeStatus", status_bson(NoticeStatus::Active)?)
                .to_document(),
            SortStage::created_desc().to_document(),
            doc! {
                "$facet": {
                    "list": [{ "$skip": 0 }],
                    "metaCounter": [{ "$count": "total" }],
                }
            },
        ];
        run_facet(&self.notices, pipeline).await
    }
}

fn status_bson(status: NoticeStatus) -> ServiceResult<Bson> {
    bson::to_bson(&status).map_err(ServiceError::database)
}
