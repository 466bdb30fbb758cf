use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, DateTime};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::mongo::run_facet;
use crate::domain::input::CommentUpdate;
use crate::domain::models::{Comment, CommentStatus};
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{facet, lookup_member, unwind, MatchStage, SortStage};
use crate::query::FacetPage;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert_one(&self, comment: &Comment) -> ServiceResult<()>;

    /// Owner-scoped conditional update matching ACTIVE status.
    async fn update_one(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        patch: &CommentUpdate,
    ) -> ServiceResult<Option<Comment>>;

    /// ACTIVE comments for one target, author profile attached.
    async fn list(
        &self,
        comment_ref_id: &ObjectId,
        sort: SortStage,
        page: (i64, i64),
    ) -> ServiceResult<FacetPage<Comment>>;
}

#[derive(Clone)]
pub struct MongoCommentRepository {
    comments: Collection<Comment>,
}

impl MongoCommentRepository {
    pub fn new(comments: Collection<Comment>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn insert_one(&self, comment: &Comment) -> ServiceResult<()> {
        self.comments
            .insert_one(comment)
            .await
            .map(|_| ())
            .map_err(ServiceError::database)
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        patch: &CommentUpdate,
    ) -> ServiceResult<Option<Comment>> {
        let active = bson::to_bson(&CommentStatus::Active).map_err(ServiceError::database)?;
        let mut set = bson::to_document(patch).map_err(ServiceError::database)?;
        set.insert("updatedAt", DateTime::now());
        self.comments
            .find_one_and_update(
                doc! { "_id": id, "memberId": owner, "commentStatus": active },
                doc! { "$set": set },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(ServiceError::database)
    }

    async fn list(
        &self,
        comment_ref_id: &ObjectId,
        sort: SortStage,
        page: (i64, i64),
    ) -> ServiceResult<FacetPage<Comment>> {
        let active = bson::to_bson(&CommentStatus::Active).map_err(ServiceError::database)?;
        let matcher = MatchStage::new()
            .eq("commentRefId", *comment_ref_id)
            .eq("commentStatus", active);
        let pipeline = vec![
            matcher.to_document(),
            sort.to_document(),
            facet(
                page.0,
                page.1,
                vec![lookup_member(), unwind("$memberData")],
            ),
        ];
        run_facet(&self.comments, pipeline).await
    }
}
