use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use mongodb::Collection;
use serde::Deserialize;

use super::mongo::{self, run_facet};
use super::InsertOutcome;
use crate::domain::inquiry::PageRequest;
use crate::domain::models::{Like, LikeGroup, Property};
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{facet, lookup, unwind, MatchStage, SortStage};
use crate::query::{Direction, FacetPage};

/// Like relationship store. Existence of a record is the source of
/// truth for "currently liked"; the unique (memberId, likeRefId) index
/// is the backstop against concurrent double-insert.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find_one(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>>;

    /// Atomic delete-if-present; returns the removed record.
    async fn delete_one(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>>;

    /// Insert guarded by the unique index.
    async fn insert_one(&self, like: Like) -> ServiceResult<InsertOutcome>;

    /// True record count for a target; reconciliation source of truth.
    async fn count_for_target(&self, like_ref_id: &ObjectId) -> ServiceResult<i64>;

    /// Properties the member currently likes, newest engagement first,
    /// enriched with each property's owner profile.
    async fn favorite_properties(
        &self,
        member_id: &ObjectId,
        page: &PageRequest,
    ) -> ServiceResult<FacetPage<Property>>;
}

#[derive(Clone)]
pub struct MongoLikeRepository {
    likes: Collection<Like>,
}

impl MongoLikeRepository {
    pub fn new(likes: Collection<Like>) -> Self {
        Self { likes }
    }
}

/// Row shape of the favorites join before the property is pulled out.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteRow {
    favorite_property: Property,
}

#[async_trait]
impl LikeRepository for MongoLikeRepository {
    async fn find_one(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>> {
        self.likes
            .find_one(doc! { "memberId": member_id, "likeRefId": like_ref_id })
            .await
            .map_err(ServiceError::database)
    }

    async fn delete_one(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>> {
        self.likes
            .find_one_and_delete(doc! { "memberId": member_id, "likeRefId": like_ref_id })
            .await
            .map_err(ServiceError::database)
    }

    async fn insert_one(&self, like: Like) -> ServiceResult<InsertOutcome> {
        match self.likes.insert_one(&like).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if mongo::is_duplicate_key(&err) => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(ServiceError::database(err)),
        }
    }

    async fn count_for_target(&self, like_ref_id: &ObjectId) -> ServiceResult<i64> {
        self.likes
            .count_documents(doc! { "likeRefId": like_ref_id })
            .await
            .map(|n| n as i64)
            .map_err(ServiceError::database)
    }

    async fn favorite_properties(
        &self,
        member_id: &ObjectId,
        page: &PageRequest,
    ) -> ServiceResult<FacetPage<Property>> {
        let matcher = MatchStage::new()
            .eq("likeGroup", bson::to_bson(&LikeGroup::Property).map_err(ServiceError::database)?)
            .eq("memberId", *member_id);
        let pipeline = vec![
            matcher.to_document(),
            SortStage::new("updatedAt", Direction::Desc).to_document(),
            lookup(mongo::PROPERTIES, "likeRefId", "_id", "favoriteProperty"),
            unwind("$favoriteProperty"),
            facet(
                page.page,
                page.limit,
                vec![
                    lookup(
                        mongo::MEMBERS,
                        "favoriteProperty.memberId",
                        "_id",
                        "favoriteProperty.memberData",
                    ),
                    unwind("$favoriteProperty.memberData"),
                ],
            ),
        ];
        let rows: FacetPage<FavoriteRow> = run_facet(&self.likes, pipeline).await?;
        Ok(rows.map(|row| row.favorite_property))
    }
}
