use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use mongodb::Collection;

use super::mongo::{self, run_facet};
use super::InsertOutcome;
use crate::domain::inquiry::PageRequest;
use crate::domain::models::Follow;
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{
    facet, lookup, lookup_auth_member_followed, lookup_auth_member_liked, unwind, MatchStage,
    SortStage,
};
use crate::query::FacetPage;

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn find_one(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Option<Follow>>;

    /// Insert guarded by the unique (followerId, followingId) index.
    async fn insert_one(&self, follow: Follow) -> ServiceResult<InsertOutcome>;

    async fn delete_one(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Option<Follow>>;

    /// Members the given member follows, enriched with the viewer's
    /// like- and follow-state toward each listed member.
    async fn list_followings(
        &self,
        follower_id: &ObjectId,
        page: &PageRequest,
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Follow>>;

    /// Members following the given member, same enrichment.
    async fn list_followers(
        &self,
        following_id: &ObjectId,
        page: &PageRequest,
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Follow>>;
}

#[derive(Clone)]
pub struct MongoFollowRepository {
    follows: Collection<Follow>,
}

impl MongoFollowRepository {
    pub fn new(follows: Collection<Follow>) -> Self {
        Self { follows }
    }

    async fn list_edge(
        &self,
        key_field: &str,
        key: &ObjectId,
        target_ref: &str,
        data_local_field: &str,
        data_as: &str,
        page: &PageRequest,
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Follow>> {
        let pipeline = vec![
            MatchStage::new().eq(key_field, *key).to_document(),
            SortStage::created_desc().to_document(),
            facet(
                page.page,
                page.limit,
                vec![
                    lookup_auth_member_liked(viewer, target_ref),
                    lookup_auth_member_followed(viewer, target_ref),
                    lookup(mongo::MEMBERS, data_local_field, "_id", data_as),
                    unwind(&format!("${data_as}")),
                ],
            ),
        ];
        run_facet(&self.follows, pipeline).await
    }
}

#[async_trait]
impl FollowRepository for MongoFollowRepository {
    async fn find_one(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Option<Follow>> {
        self.follows
            .find_one(doc! { "followerId": follower_id, "followingId": following_id })
            .await
            .map_err(ServiceError::database)
    }

    async fn insert_one(&self, follow: Follow) -> ServiceResult<InsertOutcome> {
        match self.follows.insert_one(&follow).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if mongo::is_duplicate_key(&err) => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(ServiceError::database(err)),
        }
    }

    async fn delete_one(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Option<Follow>> {
        self.follows
            .find_one_and_delete(doc! { "followerId": follower_id, "followingId": following_id })
            .await
            .map_err(ServiceError::database)
    }

    async fn list_followings(
        &self,
        follower_id: &ObjectId,
        page: &PageRequest,
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Follow>> {
        self.list_edge(
            "followerId",
            follower_id,
            "$followingId",
            "followingId",
            "followingData",
            page,
            viewer,
        )
        .await
    }

    async fn list_followers(
        &self,
        following_id: &ObjectId,
        page: &PageRequest,
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Follow>> {
        self.list_edge(
            "followingId",
            following_id,
            "$followerId",
            "followerId",
            "followerData",
            page,
            viewer,
        )
        .await
    }
}
