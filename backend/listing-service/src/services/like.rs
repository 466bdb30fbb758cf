//! Like toggle: flips the binary relationship and reports the signed
//! effect the stats ledger must apply.

use std::sync::Arc;

use bson::oid::ObjectId;
use tracing::debug;

use crate::domain::inquiry::OrdinaryInquiry;
use crate::domain::models::{Like, LikeGroup, MeLiked, Property};
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;
use crate::repository::likes::LikeRepository;
use crate::repository::InsertOutcome;

#[derive(Clone)]
pub struct LikeService {
    likes: Arc<dyn LikeRepository>,
}

impl LikeService {
    pub fn new(likes: Arc<dyn LikeRepository>) -> Self {
        Self { likes }
    }

    /// Flip the (member, target) like relationship.
    ///
    /// Returns +1 when the like was applied, -1 when removed. The
    /// delete and the insert are each atomic against the unique index,
    /// so every returned delta corresponds to exactly one record
    /// mutation even when two togglers race: the insert loser observes
    /// a duplicate and flips to the removal path.
    pub async fn toggle_like(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
        group: LikeGroup,
    ) -> ServiceResult<i64> {
        if self.likes.delete_one(member_id, like_ref_id).await?.is_some() {
            debug!(%member_id, %like_ref_id, "like removed");
            return Ok(-1);
        }
        let like = Like::new(*member_id, *like_ref_id, group);
        let outcome = self
            .likes
            .insert_one(like)
            .await
            .map_err(|_| ServiceError::CreateFailed)?;
        match outcome {
            InsertOutcome::Inserted => {
                debug!(%member_id, %like_ref_id, "like applied");
                Ok(1)
            }
            InsertOutcome::Duplicate => {
                // A concurrent toggle won the insert; take over its removal.
                match self.likes.delete_one(member_id, like_ref_id).await? {
                    Some(_) => Ok(-1),
                    None => Err(ServiceError::SomethingWentWrong),
                }
            }
        }
    }

    /// The requester's like-state toward a target; empty when not
    /// engaged.
    pub async fn check_like_existence(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
    ) -> ServiceResult<Vec<MeLiked>> {
        Ok(match self.likes.find_one(member_id, like_ref_id).await? {
            Some(_) => vec![MeLiked {
                member_id: *member_id,
                like_ref_id: *like_ref_id,
                my_favorite: true,
            }],
            None => Vec::new(),
        })
    }

    /// Properties the member currently likes.
    pub async fn get_favorite_properties(
        &self,
        member_id: &ObjectId,
        inquiry: &OrdinaryInquiry,
    ) -> ServiceResult<FacetPage<Property>> {
        inquiry.page.validate()?;
        self.likes.favorite_properties(member_id, &inquiry.page).await
    }

    /// True record count for a target; used to reconcile a drifted
    /// counter back onto the record count.
    pub async fn count_likes(&self, like_ref_id: &ObjectId) -> ServiceResult<i64> {
        self.likes.count_for_target(like_ref_id).await
    }
}
