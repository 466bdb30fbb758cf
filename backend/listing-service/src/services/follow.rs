//! Follow subscriptions: explicit, asymmetric subscribe/unsubscribe
//! (no toggle semantics), with both parties' counters moving through
//! the stats ledger.

use std::sync::Arc;

use bson::oid::ObjectId;

use super::notification::NotificationService;
use crate::domain::input::NotificationInput;
use crate::domain::inquiry::FollowInquiry;
use crate::domain::models::{Follow, NotificationGroup, NotificationType};
use crate::domain::stats::MemberStatKey;
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;
use crate::repository::follows::FollowRepository;
use crate::repository::members::MemberRepository;
use crate::repository::InsertOutcome;

#[derive(Clone)]
pub struct FollowService {
    follows: Arc<dyn FollowRepository>,
    members: Arc<dyn MemberRepository>,
    notifier: NotificationService,
}

impl FollowService {
    pub fn new(
        follows: Arc<dyn FollowRepository>,
        members: Arc<dyn MemberRepository>,
        notifier: NotificationService,
    ) -> Self {
        Self {
            follows,
            members,
            notifier,
        }
    }

    pub async fn subscribe(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Follow> {
        if follower_id == following_id {
            return Err(ServiceError::SelfSubscriptionDenied);
        }
        self.members
            .find_by_id(following_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;

        let follow = Follow::new(*follower_id, *following_id);
        match self.follows.insert_one(follow.clone()).await? {
            InsertOutcome::Inserted => {}
            InsertOutcome::Duplicate => return Err(ServiceError::CreateFailed),
        }

        self.members
            .apply_stat_delta(follower_id, MemberStatKey::Followings, 1)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        self.members
            .apply_stat_delta(following_id, MemberStatKey::Followers, 1)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;

        self.notifier
            .notify(NotificationInput {
                notification_group: NotificationGroup::Member,
                notification_type: NotificationType::Follow,
                notification_title: "You have a new follower!".to_string(),
                notification_desc: "Someone started following you".to_string(),
                author_id: *follower_id,
                receiver_id: *following_id,
                property_id: None,
                article_id: None,
            })
            .await;

        Ok(follow)
    }

    /// Inverse of subscribe; removals never notify.
    pub async fn unsubscribe(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Follow> {
        self.members
            .find_by_id(following_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;
        let removed = self
            .follows
            .delete_one(follower_id, following_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;

        self.members
            .apply_stat_delta(follower_id, MemberStatKey::Followings, -1)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        self.members
            .apply_stat_delta(following_id, MemberStatKey::Followers, -1)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;

        Ok(removed)
    }

    pub async fn get_member_followings(
        &self,
        viewer: Option<&ObjectId>,
        inquiry: &FollowInquiry,
    ) -> ServiceResult<FacetPage<Follow>> {
        inquiry.page.validate()?;
        let follower_id = inquiry.follower_id.as_ref().ok_or(ServiceError::BadRequest)?;
        self.follows
            .list_followings(follower_id, &inquiry.page, viewer)
            .await
    }

    pub async fn get_member_followers(
        &self,
        viewer: Option<&ObjectId>,
        inquiry: &FollowInquiry,
    ) -> ServiceResult<FacetPage<Follow>> {
        inquiry.page.validate()?;
        let following_id = inquiry.following_id.as_ref().ok_or(ServiceError::BadRequest)?;
        self.follows
            .list_followers(following_id, &inquiry.page, viewer)
            .await
    }
}
