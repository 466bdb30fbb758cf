//! Comments: group-dispatched counter maintenance plus fan-out toward
//! the commented target's owner.

use std::sync::Arc;

use bson::oid::ObjectId;
use bson::DateTime;

use super::notification::NotificationService;
use crate::domain::input::{CommentInput, CommentUpdate, NotificationInput};
use crate::domain::inquiry::{CommentsInquiry, AVAILABLE_COMMENT_SORTS};
use crate::domain::models::{
    Comment, CommentGroup, CommentStatus, NotificationGroup, NotificationType,
};
use crate::domain::stats::{ArticleStatKey, MemberStatKey, PropertyStatKey};
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;
use crate::repository::articles::ArticleRepository;
use crate::repository::comments::CommentRepository;
use crate::repository::members::MemberRepository;
use crate::repository::properties::PropertyRepository;

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    members: Arc<dyn MemberRepository>,
    properties: Arc<dyn PropertyRepository>,
    articles: Arc<dyn ArticleRepository>,
    notifier: NotificationService,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        members: Arc<dyn MemberRepository>,
        properties: Arc<dyn PropertyRepository>,
        articles: Arc<dyn ArticleRepository>,
        notifier: NotificationService,
    ) -> Self {
        Self {
            comments,
            members,
            properties,
            articles,
            notifier,
        }
    }

    /// Persist a comment, bump the target's comment counter and notify
    /// its owner. The receiver depends on the comment group: content
    /// comments notify the content owner, profile comments the member
    /// themselves.
    pub async fn create_comment(
        &self,
        member_id: &ObjectId,
        input: CommentInput,
    ) -> ServiceResult<Comment> {
        let comment_ref_id = input.comment_ref_id.normalize()?;
        let now = DateTime::now();
        let comment = Comment {
            id: ObjectId::new(),
            member_id: *member_id,
            comment_group: input.comment_group,
            comment_status: CommentStatus::Active,
            comment_ref_id,
            comment_content: input.comment_content,
            created_at: now,
            updated_at: now,
            member_data: None,
        };
        self.comments
            .insert_one(&comment)
            .await
            .map_err(|_| ServiceError::CreateFailed)?;

        let notification = match input.comment_group {
            CommentGroup::Property => {
                let target = self
                    .properties
                    .apply_stat_delta(&comment_ref_id, PropertyStatKey::Comments, 1)
                    .await?
                    .ok_or(ServiceError::SomethingWentWrong)?;
                NotificationInput {
                    notification_group: NotificationGroup::Property,
                    notification_type: NotificationType::Comment,
                    notification_title: "Property comment!".to_string(),
                    notification_desc: "Someone commented on your property!".to_string(),
                    author_id: *member_id,
                    receiver_id: target.member_id,
                    property_id: Some(comment_ref_id),
                    article_id: None,
                }
            }
            CommentGroup::Article => {
                let target = self
                    .articles
                    .apply_stat_delta(&comment_ref_id, ArticleStatKey::Comments, 1)
                    .await?
                    .ok_or(ServiceError::SomethingWentWrong)?;
                NotificationInput {
                    notification_group: NotificationGroup::Article,
                    notification_type: NotificationType::Comment,
                    notification_title: "Article comment!".to_string(),
                    notification_desc: "Someone commented on your article!".to_string(),
                    author_id: *member_id,
                    receiver_id: target.member_id,
                    property_id: None,
                    article_id: Some(comment_ref_id),
                }
            }
            CommentGroup::Member => {
                self.members
                    .apply_stat_delta(&comment_ref_id, MemberStatKey::Comments, 1)
                    .await?
                    .ok_or(ServiceError::SomethingWentWrong)?;
                NotificationInput {
                    notification_group: NotificationGroup::Member,
                    notification_type: NotificationType::Comment,
                    notification_title: "Profile comment!".to_string(),
                    notification_desc: "Someone commented on your profile!".to_string(),
                    author_id: *member_id,
                    receiver_id: comment_ref_id,
                    property_id: None,
                    article_id: None,
                }
            }
        };
        self.notifier.notify(notification).await;

        Ok(comment)
    }

    /// Owner-scoped update; a transition to DELETE undoes the comment
    /// counter credit on the group target.
    pub async fn update_comment(
        &self,
        member_id: &ObjectId,
        comment_id: &ObjectId,
        patch: CommentUpdate,
    ) -> ServiceResult<Comment> {
        let deleting = patch.comment_status == Some(CommentStatus::Delete);
        let updated = self
            .comments
            .update_one(comment_id, member_id, &patch)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        if deleting {
            match updated.comment_group {
                CommentGroup::Property => {
                    self.properties
                        .apply_stat_delta(
                            &updated.comment_ref_id,
                            PropertyStatKey::Comments,
                            -1,
                        )
                        .await?;
                }
                CommentGroup::Article => {
                    self.articles
                        .apply_stat_delta(&updated.comment_ref_id, ArticleStatKey::Comments, -1)
                        .await?;
                }
                CommentGroup::Member => {
                    self.members
                        .apply_stat_delta(&updated.comment_ref_id, MemberStatKey::Comments, -1)
                        .await?;
                }
            }
        }
        Ok(updated)
    }

    pub async fn get_comments(
        &self,
        inquiry: &CommentsInquiry,
    ) -> ServiceResult<FacetPage<Comment>> {
        inquiry.page.validate()?;
        let sort = inquiry.sorting.resolve(AVAILABLE_COMMENT_SORTS)?;
        let comment_ref_id = inquiry.comment_ref_id.normalize()?;
        self.comments
            .list(
                &comment_ref_id,
                sort,
                (inquiry.page.page, inquiry.page.limit),
            )
            .await
    }
}
