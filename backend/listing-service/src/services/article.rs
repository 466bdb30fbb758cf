//! Board article orchestration; mirrors the property paths with the
//! article status model (no SOLD state).

use std::sync::Arc;

use bson::oid::ObjectId;
use bson::DateTime;
use tracing::info;

use super::like::LikeService;
use super::notification::NotificationService;
use super::view::ViewService;
use crate::domain::input::{ArticleInput, ArticleUpdate, NotificationInput};
use crate::domain::inquiry::{AllArticlesInquiry, ArticlesInquiry, AVAILABLE_ARTICLE_SORTS};
use crate::domain::models::{
    ArticleStatus, BoardArticle, LikeGroup, NotificationGroup, NotificationType, ViewGroup,
};
use crate::domain::stats::{ArticleStatKey, MemberStatKey};
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;
use crate::repository::articles::ArticleRepository;
use crate::repository::members::MemberRepository;

#[derive(Clone)]
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    members: Arc<dyn MemberRepository>,
    likes: LikeService,
    views: ViewService,
    notifier: NotificationService,
}

impl ArticleService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        members: Arc<dyn MemberRepository>,
        likes: LikeService,
        views: ViewService,
        notifier: NotificationService,
    ) -> Self {
        Self {
            articles,
            members,
            likes,
            views,
            notifier,
        }
    }

    pub async fn create_article(
        &self,
        member_id: &ObjectId,
        input: ArticleInput,
    ) -> ServiceResult<BoardArticle> {
        let article = input.into_article(*member_id);
        self.articles
            .insert_one(&article)
            .await
            .map_err(|_| ServiceError::CreateFailed)?;
        self.members
            .apply_stat_delta(member_id, MemberStatKey::Articles, 1)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        Ok(article)
    }

    pub async fn get_article(
        &self,
        viewer: Option<&ObjectId>,
        article_id: &ObjectId,
    ) -> ServiceResult<BoardArticle> {
        let mut article = self
            .articles
            .find_active(article_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;

        if let Some(viewer) = viewer {
            let first_view = self
                .views
                .record_view(viewer, article_id, ViewGroup::Article)
                .await?;
            if first_view {
                let updated = self
                    .articles
                    .apply_stat_delta(article_id, ArticleStatKey::Views, 1)
                    .await?
                    .ok_or(ServiceError::UpdateFailed)?;
                article.article_views = updated.article_views;
            }
            article.me_liked = self.likes.check_like_existence(viewer, article_id).await?;
        }

        article.member_data = Some(
            self.members
                .find_by_id(&article.member_id)
                .await?
                .ok_or(ServiceError::NoDataFound)?,
        );
        Ok(article)
    }

    pub async fn update_article(
        &self,
        owner_id: &ObjectId,
        article_id: &ObjectId,
        patch: ArticleUpdate,
    ) -> ServiceResult<BoardArticle> {
        self.apply_update(Some(owner_id), article_id, patch).await
    }

    pub async fn update_article_by_admin(
        &self,
        article_id: &ObjectId,
        patch: ArticleUpdate,
    ) -> ServiceResult<BoardArticle> {
        self.apply_update(None, article_id, patch).await
    }

    async fn apply_update(
        &self,
        owner_id: Option<&ObjectId>,
        article_id: &ObjectId,
        mut patch: ArticleUpdate,
    ) -> ServiceResult<BoardArticle> {
        if patch.article_status == Some(ArticleStatus::Delete) {
            patch.deleted_at = Some(DateTime::now());
        }
        let terminal = patch.deleted_at.is_some();
        let updated = self
            .articles
            .update_one(article_id, owner_id, &patch)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        if terminal {
            self.members
                .apply_stat_delta(&updated.member_id, MemberStatKey::Articles, -1)
                .await?
                .ok_or(ServiceError::UpdateFailed)?;
        }
        Ok(updated)
    }

    pub async fn remove_article_by_admin(
        &self,
        article_id: &ObjectId,
    ) -> ServiceResult<BoardArticle> {
        let removed = self
            .articles
            .delete_terminal(article_id)
            .await?
            .ok_or(ServiceError::RemoveFailed)?;
        info!(%article_id, "article hard-deleted");
        Ok(removed)
    }

    pub async fn get_articles(
        &self,
        viewer: Option<&ObjectId>,
        inquiry: &ArticlesInquiry,
    ) -> ServiceResult<FacetPage<BoardArticle>> {
        inquiry.page.validate()?;
        let sort = inquiry.sorting.resolve(AVAILABLE_ARTICLE_SORTS)?;
        self.articles
            .list(
                &inquiry.search,
                sort,
                (inquiry.page.page, inquiry.page.limit),
                viewer,
            )
            .await
    }

    pub async fn get_all_articles_by_admin(
        &self,
        inquiry: &AllArticlesInquiry,
    ) -> ServiceResult<FacetPage<BoardArticle>> {
        inquiry.page.validate()?;
        let sort = inquiry.sorting.resolve(AVAILABLE_ARTICLE_SORTS)?;
        self.articles.list_all(inquiry, sort).await
    }

    pub async fn like_target_article(
        &self,
        member_id: &ObjectId,
        article_id: &ObjectId,
    ) -> ServiceResult<BoardArticle> {
        let target = self
            .articles
            .find_active(article_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;

        let modifier = self
            .likes
            .toggle_like(member_id, article_id, LikeGroup::Article)
            .await?;
        let updated = self
            .articles
            .apply_stat_delta(article_id, ArticleStatKey::Likes, modifier)
            .await?
            .ok_or(ServiceError::SomethingWentWrong)?;

        if modifier == 1 {
            self.notifier
                .notify(NotificationInput {
                    notification_group: NotificationGroup::Article,
                    notification_type: NotificationType::Like,
                    notification_title: "Article liked!".to_string(),
                    notification_desc: "Someone liked your article!".to_string(),
                    author_id: *member_id,
                    receiver_id: target.member_id,
                    property_id: None,
                    article_id: Some(*article_id),
                })
                .await;
        }
        Ok(updated)
    }
}
