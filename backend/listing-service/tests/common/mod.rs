//! In-memory repository doubles for service-level tests.
//!
//! Each double mirrors the conditional semantics of its Mongo
//! counterpart (status scoping, unique-key rejection, atomic counter
//! deltas) over `Mutex`-guarded vectors, so toggle and counter
//! behavior can be exercised without a running database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::DateTime;

use listing_service::domain::input::{ArticleUpdate, CommentUpdate, PropertyUpdate};
use listing_service::domain::inquiry::{
    AgentPropertiesInquiry, AllArticlesInquiry, AllPropertiesInquiry, ArticleSearch, PageRequest,
    PropertySearch,
};
use listing_service::domain::models::{
    ArticleStatus, BoardArticle, Comment, CommentStatus, Follow, Like, Member, Notice,
    NoticeStatus, Notification, NotificationStatus, Property, PropertyStatus, View, ViewGroup,
};
use listing_service::domain::stats::{ArticleStatKey, MemberStatKey, PropertyStatKey};
use listing_service::error::{ServiceError, ServiceResult};
use listing_service::query::{FacetPage, SortStage};
use listing_service::repository::articles::ArticleRepository;
use listing_service::repository::comments::CommentRepository;
use listing_service::repository::follows::FollowRepository;
use listing_service::repository::likes::LikeRepository;
use listing_service::repository::members::MemberRepository;
use listing_service::repository::notices::NoticeRepository;
use listing_service::repository::notifications::NotificationRepository;
use listing_service::repository::properties::PropertyRepository;
use listing_service::repository::views::ViewRepository;
use listing_service::repository::InsertOutcome;
use listing_service::services::events::EventChannel;
use listing_service::services::{
    ArticleService, CommentService, FollowService, LikeService, NoticeService,
    NotificationService, PropertyService, ViewService,
};

/// Shared backing store for all repository doubles.
#[derive(Default)]
pub struct MemoryDb {
    pub members: Mutex<Vec<Member>>,
    pub properties: Mutex<Vec<Property>>,
    pub articles: Mutex<Vec<BoardArticle>>,
    pub likes: Mutex<Vec<Like>>,
    pub follows: Mutex<Vec<Follow>>,
    pub views: Mutex<Vec<View>>,
    pub comments: Mutex<Vec<Comment>>,
    pub notices: Mutex<Vec<Notice>>,
    pub notifications: Mutex<Vec<Notification>>,
}

impl MemoryDb {
    pub fn seed_member(&self, member: Member) -> ObjectId {
        let id = member.id;
        self.members.lock().unwrap().push(member);
        id
    }

    pub fn member(&self, id: &ObjectId) -> Member {
        self.members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == *id)
            .cloned()
            .unwrap()
    }

    pub fn property(&self, id: &ObjectId) -> Property {
        self.properties
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .unwrap()
    }

    pub fn article(&self, id: &ObjectId) -> BoardArticle {
        self.articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned()
            .unwrap()
    }
}

fn page_of<T: Clone>(rows: Vec<T>, page: &PageRequest) -> FacetPage<T> {
    let total = rows.len() as i64;
    let list = rows
        .into_iter()
        .skip(page.skip() as usize)
        .take(page.limit as usize)
        .collect();
    FacetPage::new(list, total)
}

/// Channel double recording every published event.
#[derive(Default)]
pub struct RecordingChannel {
    pub published: Mutex<Vec<(String, ObjectId)>>,
}

impl RecordingChannel {
    pub fn receivers(&self) -> Vec<ObjectId> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(_, id)| *id)
            .collect()
    }
}

impl EventChannel for RecordingChannel {
    fn publish(&self, topic: &str, receiver_id: ObjectId) {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), receiver_id));
    }
}

// ---------------------------------------------------------------------------
// Repository doubles
// ---------------------------------------------------------------------------

pub struct MemoryMemberRepository(pub Arc<MemoryDb>);

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn find_by_id(&self, id: &ObjectId) -> ServiceResult<Option<Member>> {
        Ok(self
            .0
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == *id)
            .cloned())
    }

    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: MemberStatKey,
        delta: i64,
    ) -> ServiceResult<Option<Member>> {
        let mut members = self.0.members.lock().unwrap();
        let Some(member) = members.iter_mut().find(|m| m.id == *id) else {
            return Ok(None);
        };
        match key {
            MemberStatKey::Properties => member.member_properties += delta,
            MemberStatKey::Articles => member.member_articles += delta,
            MemberStatKey::Followers => member.member_followers += delta,
            MemberStatKey::Followings => member.member_followings += delta,
            MemberStatKey::Comments => member.member_comments += delta,
            MemberStatKey::Likes => member.member_likes += delta,
            MemberStatKey::Views => member.member_views += delta,
        }
        Ok(Some(member.clone()))
    }
}

pub struct MemoryLikeRepository(pub Arc<MemoryDb>);

#[async_trait]
impl LikeRepository for MemoryLikeRepository {
    async fn find_one(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>> {
        Ok(self
            .0
            .likes
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.member_id == *member_id && l.like_ref_id == *like_ref_id)
            .cloned())
    }

    async fn delete_one(
        &self,
        member_id: &ObjectId,
        like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>> {
        let mut likes = self.0.likes.lock().unwrap();
        let pos = likes
            .iter()
            .position(|l| l.member_id == *member_id && l.like_ref_id == *like_ref_id);
        Ok(pos.map(|i| likes.remove(i)))
    }

    async fn insert_one(&self, like: Like) -> ServiceResult<InsertOutcome> {
        let mut likes = self.0.likes.lock().unwrap();
        if likes
            .iter()
            .any(|l| l.member_id == like.member_id && l.like_ref_id == like.like_ref_id)
        {
            return Ok(InsertOutcome::Duplicate);
        }
        likes.push(like);
        Ok(InsertOutcome::Inserted)
    }

    async fn count_for_target(&self, like_ref_id: &ObjectId) -> ServiceResult<i64> {
        Ok(self
            .0
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.like_ref_id == *like_ref_id)
            .count() as i64)
    }

    async fn favorite_properties(
        &self,
        member_id: &ObjectId,
        page: &PageRequest,
    ) -> ServiceResult<FacetPage<Property>> {
        let liked: Vec<ObjectId> = self
            .0
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.member_id == *member_id)
            .map(|l| l.like_ref_id)
            .collect();
        let rows: Vec<Property> = self
            .0
            .properties
            .lock()
            .unwrap()
            .iter()
            .filter(|p| liked.contains(&p.id))
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }
}

pub struct MemoryViewRepository(pub Arc<MemoryDb>);

#[async_trait]
impl ViewRepository for MemoryViewRepository {
    async fn find_one(
        &self,
        member_id: &ObjectId,
        view_ref_id: &ObjectId,
        group: ViewGroup,
    ) -> ServiceResult<Option<View>> {
        Ok(self
            .0
            .views
            .lock()
            .unwrap()
            .iter()
            .find(|v| {
                v.member_id == *member_id && v.view_ref_id == *view_ref_id && v.view_group == group
            })
            .cloned())
    }

    async fn insert_one(&self, view: View) -> ServiceResult<InsertOutcome> {
        let mut views = self.0.views.lock().unwrap();
        if views.iter().any(|v| {
            v.member_id == view.member_id
                && v.view_ref_id == view.view_ref_id
                && v.view_group == view.view_group
        }) {
            return Ok(InsertOutcome::Duplicate);
        }
        views.push(view);
        Ok(InsertOutcome::Inserted)
    }

    async fn visited_properties(
        &self,
        member_id: &ObjectId,
        page: &PageRequest,
    ) -> ServiceResult<FacetPage<Property>> {
        let visited: Vec<ObjectId> = self
            .0
            .views
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.member_id == *member_id && v.view_group == ViewGroup::Property)
            .map(|v| v.view_ref_id)
            .collect();
        let rows: Vec<Property> = self
            .0
            .properties
            .lock()
            .unwrap()
            .iter()
            .filter(|p| visited.contains(&p.id))
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }
}

pub struct MemoryFollowRepository(pub Arc<MemoryDb>);

#[async_trait]
impl FollowRepository for MemoryFollowRepository {
    async fn find_one(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Option<Follow>> {
        Ok(self
            .0
            .follows
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.follower_id == *follower_id && f.following_id == *following_id)
            .cloned())
    }

    async fn insert_one(&self, follow: Follow) -> ServiceResult<InsertOutcome> {
        let mut follows = self.0.follows.lock().unwrap();
        if follows
            .iter()
            .any(|f| f.follower_id == follow.follower_id && f.following_id == follow.following_id)
        {
            return Ok(InsertOutcome::Duplicate);
        }
        follows.push(follow);
        Ok(InsertOutcome::Inserted)
    }

    async fn delete_one(
        &self,
        follower_id: &ObjectId,
        following_id: &ObjectId,
    ) -> ServiceResult<Option<Follow>> {
        let mut follows = self.0.follows.lock().unwrap();
        let pos = follows
            .iter()
            .position(|f| f.follower_id == *follower_id && f.following_id == *following_id);
        Ok(pos.map(|i| follows.remove(i)))
    }

    async fn list_followings(
        &self,
        follower_id: &ObjectId,
        page: &PageRequest,
        _viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Follow>> {
        let rows: Vec<Follow> = self
            .0
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == *follower_id)
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }

    async fn list_followers(
        &self,
        following_id: &ObjectId,
        page: &PageRequest,
        _viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Follow>> {
        let rows: Vec<Follow> = self
            .0
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.following_id == *following_id)
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }
}

pub struct MemoryPropertyRepository(pub Arc<MemoryDb>);

fn apply_property_patch(property: &mut Property, patch: &PropertyUpdate) {
    if let Some(v) = patch.property_type {
        property.property_type = v;
    }
    if let Some(v) = patch.property_status {
        property.property_status = v;
    }
    if let Some(v) = patch.property_location {
        property.property_location = v;
    }
    if let Some(v) = &patch.property_address {
        property.property_address = v.clone();
    }
    if let Some(v) = &patch.property_title {
        property.property_title = v.clone();
    }
    if let Some(v) = patch.property_price {
        property.property_price = v;
    }
    if let Some(v) = patch.property_square {
        property.property_square = v;
    }
    if let Some(v) = patch.property_beds {
        property.property_beds = v;
    }
    if let Some(v) = patch.property_rooms {
        property.property_rooms = v;
    }
    if let Some(v) = &patch.property_images {
        property.property_images = v.clone();
    }
    if let Some(v) = &patch.property_desc {
        property.property_desc = Some(v.clone());
    }
    if let Some(v) = patch.property_barter {
        property.property_barter = v;
    }
    if let Some(v) = patch.property_rent {
        property.property_rent = v;
    }
    if let Some(v) = patch.sold_at {
        property.sold_at = Some(v);
    }
    if let Some(v) = patch.deleted_at {
        property.deleted_at = Some(v);
    }
    if let Some(v) = patch.constructed_at {
        property.constructed_at = Some(v);
    }
    property.updated_at = DateTime::now();
}

#[async_trait]
impl PropertyRepository for MemoryPropertyRepository {
    async fn insert_one(&self, property: &Property) -> ServiceResult<()> {
        self.0.properties.lock().unwrap().push(property.clone());
        Ok(())
    }

    async fn find_active(&self, id: &ObjectId) -> ServiceResult<Option<Property>> {
        Ok(self
            .0
            .properties
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id && p.property_status == PropertyStatus::Active)
            .cloned())
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        owner: Option<&ObjectId>,
        patch: &PropertyUpdate,
    ) -> ServiceResult<Option<Property>> {
        let mut properties = self.0.properties.lock().unwrap();
        let Some(property) = properties.iter_mut().find(|p| {
            p.id == *id
                && p.property_status == PropertyStatus::Active
                && owner.map(|o| p.member_id == *o).unwrap_or(true)
        }) else {
            return Ok(None);
        };
        apply_property_patch(property, patch);
        Ok(Some(property.clone()))
    }

    async fn delete_terminal(&self, id: &ObjectId) -> ServiceResult<Option<Property>> {
        let mut properties = self.0.properties.lock().unwrap();
        let pos = properties
            .iter()
            .position(|p| p.id == *id && p.property_status == PropertyStatus::Delete);
        Ok(pos.map(|i| properties.remove(i)))
    }

    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: PropertyStatKey,
        delta: i64,
    ) -> ServiceResult<Option<Property>> {
        let mut properties = self.0.properties.lock().unwrap();
        let Some(property) = properties.iter_mut().find(|p| p.id == *id) else {
            return Ok(None);
        };
        match key {
            PropertyStatKey::Views => property.property_views += delta,
            PropertyStatKey::Likes => property.property_likes += delta,
            PropertyStatKey::Comments => property.property_comments += delta,
        }
        Ok(Some(property.clone()))
    }

    async fn list(
        &self,
        search: &PropertySearch,
        _sort: SortStage,
        page: (i64, i64),
        _viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Property>> {
        let rows: Vec<Property> = self
            .0
            .properties
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.property_status == PropertyStatus::Active)
            .filter(|p| {
                search
                    .location_list
                    .is_empty()
                    || search.location_list.contains(&p.property_location)
            })
            .cloned()
            .collect();
        Ok(page_of(rows, &PageRequest::new(page.0, page.1)))
    }

    async fn list_by_agent(
        &self,
        agent_id: &ObjectId,
        inquiry: &AgentPropertiesInquiry,
        _sort: SortStage,
    ) -> ServiceResult<FacetPage<Property>> {
        let rows: Vec<Property> = self
            .0
            .properties
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.member_id == *agent_id)
            .filter(|p| match inquiry.status {
                Some(status) => p.property_status == status,
                None => p.property_status != PropertyStatus::Delete,
            })
            .cloned()
            .collect();
        Ok(page_of(rows, &inquiry.page))
    }

    async fn list_all(
        &self,
        inquiry: &AllPropertiesInquiry,
        _sort: SortStage,
    ) -> ServiceResult<FacetPage<Property>> {
        let rows: Vec<Property> = self
            .0
            .properties
            .lock()
            .unwrap()
            .iter()
            .filter(|p| match inquiry.status {
                Some(status) => p.property_status == status,
                None => true,
            })
            .cloned()
            .collect();
        Ok(page_of(rows, &inquiry.page))
    }
}

pub struct MemoryArticleRepository(pub Arc<MemoryDb>);

#[async_trait]
impl ArticleRepository for MemoryArticleRepository {
    async fn insert_one(&self, article: &BoardArticle) -> ServiceResult<()> {
        self.0.articles.lock().unwrap().push(article.clone());
        Ok(())
    }

    async fn find_active(&self, id: &ObjectId) -> ServiceResult<Option<BoardArticle>> {
        Ok(self
            .0
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id && a.article_status == ArticleStatus::Active)
            .cloned())
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        owner: Option<&ObjectId>,
        patch: &ArticleUpdate,
    ) -> ServiceResult<Option<BoardArticle>> {
        let mut articles = self.0.articles.lock().unwrap();
        let Some(article) = articles.iter_mut().find(|a| {
            a.id == *id
                && a.article_status == ArticleStatus::Active
                && owner.map(|o| a.member_id == *o).unwrap_or(true)
        }) else {
            return Ok(None);
        };
        if let Some(v) = patch.article_category {
            article.article_category = v;
        }
        if let Some(v) = patch.article_status {
            article.article_status = v;
        }
        if let Some(v) = &patch.article_title {
            article.article_title = v.clone();
        }
        if let Some(v) = &patch.article_content {
            article.article_content = v.clone();
        }
        if let Some(v) = &patch.article_image {
            article.article_image = Some(v.clone());
        }
        article.updated_at = DateTime::now();
        Ok(Some(article.clone()))
    }

    async fn delete_terminal(&self, id: &ObjectId) -> ServiceResult<Option<BoardArticle>> {
        let mut articles = self.0.articles.lock().unwrap();
        let pos = articles
            .iter()
            .position(|a| a.id == *id && a.article_status == ArticleStatus::Delete);
        Ok(pos.map(|i| articles.remove(i)))
    }

    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: ArticleStatKey,
        delta: i64,
    ) -> ServiceResult<Option<BoardArticle>> {
        let mut articles = self.0.articles.lock().unwrap();
        let Some(article) = articles.iter_mut().find(|a| a.id == *id) else {
            return Ok(None);
        };
        match key {
            ArticleStatKey::Views => article.article_views += delta,
            ArticleStatKey::Likes => article.article_likes += delta,
            ArticleStatKey::Comments => article.article_comments += delta,
        }
        Ok(Some(article.clone()))
    }

    async fn list(
        &self,
        search: &ArticleSearch,
        _sort: SortStage,
        page: (i64, i64),
        _viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<BoardArticle>> {
        let rows: Vec<BoardArticle> = self
            .0
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.article_status == ArticleStatus::Active)
            .filter(|a| match search.article_category {
                Some(category) => a.article_category == category,
                None => true,
            })
            .cloned()
            .collect();
        Ok(page_of(rows, &PageRequest::new(page.0, page.1)))
    }

    async fn list_all(
        &self,
        inquiry: &AllArticlesInquiry,
        _sort: SortStage,
    ) -> ServiceResult<FacetPage<BoardArticle>> {
        let rows: Vec<BoardArticle> = self
            .0
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| match inquiry.status {
                Some(status) => a.article_status == status,
                None => true,
            })
            .cloned()
            .collect();
        Ok(page_of(rows, &inquiry.page))
    }
}

pub struct MemoryCommentRepository(pub Arc<MemoryDb>);

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn insert_one(&self, comment: &Comment) -> ServiceResult<()> {
        self.0.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        patch: &CommentUpdate,
    ) -> ServiceResult<Option<Comment>> {
        let mut comments = self.0.comments.lock().unwrap();
        let Some(comment) = comments.iter_mut().find(|c| {
            c.id == *id && c.member_id == *owner && c.comment_status == CommentStatus::Active
        }) else {
            return Ok(None);
        };
        if let Some(v) = patch.comment_status {
            comment.comment_status = v;
        }
        if let Some(v) = &patch.comment_content {
            comment.comment_content = v.clone();
        }
        comment.updated_at = DateTime::now();
        Ok(Some(comment.clone()))
    }

    async fn list(
        &self,
        comment_ref_id: &ObjectId,
        _sort: SortStage,
        page: (i64, i64),
    ) -> ServiceResult<FacetPage<Comment>> {
        let rows: Vec<Comment> = self
            .0
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                c.comment_ref_id == *comment_ref_id && c.comment_status == CommentStatus::Active
            })
            .cloned()
            .collect();
        Ok(page_of(rows, &PageRequest::new(page.0, page.1)))
    }
}

pub struct MemoryNoticeRepository(pub Arc<MemoryDb>);

#[async_trait]
impl NoticeRepository for MemoryNoticeRepository {
    async fn insert_one(&self, notice: &Notice) -> ServiceResult<()> {
        self.0.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }

    async fn list_active(&self) -> ServiceResult<FacetPage<Notice>> {
        let mut rows: Vec<Notice> = self
            .0
            .notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.notice_status == NoticeStatus::Active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = rows.len() as i64;
        Ok(FacetPage::new(rows, total))
    }
}

/// Notice store double whose writes always fail.
pub struct FailingNoticeRepository;

#[async_trait]
impl NoticeRepository for FailingNoticeRepository {
    async fn insert_one(&self, _notice: &Notice) -> ServiceResult<()> {
        Err(ServiceError::Database("connection reset".to_string()))
    }

    async fn list_active(&self) -> ServiceResult<FacetPage<Notice>> {
        Err(ServiceError::Database("connection reset".to_string()))
    }
}

pub struct MemoryNotificationRepository(pub Arc<MemoryDb>);

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn insert_one(&self, notification: &Notification) -> ServiceResult<()> {
        self.0
            .notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }

    async fn mark_read(
        &self,
        id: &ObjectId,
        receiver_id: &ObjectId,
    ) -> ServiceResult<Option<Notification>> {
        let mut notifications = self.0.notifications.lock().unwrap();
        let Some(notification) = notifications
            .iter_mut()
            .find(|n| n.id == *id && n.receiver_id == *receiver_id)
        else {
            return Ok(None);
        };
        notification.notification_status = NotificationStatus::Read;
        notification.updated_at = DateTime::now();
        Ok(Some(notification.clone()))
    }

    async fn list_waiting(&self, receiver_id: &ObjectId) -> ServiceResult<FacetPage<Notification>> {
        let rows: Vec<Notification> = self
            .0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| {
                n.receiver_id == *receiver_id && n.notification_status == NotificationStatus::Wait
            })
            .cloned()
            .collect();
        Ok(page_of(rows, &PageRequest::new(1, 100)))
    }
}

/// Notification store double that always fails, for exercising the
/// best-effort boundary around fan-out.
pub struct FailingNotificationRepository;

#[async_trait]
impl NotificationRepository for FailingNotificationRepository {
    async fn insert_one(&self, _notification: &Notification) -> ServiceResult<()> {
        Err(ServiceError::Database("connection reset".to_string()))
    }

    async fn mark_read(
        &self,
        _id: &ObjectId,
        _receiver_id: &ObjectId,
    ) -> ServiceResult<Option<Notification>> {
        Err(ServiceError::Database("connection reset".to_string()))
    }

    async fn list_waiting(
        &self,
        _receiver_id: &ObjectId,
    ) -> ServiceResult<FacetPage<Notification>> {
        Err(ServiceError::Database("connection reset".to_string()))
    }
}

/// Like store double whose inserts always fail; reads behave as an
/// empty store so the toggle reaches its insert path.
pub struct FailingLikeRepository;

#[async_trait]
impl LikeRepository for FailingLikeRepository {
    async fn find_one(
        &self,
        _member_id: &ObjectId,
        _like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>> {
        Ok(None)
    }

    async fn delete_one(
        &self,
        _member_id: &ObjectId,
        _like_ref_id: &ObjectId,
    ) -> ServiceResult<Option<Like>> {
        Ok(None)
    }

    async fn insert_one(&self, _like: Like) -> ServiceResult<InsertOutcome> {
        Err(ServiceError::Database("connection reset".to_string()))
    }

    async fn count_for_target(&self, _like_ref_id: &ObjectId) -> ServiceResult<i64> {
        Ok(0)
    }

    async fn favorite_properties(
        &self,
        _member_id: &ObjectId,
        _page: &PageRequest,
    ) -> ServiceResult<FacetPage<Property>> {
        Ok(FacetPage::default())
    }
}

// ---------------------------------------------------------------------------
// Wiring helpers
// ---------------------------------------------------------------------------

/// Fully wired service layer over one in-memory store.
pub struct TestApp {
    pub db: Arc<MemoryDb>,
    pub channel: Arc<RecordingChannel>,
    pub properties: PropertyService,
    pub articles: ArticleService,
    pub comments: CommentService,
    pub follows: FollowService,
    pub likes: LikeService,
    pub views: ViewService,
    pub notices: NoticeService,
    pub notifications: NotificationService,
}

impl TestApp {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDb::default());
        let channel = Arc::new(RecordingChannel::default());

        let members = Arc::new(MemoryMemberRepository(db.clone()));
        let property_repo = Arc::new(MemoryPropertyRepository(db.clone()));
        let article_repo = Arc::new(MemoryArticleRepository(db.clone()));
        let like_repo = Arc::new(MemoryLikeRepository(db.clone()));
        let follow_repo = Arc::new(MemoryFollowRepository(db.clone()));
        let view_repo = Arc::new(MemoryViewRepository(db.clone()));
        let comment_repo = Arc::new(MemoryCommentRepository(db.clone()));
        let notice_repo = Arc::new(MemoryNoticeRepository(db.clone()));
        let notification_repo = Arc::new(MemoryNotificationRepository(db.clone()));

        let notifications = NotificationService::new(notification_repo, channel.clone());
        let likes = LikeService::new(like_repo);
        let notices = NoticeService::new(notice_repo);
        let views = ViewService::new(view_repo);
        let follows = FollowService::new(follow_repo, members.clone(), notifications.clone());
        let properties = PropertyService::new(
            property_repo.clone(),
            members.clone(),
            likes.clone(),
            views.clone(),
            notifications.clone(),
        );
        let articles = ArticleService::new(
            article_repo.clone(),
            members.clone(),
            likes.clone(),
            views.clone(),
            notifications.clone(),
        );
        let comments = CommentService::new(
            comment_repo,
            members,
            property_repo,
            article_repo,
            notifications.clone(),
        );

        Self {
            db,
            channel,
            properties,
            articles,
            comments,
            follows,
            likes,
            views,
            notices,
            notifications,
        }
    }
}
