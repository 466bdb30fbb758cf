//! Application wiring.
//!
//! Builds the repository layer over a MongoDB database handle and stacks
//! the services on top. Everything behind `AppContext` is cheaply
//! cloneable, so transport layers can share one context.

use std::sync::Arc;

use mongodb::Database;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::repository::articles::MongoArticleRepository;
use crate::repository::comments::MongoCommentRepository;
use crate::repository::follows::MongoFollowRepository;
use crate::repository::likes::MongoLikeRepository;
use crate::repository::members::MongoMemberRepository;
use crate::repository::mongo::Collections;
use crate::repository::notices::MongoNoticeRepository;
use crate::repository::notifications::MongoNotificationRepository;
use crate::repository::properties::MongoPropertyRepository;
use crate::repository::views::MongoViewRepository;
use crate::services::events::{BoundedEventChannel, DeliveryEvent};
use crate::services::{
    ArticleService, CommentService, FollowService, LikeService, NoticeService,
    NotificationService, PropertyService, ViewService,
};

/// Fully wired service layer.
#[derive(Clone)]
pub struct AppContext {
    pub properties: PropertyService,
    pub articles: ArticleService,
    pub comments: CommentService,
    pub follows: FollowService,
    pub likes: LikeService,
    pub views: ViewService,
    pub notices: NoticeService,
    pub notifications: NotificationService,
}

impl AppContext {
    /// Wire repositories and services over `db`. Returns the context
    /// together with the receiving half of the delivery channel, which
    /// the caller hands to the delivery worker.
    pub fn new(config: &Config, db: &Database) -> (Self, mpsc::Receiver<DeliveryEvent>) {
        let collections = Collections::new(db);

        let members = Arc::new(MongoMemberRepository::new(collections.members.clone()));
        let property_repo = Arc::new(MongoPropertyRepository::new(collections.properties.clone()));
        let article_repo = Arc::new(MongoArticleRepository::new(collections.articles.clone()));
        let like_repo = Arc::new(MongoLikeRepository::new(collections.likes.clone()));
        let follow_repo = Arc::new(MongoFollowRepository::new(collections.follows.clone()));
        let view_repo = Arc::new(MongoViewRepository::new(collections.views.clone()));
        let comment_repo = Arc::new(MongoCommentRepository::new(collections.comments.clone()));
        let notice_repo = Arc::new(MongoNoticeRepository::new(collections.notices.clone()));
        let notification_repo = Arc::new(MongoNotificationRepository::new(
            collections.notifications.clone(),
        ));

        let (channel, rx) = BoundedEventChannel::new(config.channel.capacity);

        let notifications = NotificationService::new(notification_repo, Arc::new(channel));
        let notices = NoticeService::new(notice_repo);
        let likes = LikeService::new(like_repo);
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

        let context = Self {
            properties,
            articles,
            comments,
            follows,
            likes,
            views,
            notices,
            notifications,
        };
        (context, rx)
    }
}
