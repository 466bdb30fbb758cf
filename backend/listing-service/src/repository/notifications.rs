use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, DateTime};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::mongo::run_facet;
use crate::domain::models::{Notification, NotificationStatus};
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{facet, MatchStage, SortStage};
use crate::query::FacetPage;

/// Unread notifications are capped to one fixed page.
const WAITING_PAGE_LIMIT: i64 = 100;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert_one(&self, notification: &Notification) -> ServiceResult<()>;

    /// Flip WAIT -> READ, scoped to the receiver; `None` when the
    /// notification doesn't exist or belongs to someone else.
    async fn mark_read(
        &self,
        id: &ObjectId,
        receiver_id: &ObjectId,
    ) -> ServiceResult<Option<Notification>>;

    /// Newest-first WAIT notifications for a receiver.
    async fn list_waiting(
        &self,
        receiver_id: &ObjectId,
    ) -> ServiceResult<FacetPage<Notification>>;
}

#[derive(Clone)]
pub struct MongoNotificationRepository {
    notifications: Collection<Notification>,
}

impl MongoNotificationRepository {
    pub fn new(notifications: Collection<Notification>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    async fn insert_one(&self, notification: &Notification) -> ServiceResult<()> {
        self.notifications
            .insert_one(notification)
            .await
            .map(|_| ())
            .map_err(ServiceError::database)
    }

    async fn mark_read(
        &self,
        id: &ObjectId,
        receiver_id: &ObjectId,
    ) -> ServiceResult<Option<Notification>> {
        let read = bson::to_bson(&NotificationStatus::Read).map_err(ServiceError::database)?;
        self.notifications
            .find_one_and_update(
                doc! { "_id": id, "receiverId": receiver_id },
                doc! { "$set": { "notificationStatus": read, "updatedAt": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(ServiceError::database)
    }

    async fn list_waiting(
        &self,
        receiver_id: &ObjectId,
    ) -> ServiceResult<FacetPage<Notification>> {
        let wait = bson::to_bson(&NotificationStatus::Wait).map_err(ServiceError::database)?;
        let matcher = MatchStage::new()
            .eq("receiverId", *receiver_id)
            .eq("notificationStatus", wait);
        let pipeline = vec![
            matcher.to_document(),
            SortStage::created_desc().to_document(),
            facet(1, WAITING_PAGE_LIMIT, Vec::new()),
        ];
        run_facet(&self.notifications, pipeline).await
    }
}
