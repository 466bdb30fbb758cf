//! Notification fan-out.
//!
//! Notifications are created only as a side effect of positive social
//! actions (like applied, new follow, new comment), never by a primary
//! user mutation, and never for removals. Channel publication is best
//! effort and does not roll back the create.

use std::sync::Arc;

use bson::oid::ObjectId;
use tracing::warn;

use super::events::{EventChannel, NOTIFICATION_TOPIC};
use crate::domain::input::NotificationInput;
use crate::domain::models::Notification;
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;
use crate::repository::notifications::NotificationRepository;

#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    channel: Arc<dyn EventChannel>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        channel: Arc<dyn EventChannel>,
    ) -> Self {
        Self {
            notifications,
            channel,
        }
    }

    /// Persist a notification, then push a delivery event.
    pub async fn create_notification(&self, input: NotificationInput) -> ServiceResult<()> {
        let notification = input.into_notification();
        let receiver_id = notification.receiver_id;
        self.notifications
            .insert_one(&notification)
            .await
            .map_err(|_| ServiceError::CreateFailed)?;
        self.channel.publish(NOTIFICATION_TOPIC, receiver_id);
        Ok(())
    }

    /// Fan-out variant for side-effect call sites: failures are logged
    /// and never propagate into the primary mutation's result.
    pub async fn notify(&self, input: NotificationInput) {
        if let Err(err) = self.create_notification(input).await {
            warn!("notification fan-out failed: {err}");
        }
    }

    /// Flip one notification to READ, scoped to its receiver, and
    /// re-surface the delivery event.
    pub async fn mark_read(
        &self,
        notification_id: &ObjectId,
        receiver_id: &ObjectId,
    ) -> ServiceResult<Notification> {
        let updated = self
            .notifications
            .mark_read(notification_id, receiver_id)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        self.channel.publish(NOTIFICATION_TOPIC, updated.receiver_id);
        Ok(updated)
    }

    /// Unread notifications for a receiver, newest first.
    pub async fn get_notifications(
        &self,
        receiver_id: &ObjectId,
    ) -> ServiceResult<FacetPage<Notification>> {
        self.notifications.list_waiting(receiver_id).await
    }
}
