//! Property orchestration: create/read/update/remove plus the
//! engagement paths that keep the denormalized counters in sync.

use std::sync::Arc;

use bson::oid::ObjectId;
use bson::DateTime;
use tracing::info;

use super::like::LikeService;
use super::notification::NotificationService;
use super::view::ViewService;
use crate::domain::input::{NotificationInput, PropertyInput, PropertyUpdate};
use crate::domain::inquiry::{
    AgentPropertiesInquiry, AllPropertiesInquiry, OrdinaryInquiry, PropertiesInquiry,
    AVAILABLE_PROPERTY_SORTS,
};
use crate::domain::models::{
    LikeGroup, NotificationGroup, NotificationType, Property, PropertyStatus, ViewGroup,
};
use crate::domain::stats::{MemberStatKey, PropertyStatKey};
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;
use crate::repository::members::MemberRepository;
use crate::repository::properties::PropertyRepository;

#[derive(Clone)]
pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    members: Arc<dyn MemberRepository>,
    likes: LikeService,
    views: ViewService,
    notifier: NotificationService,
}

impl PropertyService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        members: Arc<dyn MemberRepository>,
        likes: LikeService,
        views: ViewService,
        notifier: NotificationService,
    ) -> Self {
        Self {
            properties,
            members,
            likes,
            views,
            notifier,
        }
    }

    /// Persist a new listing and credit the owner's content counter.
    pub async fn create_property(
        &self,
        member_id: &ObjectId,
        input: PropertyInput,
    ) -> ServiceResult<Property> {
        let property = input.into_property(*member_id);
        self.properties
            .insert_one(&property)
            .await
            .map_err(|_| ServiceError::CreateFailed)?;
        self.members
            .apply_stat_delta(member_id, MemberStatKey::Properties, 1)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        Ok(property)
    }

    /// Fetch an ACTIVE listing; a present requester records a view
    /// (first one bumps the counter) and gets their like-state attached.
    pub async fn get_property(
        &self,
        viewer: Option<&ObjectId>,
        property_id: &ObjectId,
    ) -> ServiceResult<Property> {
        let mut property = self
            .properties
            .find_active(property_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;

        if let Some(viewer) = viewer {
            let first_view = self
                .views
                .record_view(viewer, property_id, ViewGroup::Property)
                .await?;
            if first_view {
                let updated = self
                    .properties
                    .apply_stat_delta(property_id, PropertyStatKey::Views, 1)
                    .await?
                    .ok_or(ServiceError::UpdateFailed)?;
                property.property_views = updated.property_views;
            }
            property.me_liked = self.likes.check_like_existence(viewer, property_id).await?;
        }

        property.member_data = Some(
            self.members
                .find_by_id(&property.member_id)
                .await?
                .ok_or(ServiceError::NoDataFound)?,
        );
        Ok(property)
    }

    /// Owner-scoped conditional update.
    pub async fn update_property(
        &self,
        owner_id: &ObjectId,
        property_id: &ObjectId,
        patch: PropertyUpdate,
    ) -> ServiceResult<Property> {
        self.apply_update(Some(owner_id), property_id, patch).await
    }

    /// Admin variant, unscoped by owner.
    pub async fn update_property_by_admin(
        &self,
        property_id: &ObjectId,
        patch: PropertyUpdate,
    ) -> ServiceResult<Property> {
        self.apply_update(None, property_id, patch).await
    }

    async fn apply_update(
        &self,
        owner_id: Option<&ObjectId>,
        property_id: &ObjectId,
        mut patch: PropertyUpdate,
    ) -> ServiceResult<Property> {
        // Terminal transitions are stamped here; both stamps also mean
        // the listing leaves the owner's active content count.
        match patch.property_status {
            Some(PropertyStatus::Sold) => patch.sold_at = Some(DateTime::now()),
            Some(PropertyStatus::Delete) => patch.deleted_at = Some(DateTime::now()),
            _ => {}
        }
        let terminal = patch.sold_at.is_some() || patch.deleted_at.is_some();
        let updated = self
            .properties
            .update_one(property_id, owner_id, &patch)
            .await?
            .ok_or(ServiceError::UpdateFailed)?;
        if terminal {
            self.members
                .apply_stat_delta(&updated.member_id, MemberStatKey::Properties, -1)
                .await?
                .ok_or(ServiceError::UpdateFailed)?;
        }
        Ok(updated)
    }

    /// Hard delete, admin only, and only out of the DELETE status.
    pub async fn remove_property_by_admin(
        &self,
        property_id: &ObjectId,
    ) -> ServiceResult<Property> {
        let removed = self
            .properties
            .delete_terminal(property_id)
            .await?
            .ok_or(ServiceError::RemoveFailed)?;
        info!(%property_id, "property hard-deleted");
        Ok(removed)
    }

    pub async fn get_properties(
        &self,
        viewer: Option<&ObjectId>,
        inquiry: &PropertiesInquiry,
    ) -> ServiceResult<FacetPage<Property>> {
        inquiry.page.validate()?;
        let sort = inquiry.sorting.resolve(AVAILABLE_PROPERTY_SORTS)?;
        self.properties
            .list(
                &inquiry.search,
                sort,
                (inquiry.page.page, inquiry.page.limit),
                viewer,
            )
            .await
    }

    pub async fn get_agent_properties(
        &self,
        agent_id: &ObjectId,
        inquiry: &AgentPropertiesInquiry,
    ) -> ServiceResult<FacetPage<Property>> {
        if inquiry.status == Some(PropertyStatus::Delete) {
            return Err(ServiceError::NotAllowed);
        }
        inquiry.page.validate()?;
        let sort = inquiry.sorting.resolve(AVAILABLE_PROPERTY_SORTS)?;
        self.properties.list_by_agent(agent_id, inquiry, sort).await
    }

    pub async fn get_all_properties_by_admin(
        &self,
        inquiry: &AllPropertiesInquiry,
    ) -> ServiceResult<FacetPage<Property>> {
        inquiry.page.validate()?;
        let sort = inquiry.sorting.resolve(AVAILABLE_PROPERTY_SORTS)?;
        self.properties.list_all(inquiry, sort).await
    }

    /// Toggle the requester's like on an ACTIVE listing, apply the
    /// signed delta to the like counter, and notify the owner on the
    /// positive transition only.
    pub async fn like_target_property(
        &self,
        member_id: &ObjectId,
        property_id: &ObjectId,
    ) -> ServiceResult<Property> {
        let target = self
            .properties
            .find_active(property_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;

        let modifier = self
            .likes
            .toggle_like(member_id, property_id, LikeGroup::Property)
            .await?;
        let updated = self
            .properties
            .apply_stat_delta(property_id, PropertyStatKey::Likes, modifier)
            .await?
            .ok_or(ServiceError::SomethingWentWrong)?;

        if modifier == 1 {
            self.notifier
                .notify(NotificationInput {
                    notification_group: NotificationGroup::Property,
                    notification_type: NotificationType::Like,
                    notification_title: "Property liked!".to_string(),
                    notification_desc: "Someone liked your property!".to_string(),
                    author_id: *member_id,
                    receiver_id: target.member_id,
                    property_id: Some(*property_id),
                    article_id: None,
                })
                .await;
        }
        Ok(updated)
    }

    pub async fn get_favorites(
        &self,
        member_id: &ObjectId,
        inquiry: &OrdinaryInquiry,
    ) -> ServiceResult<FacetPage<Property>> {
        self.likes.get_favorite_properties(member_id, inquiry).await
    }

    pub async fn get_visited(
        &self,
        member_id: &ObjectId,
        inquiry: &OrdinaryInquiry,
    ) -> ServiceResult<FacetPage<Property>> {
        self.views.get_visited_properties(member_id, inquiry).await
    }

    /// Repair path for counter drift: recompute the like counter from
    /// the true record count and fold the difference through the ledger.
    pub async fn reconcile_like_counter(&self, property_id: &ObjectId) -> ServiceResult<Property> {
        let property = self
            .properties
            .find_active(property_id)
            .await?
            .ok_or(ServiceError::NoDataFound)?;
        let actual = self.likes.count_likes(property_id).await?;
        let drift = actual - property.property_likes;
        if drift == 0 {
            return Ok(property);
        }
        info!(%property_id, drift, "reconciling like counter");
        self.properties
            .apply_stat_delta(property_id, PropertyStatKey::Likes, drift)
            .await?
            .ok_or(ServiceError::UpdateFailed)
    }
}
