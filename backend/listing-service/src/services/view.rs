//! First-occurrence view recording.

use std::sync::Arc;

use bson::oid::ObjectId;
use tracing::debug;

use crate::domain::inquiry::OrdinaryInquiry;
use crate::domain::models::{Property, View, ViewGroup};
use crate::error::ServiceResult;
use crate::query::FacetPage;
use crate::repository::views::ViewRepository;
use crate::repository::InsertOutcome;

#[derive(Clone)]
pub struct ViewService {
    views: Arc<dyn ViewRepository>,
}

impl ViewService {
    pub fn new(views: Arc<dyn ViewRepository>) -> Self {
        Self { views }
    }

    /// Record a view for the (member, target, group) triple.
    ///
    /// Returns `true` exactly once per triple; callers use the result
    /// to decide whether the view counter gets its +1. A concurrent
    /// first view is settled by the unique index: the insert loser
    /// reports `false`.
    pub async fn record_view(
        &self,
        member_id: &ObjectId,
        view_ref_id: &ObjectId,
        group: ViewGroup,
    ) -> ServiceResult<bool> {
        if self
            .views
            .find_one(member_id, view_ref_id, group)
            .await?
            .is_some()
        {
            return Ok(false);
        }
        let outcome = self
            .views
            .insert_one(View::new(*member_id, *view_ref_id, group))
            .await?;
        let is_first = outcome == InsertOutcome::Inserted;
        if is_first {
            debug!(%member_id, %view_ref_id, "first view recorded");
        }
        Ok(is_first)
    }

    /// Properties the member has viewed.
    pub async fn get_visited_properties(
        &self,
        member_id: &ObjectId,
        inquiry: &OrdinaryInquiry,
    ) -> ServiceResult<FacetPage<Property>> {
        inquiry.page.validate()?;
        self.views.visited_properties(member_id, &inquiry.page).await
    }
}
