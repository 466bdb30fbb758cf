use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use mongodb::Collection;
use serde::Deserialize;

use super::mongo::{self, run_facet};
use super::InsertOutcome;
use crate::domain::inquiry::PageRequest;
use crate::domain::models::{Property, View, ViewGroup};
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{facet, lookup, unwind, MatchStage, SortStage};
use crate::query::{Direction, FacetPage};

/// First-view record store; the unique (memberId, viewRefId, viewGroup)
/// index guarantees at most one record ever per triple.
#[async_trait]
pub trait ViewRepository: Send + Sync {
    async fn find_one(
        &self,
        member_id: &ObjectId,
        view_ref_id: &ObjectId,
        group: ViewGroup,
    ) -> ServiceResult<Option<View>>;

    async fn insert_one(&self, view: View) -> ServiceResult<InsertOutcome>;

    /// Properties the member has viewed, newest first, with owner data.
    async fn visited_properties(
        &self,
        member_id: &ObjectId,
        page: &PageRequest,
    ) -> ServiceResult<FacetPage<Property>>;
}

#[derive(Clone)]
pub struct MongoViewRepository {
    views: Collection<View>,
}

impl MongoViewRepository {
    pub fn new(views: Collection<View>) -> Self {
        Self { views }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisitedRow {
    visited_property: Property,
}

#[async_trait]
impl ViewRepository for MongoViewRepository {
    async fn find_one(
        &self,
        member_id: &ObjectId,
        view_ref_id: &ObjectId,
        group: ViewGroup,
    ) -> ServiceResult<Option<View>> {
        let group = bson::to_bson(&group).map_err(ServiceError::database)?;
        self.views
            .find_one(doc! {
                "memberId": member_id,
                "viewRefId": view_ref_id,
                "viewGroup": group,
            })
            .await
            .map_err(ServiceError::database)
    }

    async fn insert_one(&self, view: View) -> ServiceResult<InsertOutcome> {
        match self.views.insert_one(&view).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if mongo::is_duplicate_key(&err) => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(ServiceError::database(err)),
        }
    }

    async fn visited_properties(
        &self,
        member_id: &ObjectId,
        page: &PageRequest,
    ) -> ServiceResult<FacetPage<Property>> {
        let matcher = MatchStage::new()
            .eq(
                "viewGroup",
                bson::to_bson(&ViewGroup::Property).map_err(ServiceError::database)?,
            )
            .eq("memberId", *member_id);
        let pipeline = vec![
            matcher.to_document(),
            SortStage::new("updatedAt", Direction::Desc).to_document(),
            lookup(mongo::PROPERTIES, "viewRefId", "_id", "visitedProperty"),
            unwind("$visitedProperty"),
            facet(
                page.page,
                page.limit,
                vec![
                    lookup(
                        mongo::MEMBERS,
                        "visitedProperty.memberId",
                        "_id",
                        "visitedProperty.memberData",
                    ),
                    unwind("$visitedProperty.memberData"),
                ],
            ),
        ];
        let rows: FacetPage<VisitedRow> = run_facet(&self.views, pipeline).await?;
        Ok(rows.map(|row| row.visited_property))
    }
}
