use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::mongo::run_facet;
use crate::domain::input::PropertyUpdate;
use crate::domain::inquiry::{
    AgentPropertiesInquiry, AllPropertiesInquiry, PropertySearch,
};
use crate::domain::models::{Property, PropertyStatus};
use crate::domain::stats::PropertyStatKey;
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{
    facet, lookup_auth_member_liked, lookup_member, unwind, MatchStage, SortStage,
};
use crate::query::FacetPage;

/// Property store: conditional writes scoped by status (and owner for
/// non-admin updates), atomic counter deltas, and facet listings.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn insert_one(&self, property: &Property) -> ServiceResult<()>;

    async fn find_active(&self, id: &ObjectId) -> ServiceResult<Option<Property>>;

    /// Conditional update matching id + ACTIVE status, plus owner when
    /// given; returns the updated document or `None` on no match.
    async fn update_one(
        &self,
        id: &ObjectId,
        owner: Option<&ObjectId>,
        patch: &PropertyUpdate,
    ) -> ServiceResult<Option<Property>>;

    /// Hard delete, only when the document already sits in DELETE.
    async fn delete_terminal(&self, id: &ObjectId) -> ServiceResult<Option<Property>>;

    /// Atomic `$inc` on one counter; `None` when no property matches.
    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: PropertyStatKey,
        delta: i64,
    ) -> ServiceResult<Option<Property>>;

    /// Member-facing listing over ACTIVE properties.
    async fn list(
        &self,
        search: &PropertySearch,
        sort: SortStage,
        page: (i64, i64),
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Property>>;

    /// Agent-scoped listing; `None` status means "everything but DELETE".
    async fn list_by_agent(
        &self,
        agent_id: &ObjectId,
        inquiry: &AgentPropertiesInquiry,
        sort: SortStage,
    ) -> ServiceResult<FacetPage<Property>>;

    /// Admin listing, unscoped.
    async fn list_all(
        &self,
        inquiry: &AllPropertiesInquiry,
        sort: SortStage,
    ) -> ServiceResult<FacetPage<Property>>;
}

#[derive(Clone)]
pub struct MongoPropertyRepository {
    properties: Collection<Property>,
}

impl MongoPropertyRepository {
    pub fn new(properties: Collection<Property>) -> Self {
        Self { properties }
    }
}

fn status_bson(status: PropertyStatus) -> ServiceResult<Bson> {
    bson::to_bson(&status).map_err(ServiceError::database)
}

/// Lower the typed search bag into match conditions.
fn shape_match(search: &PropertySearch) -> ServiceResult<MatchStage> {
    let mut matcher = MatchStage::new().eq("propertyStatus", status_bson(PropertyStatus::Active)?);
    if let Some(member_id) = &search.member_id {
        matcher = matcher.eq("memberId", member_id.normalize()?);
    }
    if !search.location_list.is_empty() {
        let values = to_bson_list(&search.location_list)?;
        matcher = matcher.within("propertyLocation", values);
    }
    if !search.type_list.is_empty() {
        let values = to_bson_list(&search.type_list)?;
        matcher = matcher.within("propertyType", values);
    }
    if !search.rooms_list.is_empty() {
        let values = search.rooms_list.iter().map(|n| Bson::Int32(*n)).collect();
        matcher = matcher.within("propertyRooms", values);
    }
    if !search.beds_list.is_empty() {
        let values = search.beds_list.iter().map(|n| Bson::Int32(*n)).collect();
        matcher = matcher.within("propertyBeds", values);
    }
    if let Some(range) = &search.prices_range {
        matcher = matcher.range("propertyPrice", range.start, range.end);
    }
    if let Some(range) = &search.squares_range {
        matcher = matcher.range("propertySquare", range.start, range.end);
    }
    if let Some(range) = &search.periods_range {
        matcher = matcher.range(
            "createdAt",
            DateTime::from_chrono(range.start),
            DateTime::from_chrono(range.end),
        );
    }
    if let Some(text) = &search.text {
        matcher = matcher.contains("propertyTitle", text);
    }
    if !search.options.is_empty() {
        matcher = matcher.any_flag_of(search.options.iter().map(|o| o.field()).collect());
    }
    Ok(matcher)
}

fn to_bson_list<T: serde::Serialize>(values: &[T]) -> ServiceResult<Vec<Bson>> {
    values
        .iter()
        .map(|v| bson::to_bson(v).map_err(ServiceError::database))
        .collect()
}

fn listing_pipeline(
    matcher: MatchStage,
    sort: SortStage,
    page: (i64, i64),
    viewer: Option<&ObjectId>,
) -> Vec<Document> {
    let mut enrichments = Vec::new();
    if viewer.is_some() {
        enrichments.push(lookup_auth_member_liked(viewer, "$_id"));
    }
    enrichments.push(lookup_member());
    enrichments.push(unwind("$memberData"));
    vec![
        matcher.to_document(),
        sort.to_document(),
        facet(page.0, page.1, enrichments),
    ]
}

#[async_trait]
impl PropertyRepository for MongoPropertyRepository {
    async fn insert_one(&self, property: &Property) -> ServiceResult<()> {
        self.properties
            .insert_one(property)
            .await
            .map(|_| ())
            .map_err(ServiceError::database)
    }

    async fn find_active(&self, id: &ObjectId) -> ServiceResult<Option<Property>> {
        self.properties
            .find_one(doc! { "_id": id, "propertyStatus": status_bson(PropertyStatus::Active)? })
            .await
            .map_err(ServiceError::database)
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        owner: Option<&ObjectId>,
        patch: &PropertyUpdate,
    ) -> ServiceResult<Option<Property>> {
        let mut filter =
            doc! { "_id": id, "propertyStatus": status_bson(PropertyStatus::Active)? };
        if let Some(owner) = owner {
            filter.insert("memberId", owner);
        }
        let mut set = bson::to_document(patch).map_err(ServiceError::database)?;
        set.insert("updatedAt", DateTime::now());
        self.properties
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(ServiceError::database)
    }

    async fn delete_terminal(&self, id: &ObjectId) -> ServiceResult<Option<Property>> {
        self.properties
            .find_one_and_delete(
                doc! { "_id": id, "propertyStatus": status_bson(PropertyStatus::Delete)? },
            )
            .await
            .map_err(ServiceError::database)
    }

    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: PropertyStatKey,
        delta: i64,
    ) -> ServiceResult<Option<Property>> {
        self.properties
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$inc": { key.field(): delta } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(ServiceError::database)
    }

    async fn list(
        &self,
        search: &PropertySearch,
        sort: SortStage,
        page: (i64, i64),
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<Property>> {
        let matcher = shape_match(search)?;
        run_facet(&self.properties, listing_pipeline(matcher, sort, page, viewer)).await
    }

    async fn list_by_agent(
        &self,
        agent_id: &ObjectId,
        inquiry: &AgentPropertiesInquiry,
        sort: SortStage,
    ) -> ServiceResult<FacetPage<Property>> {
        let mut matcher = MatchStage::new().eq("memberId", *agent_id);
        matcher = match inquiry.status {
            Some(status) => matcher.eq("propertyStatus", status_bson(status)?),
            None => matcher.ne("propertyStatus", status_bson(PropertyStatus::Delete)?),
        };
        let page = (inquiry.page.page, inquiry.page.limit);
        run_facet(&self.properties, listing_pipeline(matcher, sort, page, None)).await
    }

    async fn list_all(
        &self,
        inquiry: &AllPropertiesInquiry,
        sort: SortStage,
    ) -> ServiceResult<FacetPage<Property>> {
        let mut matcher = MatchStage::new();
        if let Some(status) = inquiry.status {
            matcher = matcher.eq("propertyStatus", status_bson(status)?);
        }
        if !inquiry.location_list.is_empty() {
            matcher = matcher.within("propertyLocation", to_bson_list(&inquiry.location_list)?);
        }
        let page = (inquiry.page.page, inquiry.page.limit);
        run_facet(&self.properties, listing_pipeline(matcher, sort, page, None)).await
    }
}
