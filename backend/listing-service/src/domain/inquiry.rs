//! Typed listing inquiries, one discriminated shape per entity.
//!
//! Page and limit are 1-based; the sort field must come from the
//! per-entity whitelist. Violations surface as `BadRequest` before any
//! pipeline is built.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use super::ids::RefId;
use super::models::{
    ArticleCategory, ArticleStatus, PropertyLocation, PropertyStatus, PropertyType,
};
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{Direction, SortStage};

pub const AVAILABLE_PROPERTY_SORTS: &[&str] = &[
    "createdAt",
    "updatedAt",
    "propertyLikes",
    "propertyViews",
    "propertyRank",
    "propertyPrice",
];
pub const AVAILABLE_ARTICLE_SORTS: &[&str] =
    &["createdAt", "updatedAt", "articleLikes", "articleViews"];
pub const AVAILABLE_COMMENT_SORTS: &[&str] = &["createdAt", "updatedAt"];

/// 1-based page request; `skip = (page-1) * limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.page < 1 || self.limit < 1 {
            return Err(ServiceError::BadRequest);
        }
        Ok(())
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Requested ordering; defaults to `createdAt` DESC.
#[derive(Debug, Clone, Default)]
pub struct Sorting {
    pub sort: Option<String>,
    pub direction: Option<Direction>,
}

impl Sorting {
    /// Resolve against a per-entity whitelist.
    pub fn resolve(&self, allowed: &[&str]) -> ServiceResult<SortStage> {
        let field = self.sort.as_deref().unwrap_or("createdAt");
        if !allowed.contains(&field) {
            return Err(ServiceError::BadRequest);
        }
        Ok(SortStage::new(
            field,
            self.direction.unwrap_or(Direction::Desc),
        ))
    }
}

/// Inclusive `[start, end]` bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    pub start: T,
    pub end: T,
}

/// Boolean option flags a property search may OR over; a closed
/// whitelist, not free-form field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyOption {
    Barter,
    Rent,
}

impl PropertyOption {
    pub fn field(&self) -> &'static str {
        match self {
            PropertyOption::Barter => "propertyBarter",
            PropertyOption::Rent => "propertyRent",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PropertySearch {
    pub member_id: Option<RefId>,
    pub location_list: Vec<PropertyLocation>,
    pub type_list: Vec<PropertyType>,
    pub rooms_list: Vec<i32>,
    pub beds_list: Vec<i32>,
    pub options: Vec<PropertyOption>,
    pub prices_range: Option<Range<i64>>,
    pub squares_range: Option<Range<i64>>,
    pub periods_range: Option<Range<DateTime<Utc>>>,
    pub text: Option<String>,
}

/// Member-facing property listing: ACTIVE only, full search shaping.
#[derive(Debug, Clone, Default)]
pub struct PropertiesInquiry {
    pub page: PageRequest,
    pub sorting: Sorting,
    pub search: PropertySearch,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Agent-scoped listing; searching the DELETE status is not allowed.
#[derive(Debug, Clone, Default)]
pub struct AgentPropertiesInquiry {
    pub page: PageRequest,
    pub sorting: Sorting,
    pub status: Option<PropertyStatus>,
}

/// Admin listing, unscoped.
#[derive(Debug, Clone, Default)]
pub struct AllPropertiesInquiry {
    pub page: PageRequest,
    pub sorting: Sorting,
    pub status: Option<PropertyStatus>,
    pub location_list: Vec<PropertyLocation>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleSearch {
    pub article_category: Option<ArticleCategory>,
    pub member_id: Option<RefId>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticlesInquiry {
    pub page: PageRequest,
    pub sorting: Sorting,
    pub search: ArticleSearch,
}

#[derive(Debug, Clone, Default)]
pub struct AllArticlesInquiry {
    pub page: PageRequest,
    pub sorting: Sorting,
    pub status: Option<ArticleStatus>,
    pub category: Option<ArticleCategory>,
}

/// Comment listing scoped to one target; the ref id is required.
#[derive(Debug, Clone)]
pub struct CommentsInquiry {
    pub page: PageRequest,
    pub sorting: Sorting,
    pub comment_ref_id: RefId,
}

/// Follow listing; exactly one side of the edge is the required search
/// key depending on direction.
#[derive(Debug, Clone, Default)]
pub struct FollowInquiry {
    pub page: PageRequest,
    pub follower_id: Option<ObjectId>,
    pub following_id: Option<ObjectId>,
}

/// Page-only inquiry for favorites/visited listings.
#[derive(Debug, Clone, Default)]
pub struct OrdinaryInquiry {
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_limit_must_be_at_least_one() {
        assert!(PageRequest::new(0, 10).validate().is_err());
        assert!(PageRequest::new(1, 0).validate().is_err());
        assert!(PageRequest::new(1, 1).validate().is_ok());
    }

    #[test]
    fn skip_math() {
        assert_eq!(PageRequest::new(1, 10).skip(), 0);
        assert_eq!(PageRequest::new(2, 10).skip(), 10);
        assert_eq!(PageRequest::new(4, 7).skip(), 21);
    }

    #[test]
    fn sort_defaults_to_created_at_desc() {
        let stage = Sorting::default().resolve(AVAILABLE_PROPERTY_SORTS).unwrap();
        assert_eq!(stage.field, "createdAt");
        assert_eq!(stage.direction, Direction::Desc);
    }

    #[test]
    fn sort_field_outside_whitelist_is_rejected() {
        let sorting = Sorting {
            sort: Some("memberPhone".into()),
            direction: None,
        };
        assert!(matches!(
            sorting.resolve(AVAILABLE_PROPERTY_SORTS),
            Err(ServiceError::BadRequest)
        ));
    }
}
