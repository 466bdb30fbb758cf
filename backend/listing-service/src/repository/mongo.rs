//! Shared MongoDB plumbing: typed collection handles, unique indexes
//! for the engagement collections, duplicate-key detection and facet
//! pipeline execution.

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::models::{
    BoardArticle, Comment, Follow, Like, Member, Notice, Notification, Property, View,
};
use crate::error::{ServiceError, ServiceResult};
use crate::query::FacetPage;

pub const MEMBERS: &str = "members";
pub const PROPERTIES: &str = "properties";
pub const ARTICLES: &str = "boardArticles";
pub const LIKES: &str = "likes";
pub const FOLLOWS: &str = "follows";
pub const VIEWS: &str = "views";
pub const COMMENTS: &str = "comments";
pub const NOTICES: &str = "notices";
pub const NOTIFICATIONS: &str = "notifications";

const DUPLICATE_KEY: i32 = 11000;

/// Typed handles for every collection the service touches.
#[derive(Clone)]
pub struct Collections {
    pub members: Collection<Member>,
    pub properties: Collection<Property>,
    pub articles: Collection<BoardArticle>,
    pub likes: Collection<Like>,
    pub follows: Collection<Follow>,
    pub views: Collection<View>,
    pub comments: Collection<Comment>,
    pub notices: Collection<Notice>,
    pub notifications: Collection<Notification>,
}

impl Collections {
    pub fn new(db: &Database) -> Self {
        Self {
            members: db.collection(MEMBERS),
            properties: db.collection(PROPERTIES),
            articles: db.collection(ARTICLES),
            likes: db.collection(LIKES),
            follows: db.collection(FOLLOWS),
            views: db.collection(VIEWS),
            comments: db.collection(COMMENTS),
            notices: db.collection(NOTICES),
            notifications: db.collection(NOTIFICATIONS),
        }
    }

    /// Unique indexes backing the at-most-one invariants on the
    /// engagement collections.
    pub async fn ensure_indexes(&self) -> ServiceResult<()> {
        self.likes
            .create_index(unique_index(doc! { "memberId": 1, "likeRefId": 1 }))
            .await
            .map_err(ServiceError::database)?;
        self.follows
            .create_index(unique_index(doc! { "followerId": 1, "followingId": 1 }))
            .await
            .map_err(ServiceError::database)?;
        self.views
            .create_index(unique_index(
                doc! { "memberId": 1, "viewRefId": 1, "viewGroup": 1 },
            ))
            .await
            .map_err(ServiceError::database)?;
        info!("unique engagement indexes ensured");
        Ok(())
    }
}

fn unique_index(keys: Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

/// Whether a driver error is a unique-index violation.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == DUPLICATE_KEY,
        ErrorKind::Command(cmd_err) => cmd_err.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// Execute a facet pipeline and deserialize its single result document.
///
/// An aggregate yielding no document at all is `NoDataFound`; zero
/// matches still yields a facet document with an empty list.
pub async fn run_facet<R, T>(
    collection: &Collection<R>,
    pipeline: Vec<Document>,
) -> ServiceResult<FacetPage<T>>
where
    R: Send + Sync,
    T: DeserializeOwned,
{
    let mut cursor = collection
        .aggregate(pipeline)
        .await
        .map_err(ServiceError::database)?;
    let facet_doc = cursor
        .try_next()
        .await
        .map_err(ServiceError::database)?
        .ok_or(ServiceError::NoDataFound)?;
    bson::from_document(facet_doc).map_err(ServiceError::database)
}
