use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::domain::models::Member;
use crate::domain::stats::MemberStatKey;
use crate::error::{ServiceError, ServiceResult};

/// Member store. `apply_stat_delta` is the single sanctioned path for
/// mutating member aggregate counters.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> ServiceResult<Option<Member>>;

    /// Atomic `$inc` on one counter; `None` when no member matches.
    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: MemberStatKey,
        delta: i64,
    ) -> ServiceResult<Option<Member>>;
}

#[derive(Clone)]
pub struct MongoMemberRepository {
    members: Collection<Member>,
}

impl MongoMemberRepository {
    pub fn new(members: Collection<Member>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl MemberRepository for MongoMemberRepository {
    async fn find_by_id(&self, id: &ObjectId) -> ServiceResult<Option<Member>> {
        self.members
            .find_one(doc! { "_id": id })
            .await
            .map_err(ServiceError::database)
    }

    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: MemberStatKey,
        delta: i64,
    ) -> ServiceResult<Option<Member>> {
        self.members
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$inc": { key.field(): delta } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(ServiceError::database)
    }
}
