//! Normalization of externally supplied identifiers.
//!
//! Ids cross the API boundary either as raw hex text or already shaped
//! into `ObjectId` by an upstream layer; both forms normalize to the
//! same internal type.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Parse a textual identifier into the internal reference type.
pub fn shape_into_object_id(raw: &str) -> ServiceResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| ServiceError::InvalidIdentifier)
}

/// An externally supplied reference id, tolerant of already-typed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefId {
    Typed(ObjectId),
    Text(String),
}

impl RefId {
    /// Normalize into an `ObjectId`. Idempotent for typed input.
    pub fn normalize(&self) -> ServiceResult<ObjectId> {
        match self {
            RefId::Typed(id) => Ok(*id),
            RefId::Text(raw) => shape_into_object_id(raw),
        }
    }
}

impl From<ObjectId> for RefId {
    fn from(id: ObjectId) -> Self {
        RefId::Typed(id)
    }
}

impl From<&str> for RefId {
    fn from(raw: &str) -> Self {
        RefId::Text(raw.to_string())
    }
}
