//! Typed aggregation stage builders.
//!
//! Stage values are assembled by the repositories and lowered to bson
//! documents in one place so the wire shape stays uniform: `$match`
//! carries literals, `{$in}`, inclusive `{$gte,$lte}` ranges and
//! case-insensitive substring regexes; `$sort` is a single whitelisted
//! field; pagination is `$skip (page-1)*limit` then `$limit`;
//! enrichment is a fixed set of `$lookup` shapes.

use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use serde::{Deserialize, Serialize};

/// Sort direction, numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_i32(&self) -> i32 {
        match self {
            Direction::Asc => 1,
            Direction::Desc => -1,
        }
    }
}

/// One field condition inside a `$match` stage.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// Exact literal match.
    Eq(Bson),
    /// Negated literal match.
    Ne(Bson),
    /// Inclusion-list match, `{$in: [...]}`.
    In(Vec<Bson>),
    /// Inclusive `[start, end]` range, `{$gte, $lte}`.
    Range { start: Bson, end: Bson },
    /// Case-insensitive substring match.
    Contains(String),
}

impl FieldFilter {
    fn lower(&self) -> Bson {
        match self {
            FieldFilter::Eq(value) => value.clone(),
            FieldFilter::Ne(value) => Bson::Document(doc! { "$ne": value.clone() }),
            FieldFilter::In(values) => Bson::Document(doc! { "$in": values.clone() }),
            FieldFilter::Range { start, end } => {
                Bson::Document(doc! { "$gte": start.clone(), "$lte": end.clone() })
            }
            FieldFilter::Contains(text) => {
                Bson::Document(doc! { "$regex": text.clone(), "$options": "i" })
            }
        }
    }
}

/// Builder for a `$match` stage: ANDed field conditions plus an
/// optional `$or` group over boolean option flags.
#[derive(Debug, Clone, Default)]
pub struct MatchStage {
    fields: Vec<(String, FieldFilter)>,
    any_flag_of: Vec<&'static str>,
}

impl MatchStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.fields.push((field.to_string(), FieldFilter::Eq(value.into())));
        self
    }

    pub fn ne(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.fields.push((field.to_string(), FieldFilter::Ne(value.into())));
        self
    }

    pub fn within(mut self, field: &str, values: Vec<Bson>) -> Self {
        self.fields.push((field.to_string(), FieldFilter::In(values)));
        self
    }

    pub fn range(mut self, field: &str, start: impl Into<Bson>, end: impl Into<Bson>) -> Self {
        self.fields.push((
            field.to_string(),
            FieldFilter::Range {
                start: start.into(),
                end: end.into(),
            },
        ));
        self
    }

    pub fn contains(mut self, field: &str, text: &str) -> Self {
        self.fields
            .push((field.to_string(), FieldFilter::Contains(text.to_string())));
        self
    }

    /// OR-group over boolean option flags: `$or: [{flag: true}, ...]`.
    pub fn any_flag_of(mut self, flags: Vec<&'static str>) -> Self {
        self.any_flag_of = flags;
        self
    }

    pub fn to_document(&self) -> Document {
        let mut inner = Document::new();
        for (field, filter) in &self.fields {
            inner.insert(field.clone(), filter.lower());
        }
        if !self.any_flag_of.is_empty() {
            let branches: Vec<Bson> = self
                .any_flag_of
                .iter()
                .map(|flag| Bson::Document(doc! { *flag: true }))
                .collect();
            inner.insert("$or", branches);
        }
        doc! { "$match": inner }
    }
}

/// Single-field `$sort` stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortStage {
    pub field: String,
    pub direction: Direction,
}

impl SortStage {
    pub fn new(field: &str, direction: Direction) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }

    /// Default ordering: newest first.
    pub fn created_desc() -> Self {
        Self::new("createdAt", Direction::Desc)
    }

    pub fn to_document(&self) -> Document {
        doc! { "$sort": { self.field.clone(): self.direction.as_i32() } }
    }
}

/// `$skip`/`$limit` pair; skip is applied before limit.
pub fn paginate(page: i64, limit: i64) -> (Document, Document) {
    (
        doc! { "$skip": (page - 1) * limit },
        doc! { "$limit": limit },
    )
}

/// Plain foreign-key `$lookup`.
pub fn lookup(from: &str, local_field: &str, foreign_field: &str, as_field: &str) -> Document {
    doc! {
        "$lookup": {
            "from": from,
            "localField": local_field,
            "foreignField": foreign_field,
            "as": as_field,
        }
    }
}

/// Owner-profile enrichment: joins the owning member as `memberData`.
pub fn lookup_member() -> Document {
    lookup("members", "memberId", "_id", "memberData")
}

pub fn unwind(path: &str) -> Document {
    doc! { "$unwind": path }
}

fn viewer_bson(viewer: Option<&ObjectId>) -> Bson {
    match viewer {
        Some(id) => Bson::ObjectId(*id),
        // An anonymous requester joins nothing and the state list stays empty.
        None => Bson::Null,
    }
}

/// Requester like-state enrichment (`meLiked`). `target_ref` is the
/// row field holding the likeable id, e.g. `"$_id"` or `"$followingId"`.
pub fn lookup_auth_member_liked(viewer: Option<&ObjectId>, target_ref: &str) -> Document {
    doc! {
        "$lookup": {
            "from": "likes",
            "let": {
                "localLikeRefId": target_ref,
                "localMemberId": viewer_bson(viewer),
                "localMyFavorite": true,
            },
            "pipeline": [
                {
                    "$match": {
                        "$expr": {
                            "$and": [
                                { "$eq": ["$likeRefId", "$$localLikeRefId"] },
                                { "$eq": ["$memberId", "$$localMemberId"] },
                            ],
                        },
                    },
                },
                {
                    "$project": {
                        "_id": 0,
                        "memberId": 1,
                        "likeRefId": 1,
                        "myFavorite": "$$localMyFavorite",
                    },
                },
            ],
            "as": "meLiked",
        }
    }
}

/// Requester follow-state enrichment (`meFollowed`). `following_ref`
/// is the row field holding the candidate member id.
pub fn lookup_auth_member_followed(viewer: Option<&ObjectId>, following_ref: &str) -> Document {
    doc! {
        "$lookup": {
            "from": "follows",
            "let": {
                "localFollowerId": viewer_bson(viewer),
                "localFollowingId": following_ref,
                "localMyFollowing": true,
            },
            "pipeline": [
                {
                    "$match": {
                        "$expr": {
                            "$and": [
                                { "$eq": ["$followerId", "$$localFollowerId"] },
                                { "$eq": ["$followingId", "$$localFollowingId"] },
                            ],
                        },
                    },
                },
                {
                    "$project": {
                        "_id": 0,
                        "followerId": 1,
                        "followingId": 1,
                        "myFollowing": "$$localMyFollowing",
                    },
                },
            ],
            "as": "meFollowed",
        }
    }
}

/// `$facet` stage producing the page and the pre-pagination total in
/// one pass: `list` = skip, limit, then enrichment lookups;
/// `metaCounter` = `[{$count: "total"}]`.
pub fn facet(page: i64, limit: i64, enrichments: Vec<Document>) -> Document {
    let (skip, take) = paginate(page, limit);
    let mut list: Vec<Bson> = vec![Bson::Document(skip), Bson::Document(take)];
    list.extend(enrichments.into_iter().map(Bson::Document));
    doc! {
        "$facet": {
            "list": list,
            "metaCounter": [{ "$count": "total" }],
        }
    }
}
