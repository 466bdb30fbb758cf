//! Persistent document models and their closed enums.
//!
//! Field names serialize in camelCase to match the collections' wire
//! shape; enrichment fields (`meLiked`, `memberData`, ...) are only
//! populated by aggregation lookups and default to empty on plain reads.

use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberType {
    User,
    Agent,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberStatus {
    Active,
    Block,
    Delete,
}

/// Member profile with denormalized aggregate counters.
///
/// Counters are mutated only through the stats ledger
/// ([`crate::domain::stats::MemberStatKey`]); writing them directly is a
/// correctness violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub member_type: MemberType,
    pub member_status: MemberStatus,
    pub member_nick: String,
    pub member_phone: String,
    #[serde(default)]
    pub member_image: Option<String>,
    pub member_properties: i64,
    pub member_articles: i64,
    pub member_followers: i64,
    pub member_followings: i64,
    pub member_comments: i64,
    pub member_likes: i64,
    pub member_views: i64,
    pub member_rank: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    /// Viewer's like-state toward this member, `$lookup`-populated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub me_liked: Vec<MeLiked>,
    /// Viewer's follow-state toward this member, `$lookup`-populated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub me_followed: Vec<MeFollowed>,
}

impl Member {
    pub fn new(member_type: MemberType, nick: &str, phone: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            member_type,
            member_status: MemberStatus::Active,
            member_nick: nick.to_string(),
            member_phone: phone.to_string(),
            member_image: None,
            member_properties: 0,
            member_articles: 0,
            member_followers: 0,
            member_followings: 0,
            member_comments: 0,
            member_likes: 0,
            member_views: 0,
            member_rank: 0,
            created_at: now,
            updated_at: now,
            me_liked: Vec::new(),
            me_followed: Vec::new(),
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyType {
    Apartment,
    Villa,
    House,
    Office,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyStatus {
    Active,
    Sold,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyLocation {
    Central,
    North,
    South,
    East,
    West,
    Riverside,
    Harbor,
}

/// Property listing. Status transitions are one-way toward SOLD/DELETE;
/// a terminal transition decrements the owner's `memberProperties`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub member_id: ObjectId,
    pub property_type: PropertyType,
    pub property_status: PropertyStatus,
    pub property_location: PropertyLocation,
    pub property_address: String,
    pub property_title: String,
    pub property_price: i64,
    pub property_square: i64,
    pub property_beds: i32,
    pub property_rooms: i32,
    pub property_views: i64,
    pub property_likes: i64,
    pub property_comments: i64,
    pub property_rank: i64,
    pub property_images: Vec<String>,
    #[serde(default)]
    pub property_desc: Option<String>,
    #[serde(default)]
    pub property_barter: bool,
    #[serde(default)]
    pub property_rent: bool,
    #[serde(default)]
    pub sold_at: Option<DateTime>,
    #[serde(default)]
    pub deleted_at: Option<DateTime>,
    #[serde(default)]
    pub constructed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub me_liked: Vec<MeLiked>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_data: Option<Member>,
}

// ============================================================================
// Board articles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArticleCategory {
    Free,
    Recommend,
    News,
    Humor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArticleStatus {
    Active,
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardArticle {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub member_id: ObjectId,
    pub article_category: ArticleCategory,
    pub article_status: ArticleStatus,
    pub article_title: String,
    pub article_content: String,
    #[serde(default)]
    pub article_image: Option<String>,
    pub article_views: i64,
    pub article_likes: i64,
    pub article_comments: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub me_liked: Vec<MeLiked>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_data: Option<Member>,
}

// ============================================================================
// Engagement records
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LikeGroup {
    Member,
    Property,
    Article,
}

/// Active like relationship. Existence is the source of truth for
/// "currently liked"; a unique index on (memberId, likeRefId) is the
/// backstop against concurrent double-insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub member_id: ObjectId,
    pub like_ref_id: ObjectId,
    pub like_group: LikeGroup,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Like {
    pub fn new(member_id: ObjectId, like_ref_id: ObjectId, like_group: LikeGroup) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            member_id,
            like_ref_id,
            like_group,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lookup projection carrying the requester's like-state for one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeLiked {
    pub member_id: ObjectId,
    pub like_ref_id: ObjectId,
    pub my_favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub follower_id: ObjectId,
    pub following_id: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub me_liked: Vec<MeLiked>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub me_followed: Vec<MeFollowed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_data: Option<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_data: Option<Member>,
}

impl Follow {
    pub fn new(follower_id: ObjectId, following_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            follower_id,
            following_id,
            created_at: now,
            updated_at: now,
            me_liked: Vec::new(),
            me_followed: Vec::new(),
            follower_data: None,
            following_data: None,
        }
    }
}

/// Lookup projection carrying the requester's follow-state for one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeFollowed {
    pub follower_id: ObjectId,
    pub following_id: ObjectId,
    pub my_following: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewGroup {
    Member,
    Property,
    Article,
}

/// First-occurrence view record; at most one per (member, target, group)
/// triple, ever. No expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub member_id: ObjectId,
    pub view_ref_id: ObjectId,
    pub view_group: ViewGroup,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl View {
    pub fn new(member_id: ObjectId, view_ref_id: ObjectId, view_group: ViewGroup) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            member_id,
            view_ref_id,
            view_group,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentGroup {
    Member,
    Property,
    Article,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentStatus {
    Active,
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub member_id: ObjectId,
    pub comment_group: CommentGroup,
    pub comment_status: CommentStatus,
    pub comment_ref_id: ObjectId,
    pub comment_content: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_data: Option<Member>,
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoticeCategory {
    Faq,
    Event,
    Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoticeStatus {
    Hold,
    Active,
    Delete,
}

/// Admin-authored site notice; a distinct entity from the per-member
/// notification records, surfaced to everyone while ACTIVE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub notice_category: NoticeCategory,
    pub notice_status: NoticeStatus,
    pub notice_title: String,
    pub notice_content: String,
    pub member_id: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    Like,
    Comment,
    Follow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationStatus {
    Wait,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationGroup {
    Member,
    Article,
    Property,
}

/// Notification record, created only as a side effect of a positive
/// social action and surfaced until marked READ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub notification_group: NotificationGroup,
    pub notification_type: NotificationType,
    pub notification_status: NotificationStatus,
    pub notification_title: String,
    pub notification_desc: String,
    pub author_id: ObjectId,
    pub receiver_id: ObjectId,
    #[serde(default)]
    pub property_id: Option<ObjectId>,
    #[serde(default)]
    pub article_id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
