//! Mutation payloads: create inputs and conditional-update patches.
//!
//! Patches serialize with `skip_serializing_if` so the store layer can
//! turn them into partial `$set` documents without touching untouched
//! fields.

use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::models::{
    ArticleCategory, ArticleStatus, BoardArticle, CommentGroup, CommentStatus, Notice,
    NoticeCategory, NoticeStatus, Notification, NotificationGroup, NotificationStatus,
    NotificationType, Property, PropertyLocation, PropertyStatus, PropertyType,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub property_type: PropertyType,
    pub property_location: PropertyLocation,
    pub property_address: String,
    pub property_title: String,
    pub property_price: i64,
    pub property_square: i64,
    pub property_beds: i32,
    pub property_rooms: i32,
    pub property_images: Vec<String>,
    #[serde(default)]
    pub property_desc: Option<String>,
    #[serde(default)]
    pub property_barter: bool,
    #[serde(default)]
    pub property_rent: bool,
    #[serde(default)]
    pub constructed_at: Option<DateTime>,
}

impl PropertyInput {
    /// Materialize a new ACTIVE property owned by `member_id`.
    pub fn into_property(self, member_id: ObjectId) -> Property {
        let now = DateTime::now();
        Property {
            id: ObjectId::new(),
            member_id,
            property_type: self.property_type,
            property_status: PropertyStatus::Active,
            property_location: self.property_location,
            property_address: self.property_address,
            property_title: self.property_title,
            property_price: self.property_price,
            property_square: self.property_square,
            property_beds: self.property_beds,
            property_rooms: self.property_rooms,
            property_views: 0,
            property_likes: 0,
            property_comments: 0,
            property_rank: 0,
            property_images: self.property_images,
            property_desc: self.property_desc,
            property_barter: self.property_barter,
            property_rent: self.property_rent,
            sold_at: None,
            deleted_at: None,
            constructed_at: self.constructed_at,
            created_at: now,
            updated_at: now,
            me_liked: Vec::new(),
            member_data: None,
        }
    }
}

/// Partial update for an ACTIVE property. Terminal status transitions
/// are stamped by the service before the patch reaches the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_status: Option<PropertyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_location: Option<PropertyLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_square: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_beds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_rooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_barter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_rent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructed_at: Option<DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub article_category: ArticleCategory,
    pub article_title: String,
    pub article_content: String,
    #[serde(default)]
    pub article_image: Option<String>,
}

impl ArticleInput {
    pub fn into_article(self, member_id: ObjectId) -> BoardArticle {
        let now = DateTime::now();
        BoardArticle {
            id: ObjectId::new(),
            member_id,
            article_category: self.article_category,
            article_status: ArticleStatus::Active,
            article_title: self.article_title,
            article_content: self.article_content,
            article_image: self.article_image,
            article_views: 0,
            article_likes: 0,
            article_comments: 0,
            created_at: now,
            updated_at: now,
            me_liked: Vec::new(),
            member_data: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_category: Option<ArticleCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_status: Option<ArticleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
}

#[derive(Debug, Clone)]
pub struct CommentInput {
    pub comment_group: CommentGroup,
    pub comment_ref_id: super::ids::RefId,
    pub comment_content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_status: Option<CommentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeInput {
    pub notice_category: NoticeCategory,
    pub notice_title: String,
    pub notice_content: String,
}

impl NoticeInput {
    /// Materialize a new ACTIVE notice authored by `member_id`.
    pub fn into_notice(self, member_id: ObjectId) -> Notice {
        let now = DateTime::now();
        Notice {
            id: ObjectId::new(),
            notice_category: self.notice_category,
            notice_status: NoticeStatus::Active,
            notice_title: self.notice_title,
            notice_content: self.notice_content,
            member_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationInput {
    pub notification_group: NotificationGroup,
    pub notification_type: NotificationType,
    pub notification_title: String,
    pub notification_desc: String,
    pub author_id: ObjectId,
    pub receiver_id: ObjectId,
    pub property_id: Option<ObjectId>,
    pub article_id: Option<ObjectId>,
}

impl NotificationInput {
    pub fn into_notification(self) -> Notification {
        let now = DateTime::now();
        Notification {
            id: ObjectId::new(),
            notification_group: self.notification_group,
            notification_type: self.notification_type,
            notification_status: NotificationStatus::Wait,
            notification_title: self.notification_title,
            notification_desc: self.notification_desc,
            author_id: self.author_id,
            receiver_id: self.receiver_id,
            property_id: self.property_id,
            article_id: self.article_id,
            created_at: now,
            updated_at: now,
        }
    }
}
