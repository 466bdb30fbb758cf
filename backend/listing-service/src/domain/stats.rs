//! Stats ledger keys.
//!
//! Denormalized counters are mutated through exactly one path: a
//! repository `apply_stat_delta` call carrying one of these closed keys
//! and a signed delta, executed as a single atomic `$inc` on the owning
//! document. No other code writes counter fields.

/// Counter fields on a member document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatKey {
    Properties,
    Articles,
    Followers,
    Followings,
    Comments,
    Likes,
    Views,
}

impl MemberStatKey {
    pub fn field(&self) -> &'static str {
        match self {
            MemberStatKey::Properties => "memberProperties",
            MemberStatKey::Articles => "memberArticles",
            MemberStatKey::Followers => "memberFollowers",
            MemberStatKey::Followings => "memberFollowings",
            MemberStatKey::Comments => "memberComments",
            MemberStatKey::Likes => "memberLikes",
            MemberStatKey::Views => "memberViews",
        }
    }
}

/// Counter fields on a property document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyStatKey {
    Views,
    Likes,
    Comments,
}

impl PropertyStatKey {
    pub fn field(&self) -> &'static str {
        match self {
            PropertyStatKey::Views => "propertyViews",
            PropertyStatKey::Likes => "propertyLikes",
            PropertyStatKey::Comments => "propertyComments",
        }
    }
}

/// Counter fields on a board article document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleStatKey {
    Views,
    Likes,
    Comments,
}

impl ArticleStatKey {
    pub fn field(&self) -> &'static str {
        match self {
            ArticleStatKey::Views => "articleViews",
            ArticleStatKey::Likes => "articleLikes",
            ArticleStatKey::Comments => "articleComments",
        }
    }
}
