use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::mongo::run_facet;
use crate::domain::input::ArticleUpdate;
use crate::domain::inquiry::{AllArticlesInquiry, ArticleSearch};
use crate::domain::models::{ArticleStatus, BoardArticle};
use crate::domain::stats::ArticleStatKey;
use crate::error::{ServiceError, ServiceResult};
use crate::query::stages::{
    facet, lookup_auth_member_liked, lookup_member, unwind, MatchStage, SortStage,
};
use crate::query::FacetPage;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn insert_one(&self, article: &BoardArticle) -> ServiceResult<()>;

    async fn find_active(&self, id: &ObjectId) -> ServiceResult<Option<BoardArticle>>;

    async fn update_one(
        &self,
        id: &ObjectId,
        owner: Option<&ObjectId>,
        patch: &ArticleUpdate,
    ) -> ServiceResult<Option<BoardArticle>>;

    async fn delete_terminal(&self, id: &ObjectId) -> ServiceResult<Option<BoardArticle>>;

    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: ArticleStatKey,
        delta: i64,
    ) -> ServiceResult<Option<BoardArticle>>;

    async fn list(
        &self,
        search: &ArticleSearch,
        sort: SortStage,
        page: (i64, i64),
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<BoardArticle>>;

    async fn list_all(
        &self,
        inquiry: &AllArticlesInquiry,
        sort: SortStage,
    ) -> ServiceResult<FacetPage<BoardArticle>>;
}

#[derive(Clone)]
pub struct MongoArticleRepository {
    articles: Collection<BoardArticle>,
}

impl MongoArticleRepository {
    pub fn new(articles: Collection<BoardArticle>) -> Self {
        Self { articles }
    }
}

fn status_bson(status: ArticleStatus) -> ServiceResult<Bson> {
    bson::to_bson(&status).map_err(ServiceError::database)
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
impl ArticleRepository for MongoArticleRepository {
    async fn insert_one(&self, article: &BoardArticle) -> ServiceResult<()> {
        self.articles
            .insert_one(article)
            .await
            .map(|_| ())
            .map_err(ServiceError::database)
    }

    async fn find_active(&self, id: &ObjectId) -> ServiceResult<Option<BoardArticle>> {
        self.articles
            .find_one(doc! { "_id": id, "articleStatus": status_bson(ArticleStatus::Active)? })
            .await
            .map_err(ServiceError::database)
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        owner: Option<&ObjectId>,
        patch: &ArticleUpdate,
    ) -> ServiceResult<Option<BoardArticle>> {
        let mut filter =
            doc! { "_id": id, "articleStatus": status_bson(ArticleStatus::Active)? };
        if let Some(owner) = owner {
            filter.insert("memberId", owner);
        }
        let mut set = bson::to_document(patch).map_err(ServiceError::database)?;
        set.insert("updatedAt", DateTime::now());
        self.articles
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(ServiceError::database)
    }

    async fn delete_terminal(&self, id: &ObjectId) -> ServiceResult<Option<BoardArticle>> {
        self.articles
            .find_one_and_delete(
                doc! { "_id": id, "articleStatus": status_bson(ArticleStatus::Delete)? },
            )
            .await
            .map_err(ServiceError::database)
    }

    async fn apply_stat_delta(
        &self,
        id: &ObjectId,
        key: ArticleStatKey,
        delta: i64,
    ) -> ServiceResult<Option<BoardArticle>> {
        self.articles
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
        search: &ArticleSearch,
        sort: SortStage,
        page: (i64, i64),
        viewer: Option<&ObjectId>,
    ) -> ServiceResult<FacetPage<BoardArticle>> {
        let mut matcher =
            MatchStage::new().eq("articleStatus", status_bson(ArticleStatus::Active)?);
        if let Some(category) = search.article_category {
            matcher = matcher.eq(
                "articleCategory",
                bson::to_bson(&category).map_err(ServiceError::database)?,
            );
        }
        if let Some(member_id) = &search.member_id {
            matcher = matcher.eq("memberId", member_id.normalize()?);
        }
        if let Some(text) = &search.text {
            matcher = matcher.contains("articleTitle", text);
        }
        run_facet(&self.articles, listing_pipeline(matcher, sort, page, viewer)).await
    }

    async fn list_all(
        &self,
        inquiry: &AllArticlesInquiry,
        sort: SortStage,
    ) -> ServiceResult<FacetPage<BoardArticle>> {
        let mut matcher = MatchStage::new();
        if let Some(status) = inquiry.status {
            matcher = matcher.eq("articleStatus", status_bson(status)?);
        }
        if let Some(category) = inquiry.category {
            matcher = matcher.eq(
                "articleCategory",
                bson::to_bson(&category).map_err(ServiceError::database)?,
            );
        }
        let page = (inquiry.page.page, inquiry.page.limit);
        run_facet(&self.articles, listing_pipeline(matcher, sort, page, None)).await
    }
}
