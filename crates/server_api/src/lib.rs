use std::sync::Arc;

use shared::{
    domain::{
        Article, ArticleDraft, ArticleId, ArticlePatch, ArticleStatus, Category,
        ALL_CATEGORIES_LABEL,
    },
    error::ApiError,
    protocol::{
        AdminArticleQuery, ArticleListQuery, DashboardStats, LikeResponse, DEFAULT_PAGE_LIMIT,
        MAX_PAGE_LIMIT,
    },
};
use storage::{ArticleStore, SessionFlag};
use tracing::{debug, info};

pub mod auth;
pub mod views;

pub use auth::{
    authorize_admin, is_authenticated, login, logout, AdminSession, CredentialVerifier,
    StaticCredentials, TokenConfig,
};

#[derive(Clone)]
pub struct ApiContext {
    pub store: ArticleStore,
    pub session: SessionFlag,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub tokens: TokenConfig,
}

/// Public listing: published articles only, newest first.
pub fn list_articles(
    ctx: &ApiContext,
    query: &ArticleListQuery,
) -> Result<Vec<Article>, ApiError> {
    let category = parse_category_filter(query.category.as_deref())?;
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let matching = ctx
        .store
        .list(category)
        .into_iter()
        .filter(|article| article.status == ArticleStatus::Published)
        .filter(|article| search.map_or(true, |s| article.title.contains(s)));
    Ok(paginate(matching, query.skip, query.limit))
}

pub fn get_article(ctx: &ApiContext, id: ArticleId) -> Result<Article, ApiError> {
    ctx.store
        .get(id)
        .ok_or_else(|| ApiError::article_not_found(id))
}

/// Like [`get_article`], but drafts are reported as missing.
pub fn get_published_article(ctx: &ApiContext, id: ArticleId) -> Result<Article, ApiError> {
    ctx.store
        .get(id)
        .filter(|article| article.status == ArticleStatus::Published)
        .ok_or_else(|| ApiError::article_not_found(id))
}

pub fn like_article(ctx: &ApiContext, id: ArticleId) -> Result<LikeResponse, ApiError> {
    let likes = ctx
        .store
        .like(id)
        .ok_or_else(|| ApiError::article_not_found(id))?;
    Ok(LikeResponse {
        article_id: id,
        likes,
    })
}

pub fn admin_list_articles(
    ctx: &ApiContext,
    _session: &AdminSession,
    query: &AdminArticleQuery,
) -> Result<Vec<Article>, ApiError> {
    let category = parse_category_filter(query.category.as_deref())?;
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<ArticleStatus>())
        .transpose()
        .map_err(|e| ApiError::validation(format!("invalid status: {e}")))?;

    let matching = ctx
        .store
        .list(category)
        .into_iter()
        .filter(|article| status.map_or(true, |s| article.status == s));
    Ok(paginate(matching, query.skip, query.limit))
}

pub fn create_article(
    ctx: &ApiContext,
    session: &AdminSession,
    draft: ArticleDraft,
) -> Result<Article, ApiError> {
    ensure_not_blank("title", &draft.title)?;
    ensure_not_blank("content", &draft.content)?;

    let article = ctx.store.create(draft);
    info!(
        article_id = article.id.0,
        category = %article.category,
        status = %article.status,
        admin = session.username(),
        "article created"
    );
    Ok(article)
}

pub fn update_article(
    ctx: &ApiContext,
    session: &AdminSession,
    id: ArticleId,
    patch: ArticlePatch,
) -> Result<Article, ApiError> {
    if let Some(title) = &patch.title {
        ensure_not_blank("title", title)?;
    }
    if let Some(content) = &patch.content {
        ensure_not_blank("content", content)?;
    }
    if patch.is_empty() {
        debug!(article_id = id.0, "empty article patch, nothing to write");
        return get_article(ctx, id);
    }

    let article = ctx
        .store
        .update(id, patch)
        .ok_or_else(|| ApiError::article_not_found(id))?;
    info!(
        article_id = id.0,
        status = %article.status,
        admin = session.username(),
        "article updated"
    );
    Ok(article)
}

pub fn delete_article(
    ctx: &ApiContext,
    session: &AdminSession,
    id: ArticleId,
) -> Result<Article, ApiError> {
    let removed = ctx
        .store
        .delete(id)
        .ok_or_else(|| ApiError::article_not_found(id))?;
    info!(article_id = id.0, admin = session.username(), "article deleted");
    Ok(removed)
}

pub fn dashboard_stats(ctx: &ApiContext, _session: &AdminSession) -> DashboardStats {
    stats_for(&ctx.store.list(None))
}

fn stats_for(articles: &[Article]) -> DashboardStats {
    articles
        .iter()
        .fold(DashboardStats::default(), |mut stats, article| {
            stats.total_articles += 1;
            match article.status {
                ArticleStatus::Published => stats.published_articles += 1,
                ArticleStatus::Draft => stats.draft_articles += 1,
            }
            stats.total_views += article.views;
            stats.total_likes += article.likes;
            stats
        })
}

/// `None`, blank, and `全部` all mean "no category filter".
pub fn parse_category_filter(raw: Option<&str>) -> Result<Option<Category>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if raw == ALL_CATEGORIES_LABEL {
        return Ok(None);
    }
    raw.parse::<Category>()
        .map(Some)
        .map_err(|e| ApiError::validation(format!("invalid category: {e}")))
}

fn paginate(
    articles: impl Iterator<Item = Article>,
    skip: Option<usize>,
    limit: Option<usize>,
) -> Vec<Article> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    articles.skip(skip.unwrap_or(0)).take(limit).collect()
}

fn ensure_not_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
