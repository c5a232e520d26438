use serde::{Deserialize, Serialize};

use crate::domain::{Article, ArticleId};

pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// Query string of the public article listing.
///
/// `category` and `search` are raw strings so that an unknown category can be
/// reported as a validation error instead of a generic rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleListQuery {
    #[serde(default)]
    pub skip: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminArticleQuery {
    #[serde(default)]
    pub skip: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub article_id: ArticleId,
    pub likes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_articles: usize,
    pub published_articles: usize,
    pub draft_articles: usize,
    pub total_views: u64,
    pub total_likes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListView {
    pub categories: Vec<String>,
    pub selected: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailView {
    pub article: Article,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementView {
    pub stats: DashboardStats,
    pub articles: Vec<Article>,
}
