use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ArticleId);

/// Label used by the list view for "no category filter".
pub const ALL_CATEGORIES_LABEL: &str = "全部";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "技术")]
    Tech,
    #[serde(rename = "思考")]
    Thoughts,
    #[serde(rename = "编程")]
    Programming,
    #[serde(rename = "生活")]
    Life,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Tech,
        Category::Thoughts,
        Category::Programming,
        Category::Life,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Tech => "技术",
            Category::Thoughts => "思考",
            Category::Programming => "编程",
            Category::Life => "生活",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label '{0}'")]
pub struct UnknownLabel(pub String);

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s.trim())
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArticleStatus {
    #[default]
    #[serde(rename = "草稿")]
    Draft,
    #[serde(rename = "已发布")]
    Published,
}

impl ArticleStatus {
    pub fn label(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "草稿",
            ArticleStatus::Published => "已发布",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ArticleStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "草稿" => Ok(ArticleStatus::Draft),
            "已发布" => Ok(ArticleStatus::Published),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// A blog post record with its publication metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// HTML fragment, stored and served verbatim.
    pub content: String,
    pub excerpt: String,
    pub category: Category,
    pub status: ArticleStatus,
    pub publish_date: NaiveDate,
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    pub image: String,
}

/// Editor form contents submitted when creating an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    pub category: Category,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub image: String,
}

/// Editor form contents submitted when editing; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.image.is_none()
    }

    pub fn apply_to(self, article: &mut Article) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(category) = self.category {
            article.category = category;
        }
        if let Some(status) = self.status {
            article.status = status;
        }
        if let Some(image) = self.image {
            article.image = image;
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
