use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use chrono::{NaiveDate, Utc};
use shared::domain::{Article, ArticleDraft, ArticleId, ArticlePatch, Category};

mod seed;

pub use seed::seed_articles;

/// Ordered in-memory article collection, most recent first.
///
/// Cloning yields another handle to the same collection. Lookups on a missing
/// id return `None` and leave the collection untouched.
#[derive(Clone, Default)]
pub struct ArticleStore {
    inner: Arc<RwLock<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    articles: Vec<Article>,
    last_issued_id: i64,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        let last_issued_id = articles.iter().map(|a| a.id.0).max().unwrap_or_default();
        Self {
            inner: Arc::new(RwLock::new(StoreState {
                articles,
                last_issued_id,
            })),
        }
    }

    pub fn seeded() -> Self {
        Self::with_articles(seed_articles())
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().articles.is_empty()
    }

    /// All articles in store order, narrowed to `category` when given.
    pub fn list(&self, category: Option<Category>) -> Vec<Article> {
        self.read()
            .articles
            .iter()
            .filter(|article| category.map_or(true, |c| article.category == c))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: ArticleId) -> Option<Article> {
        self.read()
            .articles
            .iter()
            .find(|article| article.id == id)
            .cloned()
    }

    pub fn create(&self, draft: ArticleDraft) -> Article {
        self.create_dated(draft, Utc::now().date_naive())
    }

    /// Prepends a new article published on `publish_date` with zeroed counters.
    pub fn create_dated(&self, draft: ArticleDraft, publish_date: NaiveDate) -> Article {
        let mut state = self.write();
        let id = ArticleId(next_article_id(
            state.last_issued_id,
            Utc::now().timestamp_millis(),
        ));
        state.last_issued_id = id.0;

        let article = Article {
            id,
            title: draft.title,
            content: draft.content,
            excerpt: draft.excerpt,
            category: draft.category,
            status: draft.status,
            publish_date,
            views: 0,
            likes: 0,
            image: draft.image,
        };
        state.articles.insert(0, article.clone());
        article
    }

    pub fn update(&self, id: ArticleId, patch: ArticlePatch) -> Option<Article> {
        let mut state = self.write();
        let article = state.articles.iter_mut().find(|article| article.id == id)?;
        patch.apply_to(article);
        Some(article.clone())
    }

    pub fn delete(&self, id: ArticleId) -> Option<Article> {
        let mut state = self.write();
        let index = state.articles.iter().position(|article| article.id == id)?;
        Some(state.articles.remove(index))
    }

    /// Increments the like counter and returns the new count.
    pub fn like(&self, id: ArticleId) -> Option<u64> {
        let mut state = self.write();
        let article = state.articles.iter_mut().find(|article| article.id == id)?;
        article.likes = article.likes.saturating_add(1);
        Some(article.likes)
    }
}

/// Timestamp-derived id that never repeats or goes backwards.
fn next_article_id(last_issued_id: i64, now_millis: i64) -> i64 {
    now_millis.max(last_issued_id.saturating_add(1))
}

/// Process-wide "an admin is signed in" gate.
#[derive(Clone, Default)]
pub struct SessionFlag {
    authenticated: Arc<AtomicBool>,
}

impl SessionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.authenticated.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.authenticated.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
