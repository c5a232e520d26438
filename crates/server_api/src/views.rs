//! View models behind the public pages and the admin dashboard.

use shared::{
    domain::{ArticleId, Category, ALL_CATEGORIES_LABEL},
    error::{ApiError, ErrorCode},
    protocol::{DetailView, ListView, ManagementView},
};

use crate::{dashboard_stats, get_article, parse_category_filter, AdminSession, ApiContext};

pub fn category_tabs() -> Vec<String> {
    std::iter::once(ALL_CATEGORIES_LABEL)
        .chain(Category::ALL.into_iter().map(Category::label))
        .map(str::to_string)
        .collect()
}

pub fn list_view(ctx: &ApiContext, category: Option<&str>) -> Result<ListView, ApiError> {
    let filter = parse_category_filter(category)?;
    let selected = filter.map_or(ALL_CATEGORIES_LABEL, Category::label);
    Ok(ListView {
        categories: category_tabs(),
        selected: selected.to_string(),
        articles: ctx.store.list(filter),
    })
}

/// Resolves the `{id}` route segment; anything that is not an id is a miss.
pub fn detail_view(ctx: &ApiContext, raw_id: &str) -> Result<DetailView, ApiError> {
    let id = raw_id.trim().parse::<i64>().map(ArticleId).map_err(|_| {
        ApiError::new(ErrorCode::NotFound, format!("article '{raw_id}' not found"))
    })?;
    Ok(DetailView {
        article: get_article(ctx, id)?,
    })
}

pub fn management_view(ctx: &ApiContext, session: &AdminSession) -> ManagementView {
    ManagementView {
        stats: dashboard_stats(ctx, session),
        articles: ctx.store.list(None),
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
