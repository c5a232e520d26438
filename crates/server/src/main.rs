use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use server_api::{
    admin_list_articles, authorize_admin, create_article, dashboard_stats, delete_article,
    get_published_article, is_authenticated, like_article, list_articles, login, logout,
    update_article, views, AdminSession, ApiContext, StaticCredentials, TokenConfig,
};
use shared::{
    domain::{Article, ArticleDraft, ArticleId, ArticlePatch},
    error::{ApiError, ErrorCode},
    protocol::{
        AdminArticleQuery, ArticleListQuery, DashboardStats, DetailView, LikeResponse, ListView,
        LoginRequest, LoginResponse, ManagementView, SessionStatus,
    },
};
use storage::{ArticleStore, SessionFlag};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, Settings};

type Rejection = (StatusCode, Json<ApiError>);

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    category: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let api = build_context(&settings);
    info!(articles = api.store.len(), "article store ready");
    let app = build_router(Arc::new(AppState { api }), settings.max_body_bytes);

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_context(settings: &Settings) -> ApiContext {
    let store = if settings.seed_articles {
        ArticleStore::seeded()
    } else {
        ArticleStore::new()
    };
    ApiContext {
        store,
        session: SessionFlag::new(),
        verifier: Arc::new(StaticCredentials::new(
            settings.admin_username.clone(),
            settings.admin_password.clone(),
        )),
        tokens: TokenConfig {
            secret: settings.token_secret.clone(),
            ttl_seconds: settings.token_ttl_seconds,
        },
    }
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(list_page))
        .route("/post/:id", get(post_page))
        .route("/admin", get(admin_page))
        .route("/admin/login", post(admin_login))
        .route("/admin/logout", post(admin_logout))
        .route("/admin/session", get(admin_session_status))
        .route(
            "/api/articles",
            get(http_list_articles).post(http_create_article),
        )
        .route("/api/articles/admin/all", get(http_admin_list_articles))
        .route(
            "/api/articles/:article_id",
            get(http_get_article)
                .put(http_update_article)
                .delete(http_delete_article),
        )
        .route("/api/articles/:article_id/like", post(http_like_article))
        .route("/api/admin/stats", get(http_dashboard_stats))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

fn reject(err: ApiError) -> Rejection {
    let status = match err.code {
        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Rejection> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| reject(ApiError::validation(e.body_text())))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Rejection> {
    query
        .map(|Query(params)| params)
        .map_err(|e| reject(ApiError::validation(e.body_text())))
}

/// A segment that does not parse as an id cannot name an article.
fn article_id(path: Result<Path<i64>, PathRejection>) -> Result<ArticleId, Rejection> {
    path.map(|Path(id)| ArticleId(id)).map_err(|e| {
        reject(ApiError::new(
            ErrorCode::NotFound,
            format!("article not found: {}", e.body_text()),
        ))
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|token| !token.is_empty())
}

fn admin_session(state: &AppState, headers: &HeaderMap) -> Result<AdminSession, Rejection> {
    authorize_admin(&state.api, bearer_token(headers)).map_err(reject)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Json<ListView>, Rejection> {
    let q = query_params(query)?;
    let view = views::list_view(&state.api, q.category.as_deref()).map_err(reject)?;
    Ok(Json(view))
}

async fn post_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DetailView>, Rejection> {
    let view = views::detail_view(&state.api, &id).map_err(reject)?;
    Ok(Json(view))
}

async fn admin_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ManagementView>, Rejection> {
    let session = admin_session(&state, &headers)?;
    Ok(Json(views::management_view(&state.api, &session)))
}

async fn admin_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, Rejection> {
    let req = json_body(payload)?;
    let response = login(&state.api, &req.username, &req.password)
        .await
        .map_err(reject)?;
    Ok(Json(response))
}

async fn admin_logout(State(state): State<Arc<AppState>>) -> StatusCode {
    logout(&state.api);
    StatusCode::NO_CONTENT
}

async fn admin_session_status(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: is_authenticated(&state.api),
    })
}

async fn http_list_articles(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ArticleListQuery>, QueryRejection>,
) -> Result<Json<Vec<Article>>, Rejection> {
    let q = query_params(query)?;
    let articles = list_articles(&state.api, &q).map_err(reject)?;
    Ok(Json(articles))
}

async fn http_get_article(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Article>, Rejection> {
    let id = article_id(path)?;
    let article = get_published_article(&state.api, id).map_err(reject)?;
    Ok(Json(article))
}

async fn http_like_article(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<LikeResponse>, Rejection> {
    let liked = like_article(&state.api, article_id(path)?).map_err(reject)?;
    Ok(Json(liked))
}

async fn http_admin_list_articles(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<AdminArticleQuery>, QueryRejection>,
) -> Result<Json<Vec<Article>>, Rejection> {
    let session = admin_session(&state, &headers)?;
    let q = query_params(query)?;
    let articles = admin_list_articles(&state.api, &session, &q).map_err(reject)?;
    Ok(Json(articles))
}

async fn http_create_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ArticleDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>), Rejection> {
    let session = admin_session(&state, &headers)?;
    let draft = json_body(payload)?;
    let article = create_article(&state.api, &session, draft).map_err(reject)?;
    Ok((StatusCode::CREATED, Json(article)))
}

async fn http_update_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ArticlePatch>, JsonRejection>,
) -> Result<Json<Article>, Rejection> {
    let session = admin_session(&state, &headers)?;
    let id = article_id(path)?;
    let patch = json_body(payload)?;
    let article = update_article(&state.api, &session, id, patch).map_err(reject)?;
    Ok(Json(article))
}

async fn http_delete_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, Rejection> {
    let session = admin_session(&state, &headers)?;
    let id = article_id(path)?;
    delete_article(&state.api, &session, id).map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn http_dashboard_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardStats>, Rejection> {
    let session = admin_session(&state, &headers)?;
    Ok(Json(dashboard_stats(&state.api, &session)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
