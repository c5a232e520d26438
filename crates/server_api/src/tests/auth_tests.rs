use super::*;
use std::sync::Arc;
use storage::{ArticleStore, SessionFlag};

fn context() -> ApiContext {
    ApiContext {
        store: ArticleStore::seeded(),
        session: SessionFlag::new(),
        verifier: Arc::new(StaticCredentials::default()),
        tokens: TokenConfig {
            secret: "test-secret".into(),
            ttl_seconds: 60,
        },
    }
}

#[tokio::test]
async fn default_credentials_open_a_session() {
    let ctx = context();
    let response = login(&ctx, "admin", "admin123").await.expect("login");
    assert_eq!(response.token_type, TOKEN_TYPE);
    assert!(is_authenticated(&ctx));

    let session = authorize_admin(&ctx, Some(&response.token)).expect("authorized");
    assert_eq!(session.username(), "admin");
}

#[tokio::test]
async fn any_other_pair_is_rejected_and_flag_stays_unset() {
    let ctx = context();
    for (username, password) in [
        ("admin", "admin"),
        ("Admin", "admin123"),
        ("admin ", "admin123"),
        ("", ""),
        ("root", "admin123"),
    ] {
        let err = login(&ctx, username, password)
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert!(!is_authenticated(&ctx));
    }
}

#[tokio::test]
async fn logout_revokes_previously_issued_tokens() {
    let ctx = context();
    let response = login(&ctx, "admin", "admin123").await.expect("login");
    logout(&ctx);

    assert!(!is_authenticated(&ctx));
    let err = authorize_admin(&ctx, Some(&response.token)).expect_err("revoked");
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn flag_alone_is_not_enough() {
    let ctx = context();
    login(&ctx, "admin", "admin123").await.expect("login");

    let err = authorize_admin(&ctx, None).expect_err("missing token");
    assert_eq!(err.code, ErrorCode::Unauthorized);
    let err = authorize_admin(&ctx, Some("not-a-jwt")).expect_err("garbage token");
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let ctx = context();
    login(&ctx, "admin", "admin123").await.expect("login");
    let forged = mint_session_token(
        &TokenConfig {
            secret: "other-secret".into(),
            ttl_seconds: 60,
        },
        "admin",
    )
    .expect("token");

    assert!(authorize_admin(&ctx, Some(&forged)).is_err());
}

#[test]
fn expired_token_is_rejected() {
    let ctx = context();
    ctx.session.set();
    let expired = mint_session_token(
        &TokenConfig {
            secret: "test-secret".into(),
            ttl_seconds: -600,
        },
        "admin",
    )
    .expect("token");

    assert!(authorize_admin(&ctx, Some(&expired)).is_err());
}

#[tokio::test]
async fn injected_verifier_replaces_default_pair() {
    let mut ctx = context();
    ctx.verifier = Arc::new(StaticCredentials::new("editor", "s3cret"));

    assert!(login(&ctx, "admin", "admin123").await.is_err());
    assert!(login(&ctx, "editor", "s3cret").await.is_ok());
}

#[tokio::test]
async fn out_of_range_ttl_fails_login_without_opening_session() {
    let mut ctx = context();
    ctx.tokens.ttl_seconds = i64::MAX;

    let err = login(&ctx, "admin", "admin123").await.expect_err("ttl");
    assert_eq!(err.code, ErrorCode::Internal);
    assert!(!is_authenticated(&ctx));
}
