use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub log_filter: String,
    pub admin_username: String,
    pub admin_password: String,
    pub token_secret: String,
    pub token_ttl_seconds: i64,
    pub seed_articles: bool,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            log_filter: "info".into(),
            admin_username: "admin".into(),
            admin_password: "admin123".into(),
            token_secret: "dev-blog-secret".into(),
            token_ttl_seconds: 30 * 60,
            seed_articles: true,
            max_body_bytes: 1024 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    settings_from_sources(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml` keys, then environment variables.
pub(crate) fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
            if let Some(v) = file_cfg.get("admin_username") {
                settings.admin_username = v.clone();
            }
            if let Some(v) = file_cfg.get("admin_password") {
                settings.admin_password = v.clone();
            }
            if let Some(v) = file_cfg.get("token_secret") {
                settings.token_secret = v.clone();
            }
            if let Some(v) = file_cfg.get("token_ttl_seconds").and_then(|v| v.parse().ok()) {
                settings.token_ttl_seconds = v;
            }
            if let Some(v) = file_cfg.get("seed_articles").and_then(|v| parse_bool(v)) {
                settings.seed_articles = v;
            }
            if let Some(v) = file_cfg.get("max_body_bytes").and_then(|v| v.parse().ok()) {
                settings.max_body_bytes = v;
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__ADMIN_USERNAME") {
        settings.admin_username = v;
    }
    if let Some(v) = env("APP__ADMIN_PASSWORD") {
        settings.admin_password = v;
    }

    if let Some(v) = env("APP__TOKEN_SECRET") {
        settings.token_secret = v;
    }
    if let Some(v) = env("APP__TOKEN_TTL_SECONDS") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.token_ttl_seconds = parsed;
        }
    }

    if let Some(v) = env("APP__SEED_ARTICLES").and_then(|v| parse_bool(&v)) {
        settings.seed_articles = v;
    }

    if let Some(v) = env("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }

    settings
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
