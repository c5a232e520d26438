use super::{parse_bool, settings_from_sources, Settings};

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let settings = settings_from_sources(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.admin_username, "admin");
    assert_eq!(settings.admin_password, "admin123");
    assert!(settings.seed_articles);
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
        bind_addr = "0.0.0.0:9000"
        admin_password = "from-file"
        token_ttl_seconds = "120"
        seed_articles = "false"
        max_body_bytes = "2048"
    "#;
    let settings = settings_from_sources(Some(file), env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.admin_password, "from-file");
    assert_eq!(settings.token_ttl_seconds, 120);
    assert!(!settings.seed_articles);
    assert_eq!(settings.max_body_bytes, 2048);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let file = r#"bind_addr = "0.0.0.0:9000""#;
    let settings = settings_from_sources(
        Some(file),
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:1111"),
            ("APP__BIND_ADDR", "127.0.0.1:2222"),
            ("APP__TOKEN_SECRET", "s"),
            ("RUST_LOG", "debug"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2222");
    assert_eq!(settings.token_secret, "s");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparseable_numbers_keep_previous_value() {
    let settings = settings_from_sources(
        None,
        env_from(&[
            ("APP__TOKEN_TTL_SECONDS", "soon"),
            ("APP__MAX_BODY_BYTES", "-1"),
        ]),
    );
    assert_eq!(settings.token_ttl_seconds, Settings::default().token_ttl_seconds);
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[test]
fn malformed_file_is_ignored() {
    let settings = settings_from_sources(Some("bind_addr = ["), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn bool_parsing_accepts_common_spellings() {
    assert_eq!(parse_bool("Yes"), Some(true));
    assert_eq!(parse_bool(" off "), Some(false));
    assert_eq!(parse_bool("maybe"), None);
}
