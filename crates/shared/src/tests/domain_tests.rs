use super::*;

#[test]
fn category_serializes_as_chinese_label() {
    let json = serde_json::to_string(&Category::Programming).expect("json");
    assert_eq!(json, "\"编程\"");
    let parsed: Category = serde_json::from_str("\"生活\"").expect("parse");
    assert_eq!(parsed, Category::Life);
}

#[test]
fn category_from_str_rejects_all_label() {
    assert_eq!("技术".parse::<Category>(), Ok(Category::Tech));
    assert!(ALL_CATEGORIES_LABEL.parse::<Category>().is_err());
}

#[test]
fn status_defaults_to_draft() {
    assert_eq!(ArticleStatus::default(), ArticleStatus::Draft);
    assert_eq!("已发布".parse::<ArticleStatus>(), Ok(ArticleStatus::Published));
    assert!("已下线".parse::<ArticleStatus>().is_err());
}

#[test]
fn article_uses_camel_case_wire_names() {
    let article = Article {
        id: ArticleId(7),
        title: "T".into(),
        content: "<p>x</p>".into(),
        excerpt: String::new(),
        category: Category::Tech,
        status: ArticleStatus::Published,
        publish_date: NaiveDate::from_ymd_opt(2024, 5, 29).expect("date"),
        views: 3,
        likes: 0,
        image: String::new(),
    };
    let value = serde_json::to_value(&article).expect("json");
    assert_eq!(value["id"], 7);
    assert_eq!(value["publishDate"], "2024-05-29");
    assert_eq!(value["status"], "已发布");
}

#[test]
fn draft_fills_optional_form_fields() {
    let draft: ArticleDraft =
        serde_json::from_str(r#"{"title":"T","content":"c","category":"技术"}"#).expect("draft");
    assert_eq!(draft.status, ArticleStatus::Draft);
    assert!(draft.excerpt.is_empty());
    assert!(draft.image.is_empty());
}

#[test]
fn patch_only_overwrites_present_fields() {
    let mut article = Article {
        id: ArticleId(1),
        title: "old".into(),
        content: "body".into(),
        excerpt: "ex".into(),
        category: Category::Thoughts,
        status: ArticleStatus::Draft,
        publish_date: NaiveDate::from_ymd_opt(2024, 5, 28).expect("date"),
        views: 89,
        likes: 2,
        image: "img".into(),
    };
    let patch = ArticlePatch {
        title: Some("new".into()),
        status: Some(ArticleStatus::Published),
        ..ArticlePatch::default()
    };
    assert!(!patch.is_empty());
    patch.apply_to(&mut article);

    assert_eq!(article.title, "new");
    assert_eq!(article.status, ArticleStatus::Published);
    assert_eq!(article.content, "body");
    assert_eq!(article.views, 89);
    assert_eq!(article.id, ArticleId(1));
}
