use chrono::NaiveDate;
use shared::domain::{Article, ArticleId, ArticleStatus, Category};

struct SeedArticle {
    id: i64,
    title: &'static str,
    content: &'static str,
    excerpt: &'static str,
    category: Category,
    status: ArticleStatus,
    publish_date: (i32, u32, u32),
    views: u64,
    image: &'static str,
}

const SEED: [SeedArticle; 3] = [
    SeedArticle {
        id: 1,
        title: "探索现代前端开发的最新趋势",
        content: "<h2>引言</h2>\
<p>现代前端开发正在经历前所未有的变革。从React到Vue，从TypeScript到WebAssembly，新技术层出不穷，为开发者提供了更多的选择和可能性。</p>\
<h2>TypeScript的普及</h2>\
<p>TypeScript已经成为现代前端开发的标配。它不仅提供了类型安全，还大大提升了代码的可维护性和开发效率。</p>\
<h2>总结</h2>\
<p>前端技术的发展速度令人惊叹，但核心始终是为用户提供更好的体验。</p>",
        excerpt: "从React到Vue，从TypeScript到WebAssembly，现代前端开发正在经历前所未有的变革。本文将深入探讨这些技术的发展方向。",
        category: Category::Tech,
        status: ArticleStatus::Published,
        publish_date: (2024, 5, 29),
        views: 156,
        image: "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=800&h=400&fit=crop",
    },
    SeedArticle {
        id: 2,
        title: "人工智能时代的思考",
        content: "<h2>AI 的影响</h2>\
<p>人工智能正在改变我们的生活和工作方式。作为开发者，我们需要思考如何在这个时代保持竞争力。</p>\
<h2>关键思考</h2>\
<p>学习与 AI 协作，而不是被 AI 替代，是我们需要掌握的重要技能。</p>",
        excerpt: "AI正在改变我们的工作和生活方式。作为开发者，我们应该如何适应这个变化，并在其中找到自己的位置？",
        category: Category::Thoughts,
        status: ArticleStatus::Draft,
        publish_date: (2024, 5, 28),
        views: 89,
        image: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800&h=400&fit=crop",
    },
    SeedArticle {
        id: 3,
        title: "代码之美：编程中的艺术哲学",
        content: "<h2>什么是优美的代码？</h2>\
<p>优美的代码不仅仅是能够运行的代码，更是易读、易维护、具有良好设计的代码。</p>\
<h2>编程哲学</h2>\
<p>编程是一门艺术，好的程序员不仅是技术专家，更是艺术家。</p>",
        excerpt: "优雅的代码不仅仅是功能的实现，更是一种艺术表达。本文探讨如何写出既高效又美观的代码。",
        category: Category::Programming,
        status: ArticleStatus::Published,
        publish_date: (2024, 5, 27),
        views: 234,
        image: "https://images.unsplash.com/photo-1516116216624-53e697fedbea?w=800&h=400&fit=crop",
    },
];

/// Mock articles the store starts with, most recent first.
pub fn seed_articles() -> Vec<Article> {
    SEED.iter()
        .filter_map(|seed| {
            let (year, month, day) = seed.publish_date;
            Some(Article {
                id: ArticleId(seed.id),
                title: seed.title.to_string(),
                content: seed.content.to_string(),
                excerpt: seed.excerpt.to_string(),
                category: seed.category,
                status: seed.status,
                publish_date: NaiveDate::from_ymd_opt(year, month, day)?,
                views: seed.views,
                likes: 0,
                image: seed.image.to_string(),
            })
        })
        .collect()
}
