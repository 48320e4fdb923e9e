use notion2tex::{
    render_rich_text, Annotations, FetchError, InMemoryContent, MentionType, PageId,
    PageInfoCache, PageMetadata, RichTextItem,
};
use pretty_assertions::assert_eq;

fn page(id: &str) -> PageId {
    PageId::parse(id).unwrap()
}

#[test]
fn test_text_content_is_emitted_verbatim() {
    let items = vec![RichTextItem::plain_text(r"Costs 5% of $x_1$ & \emph{more}")];
    assert_eq!(
        render_rich_text(&items, &PageInfoCache::new()),
        r"Costs 5% of $x_1$ & \emph{more}"
    );
}

#[test]
fn test_styles_and_links_compose() {
    let code_link = RichTextItem::link("docs", "/0123456789abcdef0123456789abcdef").with_annotations(
        Annotations {
            code: true,
            underline: true,
            ..Default::default()
        },
    );
    let items = vec![
        RichTextItem::plain_text("Read the "),
        code_link,
        RichTextItem::plain_text(" now").with_annotations(Annotations::bold()),
    ];

    assert_eq!(
        render_rich_text(&items, &PageInfoCache::new()),
        r"Read the \href{https://notion.so/0123456789abcdef0123456789abcdef}{\underline{\texttt{docs}}}\textbf{ now}"
    );
}

#[test]
fn test_equations_are_inline_math() {
    let items = vec![RichTextItem::equation(r"\frac{a}{b}")];
    assert_eq!(render_rich_text(&items, &PageInfoCache::new()), r"$\frac{a}{b}$");
}

#[test]
fn test_date_and_other_mentions() {
    let items = vec![
        RichTextItem::mention(
            MentionType::Date {
                start: "2024-03-01".to_string(),
                end: Some("2024-03-05".to_string()),
            },
            "March 1, 2024 → March 5, 2024",
        ),
        RichTextItem::plain_text(" / "),
        RichTextItem::mention(
            MentionType::Date {
                start: "2024-04-01".to_string(),
                end: None,
            },
            "April 1, 2024",
        ),
        RichTextItem::mention(
            MentionType::Other {
                kind: "user".to_string(),
            },
            "@Ada",
        ),
    ];

    assert_eq!(
        render_rich_text(&items, &PageInfoCache::new()),
        r"\notRendered{2024-03-01 $\rightarrow$ 2024-03-05} / \notRendered{2024-04-01}"
    );
}

#[tokio::test]
async fn test_page_mentions_use_resolved_metadata() {
    let titled = page("11111111111111111111111111111111");
    let blank = page("22222222222222222222222222222222");
    let denied = page("33333333333333333333333333333333");
    let missing = page("44444444444444444444444444444444");

    let source = InMemoryContent::new()
        .with_page(&titled, PageMetadata::new("  R&D notes  ").with_emoji("🧪"))
        .with_page(&blank, PageMetadata::new("   "))
        .failing(
            &denied,
            FetchError::AccessDenied {
                reason: "restricted".to_string(),
            },
        );

    let cache = PageInfoCache::new();
    for id in [&titled, &blank, &denied, &missing] {
        cache.resolve(&source, id).await;
    }

    let mention = |id: &PageId| {
        render_rich_text(
            &[RichTextItem::mention(MentionType::Page { id: id.clone() }, "label")],
            &cache,
        )
    };

    assert_eq!(
        mention(&titled),
        r"~\href{https://notion.so/11111111111111111111111111111111}{🧪 \, R\&D notes}"
    );
    assert_eq!(
        mention(&blank),
        r"~\href{https://notion.so/22222222222222222222222222222222}{\faFileTextO \, Untitled}"
    );
    assert_eq!(
        mention(&denied),
        r"~\href{https://notion.so/33333333333333333333333333333333}{\faFileTextO \, \notRendered{Page not accessible by the integration}}"
    );
    assert_eq!(
        mention(&missing),
        r"~\href{https://notion.so/44444444444444444444444444444444}{\faFileTextO \, \notRendered{Page not accessible by the integration}}"
    );
}

#[test]
fn test_uncached_mention_falls_back_to_its_label() {
    let id = page("55555555555555555555555555555555");
    let items = vec![RichTextItem::mention(MentionType::Page { id }, "Q&A")];

    assert_eq!(
        render_rich_text(&items, &PageInfoCache::new()),
        r"~\href{https://notion.so/55555555555555555555555555555555}{\faFileTextO \, Q\&A}"
    );
}
