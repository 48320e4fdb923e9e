use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use notion2tex::{
    merge_consecutive_lists, AppError, Block, BlockCommon, BlockConverter, BlockId, BookmarkBlock,
    BreadcrumbBlock, CalloutBlock, ChildDatabaseBlock, ChildPageBlock, CodeBlock, ColumnBlock,
    ColumnListBlock, ContentCall, ConversionResult, EmbedBlock, EquationBlock, ExternalFile,
    FetchError, FileBlock, FileObject, HeadingBlock, Icon, ImageBlock, ImageSource,
    InMemoryContent, LinkPreviewBlock, ListItemBlock, MediaBlock, MentionType, NotionFile, PageId,
    PageMetadata, ParagraphBlock, ProgressSink, QuoteBlock, RichTextItem, SyncedBlock, TableBlock,
    TableRowBlock, TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock, MAX_NESTING_LEVEL,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

fn text(content: &str) -> TextBlockContent {
    TextBlockContent::new(vec![RichTextItem::plain_text(content)])
}

fn paragraph(content: &str) -> Block {
    paragraph_with(BlockCommon::default(), content)
}

fn paragraph_with(common: BlockCommon, content: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common,
        content: text(content),
    })
}

fn bulleted(common: BlockCommon, content: &str) -> Block {
    Block::BulletedListItem(ListItemBlock {
        common,
        content: text(content),
    })
}

fn converter(source: InMemoryContent) -> (Arc<InMemoryContent>, BlockConverter) {
    converter_for(source, PageId::new_v4())
}

fn converter_for(source: InMemoryContent, page: PageId) -> (Arc<InMemoryContent>, BlockConverter) {
    let source = Arc::new(source);
    let converter = BlockConverter::new(source.clone(), page).with_pacing(Duration::ZERO);
    (source, converter)
}

#[tokio::test]
async fn test_fragment_order_follows_sibling_order() {
    let labels = ["alpha", "beta", "gamma", "delta", "epsilon"];

    for shift in 0..labels.len() {
        let mut permuted = labels.to_vec();
        permuted.rotate_left(shift);
        if shift % 2 == 1 {
            permuted.reverse();
        }

        let blocks: Vec<Block> = permuted.iter().map(|label| paragraph(label)).collect();
        let (_, converter) = converter(InMemoryContent::new());
        let result = converter.convert(&blocks, 1).await.unwrap();

        let expected: Vec<String> = permuted.iter().map(|l| format!(r"{} \par", l)).collect();
        let actual: Vec<String> = result.fragments.iter().map(|f| f.markup.clone()).collect();
        assert_eq!(actual, expected);

        let ids: Vec<&BlockId> = result.fragments.iter().map(|f| &f.block_id).collect();
        let source_ids: Vec<&BlockId> = blocks.iter().map(|b| b.id()).collect();
        assert_eq!(ids, source_ids);
    }
}

/// One block of every variant, each with children and a page mention where
/// the variant can carry one.
fn every_block_type(common: &BlockCommon, mentioned: &PageId) -> Vec<Block> {
    let mention = || {
        TextBlockContent::new(vec![RichTextItem::mention(
            MentionType::Page {
                id: mentioned.clone(),
            },
            "Linked",
        )])
    };
    let heading = || HeadingBlock {
        common: common.clone(),
        content: mention(),
        is_toggleable: true,
    };
    let item = || ListItemBlock {
        common: common.clone(),
        content: mention(),
    };
    let external = |url: &str| {
        FileObject::External(ExternalFile {
            url: url.to_string(),
        })
    };
    let media = |url: &str| MediaBlock {
        common: common.clone(),
        media: external(url),
    };

    vec![
        Block::Paragraph(ParagraphBlock {
            common: common.clone(),
            content: mention(),
        }),
        Block::Heading1(heading()),
        Block::Heading2(heading()),
        Block::Heading3(heading()),
        Block::BulletedListItem(item()),
        Block::NumberedListItem(item()),
        Block::ToDo(ToDoBlock {
            common: common.clone(),
            content: mention(),
            checked: true,
        }),
        Block::Toggle(ToggleBlock {
            common: common.clone(),
            content: mention(),
        }),
        Block::Quote(QuoteBlock {
            common: common.clone(),
            content: mention(),
        }),
        Block::Callout(CalloutBlock {
            common: common.clone(),
            icon: Some(Icon::Emoji("💡".to_string())),
            content: mention(),
        }),
        Block::Code(CodeBlock {
            common: common.clone(),
            language: "rust".to_string(),
            caption: mention().rich_text,
            content: text("fn main() {}"),
        }),
        Block::Equation(EquationBlock {
            common: common.clone(),
            expression: "e^{i\\pi}".to_string(),
        }),
        Block::Breadcrumb(BreadcrumbBlock {
            common: common.clone(),
        }),
        Block::Image(ImageBlock {
            common: common.clone(),
            image: external("https://cdn.example.com/plot.png"),
            caption: mention().rich_text,
        }),
        Block::Video(media("https://cdn.example.com/clip.mp4")),
        Block::Audio(media("https://cdn.example.com/talk.mp3")),
        Block::Pdf(media("https://cdn.example.com/paper.pdf")),
        Block::File(FileBlock {
            common: common.clone(),
            name: Some("paper.pdf".to_string()),
            file: external("https://cdn.example.com/paper.pdf"),
        }),
        Block::Bookmark(BookmarkBlock {
            common: common.clone(),
            url: "https://example.com".to_string(),
        }),
        Block::Embed(EmbedBlock {
            common: common.clone(),
            url: "https://example.com/embed".to_string(),
        }),
        Block::LinkPreview(LinkPreviewBlock {
            common: common.clone(),
            url: "https://github.com/example/repo".to_string(),
        }),
        Block::ChildPage(ChildPageBlock {
            common: common.clone(),
            title: "Subpage".to_string(),
        }),
        Block::ChildDatabase(ChildDatabaseBlock {
            common: common.clone(),
        }),
        Block::Table(TableBlock {
            common: common.clone(),
            table_width: 2,
        }),
        Block::TableRow(TableRowBlock {
            common: common.clone(),
            cells: vec![vec![RichTextItem::plain_text("cell")]],
        }),
        Block::ColumnList(ColumnListBlock {
            common: common.clone(),
        }),
        Block::Column(ColumnBlock {
            common: common.clone(),
        }),
        Block::Synced(SyncedBlock {
            common: common.clone(),
            synced_from: None,
        }),
        Block::Unsupported(UnsupportedBlock {
            common: common.clone(),
            block_type: "ai_block".to_string(),
        }),
    ]
}

#[test]
fn test_block_table_covers_every_variant() {
    let types: HashSet<String> = every_block_type(&BlockCommon::default(), &PageId::new_v4())
        .iter()
        .map(|block| block.block_type().to_string())
        .collect();
    assert_eq!(types.len(), 29);
}

#[tokio::test]
async fn test_archived_and_trashed_blocks_are_invisible() {
    let mentioned = PageId::new_v4();

    for (label, hidden) in [
        ("archived", BlockCommon::default().with_children().archived()),
        ("trashed", BlockCommon::default().with_children().trashed()),
    ] {
        for block in every_block_type(&hidden, &mentioned) {
            // Children are available, so any fetch would show up in the call log.
            let source = InMemoryContent::new()
                .with_children(&hidden.id, vec![paragraph("child")])
                .with_page(&mentioned, PageMetadata::new("Linked"));

            let (source, converter) = converter(source);
            let result = converter.convert(&[block.clone()], 1).await.unwrap();

            let kind = format!("{} {}", label, block.block_type());
            assert!(result.fragments.is_empty(), "{} produced a fragment", kind);
            assert_eq!(result.blocks_processed, 0, "{} was counted", kind);
            assert!(result.error_message.is_none(), "{} reported an error", kind);
            assert!(source.calls().is_empty(), "{} triggered {:?}", kind, source.calls());
        }
    }
}

#[tokio::test]
async fn test_nesting_stops_at_the_limit_without_fetching() {
    let level2 = BlockCommon::default().with_children();
    let level3 = BlockCommon::default().with_children();
    let level4 = BlockCommon::default();
    let root = BlockCommon::default().with_children();

    let source = InMemoryContent::new()
        .with_children(&root.id, vec![paragraph_with(level2.clone(), "two")])
        .with_children(&level2.id, vec![paragraph_with(level3.clone(), "three")])
        .with_children(&level3.id, vec![paragraph_with(level4, "four")]);

    let (source, converter) = converter(source);
    let result = converter
        .convert(&[paragraph_with(root, "one")], 1)
        .await
        .unwrap();

    assert_eq!(MAX_NESTING_LEVEL, 3);
    assert_eq!(result.body(), "one \\par\ntwo \\par\nthree \\par");
    assert_eq!(result.blocks_processed, 3);
    assert_eq!(source.children_requests(), 2);
    assert!(!source
        .calls()
        .contains(&ContentCall::ListChildren(level3.id.as_str().to_string())));
}

#[tokio::test]
async fn test_bulleted_items_with_children_merge_into_one_list() {
    let page = PageId::new_v4();
    let first = BlockCommon::default().with_children();
    let second = BlockCommon::default().with_children();

    let source = InMemoryContent::new()
        .with_children(
            &page,
            vec![bulleted(first.clone(), "First"), bulleted(second.clone(), "Second")],
        )
        .with_children(&first.id, vec![paragraph("first detail")])
        .with_children(&second.id, vec![paragraph("second detail")]);

    let (_, converter) = converter_for(source, page);
    let result = converter.convert_page().await.unwrap();

    assert_eq!(result.fragments.len(), 2);
    assert_eq!(result.blocks_processed, 4);

    let merged = merge_consecutive_lists(&result.body());
    assert_eq!(
        merged,
        "\\begin{itemize}\n\\item First\nfirst detail \\par\n\\item Second\nsecond detail \\par\n\\end{itemize}"
    );
    assert_eq!(merged.matches(r"\begin{itemize}").count(), 1);
    assert_eq!(merged.matches(r"\item ").count(), 2);
}

#[tokio::test]
async fn test_callout_heading_becomes_title() {
    let callout = BlockCommon::default().with_children();
    let source = InMemoryContent::new().with_children(
        &callout.id,
        vec![
            Block::Heading2(HeadingBlock {
                common: BlockCommon::default(),
                content: text("Warning"),
                is_toggleable: false,
            }),
            paragraph("Mind the gap"),
        ],
    );

    let (_, converter) = converter(source);
    let result = converter
        .convert(
            &[Block::Callout(CalloutBlock {
                common: callout,
                icon: Some(Icon::Emoji("⚠️".to_string())),
                content: text("ignored when children exist"),
            })],
            1,
        )
        .await
        .unwrap();

    assert_eq!(
        result.body(),
        "\\begin{callout}[\\emoji{26a0}][Warning][gray]\nMind the gap \\par\n\\end{callout}"
    );
    assert_eq!(result.blocks_processed, 1);
}

#[tokio::test]
async fn test_mention_of_denied_page_uses_fallback_label() {
    let hidden = PageId::new_v4();
    let source = InMemoryContent::new().failing(
        &hidden,
        FetchError::AccessDenied {
            reason: "restricted_resource".to_string(),
        },
    );
    let block = Block::Paragraph(ParagraphBlock {
        common: BlockCommon::default(),
        content: TextBlockContent::new(vec![
            RichTextItem::plain_text("See "),
            RichTextItem::mention(MentionType::Page { id: hidden.clone() }, "Secret plans"),
        ]),
    });

    let (_, converter) = converter(source);
    let result = converter.convert(&[block], 1).await.unwrap();

    assert_eq!(
        result.body(),
        format!(
            "See ~\\href{{https://notion.so/{}}}{{\\faFileTextO \\, \\notRendered{{Page not accessible by the integration}}}} \\par",
            hidden.as_str()
        )
    );
    assert!(!result.is_degraded());
}

#[tokio::test]
async fn test_mentioned_page_titles_are_prefetched() {
    let page = PageId::new_v4();
    let mentioned = PageId::new_v4();
    let source = InMemoryContent::new()
        .with_children(
            &page,
            vec![Block::Paragraph(ParagraphBlock {
                common: BlockCommon::default(),
                content: TextBlockContent::new(vec![RichTextItem::mention(
                    MentionType::Page {
                        id: mentioned.clone(),
                    },
                    "stale label",
                )]),
            })],
        )
        .with_page(&mentioned, PageMetadata::new("Q3 & Q4 goals").with_emoji("🎯"));

    let (_, converter) = converter_for(source, page);
    let result = converter.convert_page().await.unwrap();

    assert!(result.body().contains(r"{🎯 \, Q3 \& Q4 goals}"));
}

#[tokio::test]
async fn test_failed_subtree_is_reported_and_siblings_continue() {
    let broken = BlockCommon::default().with_children();
    let source = InMemoryContent::new().failing(
        &broken.id,
        FetchError::NotFound {
            id: broken.id.as_str().to_string(),
        },
    );

    let (_, converter) = converter(source);
    let blocks = vec![
        paragraph_with(broken.clone(), "parent"),
        paragraph("sibling"),
    ];
    let result = converter.convert(&blocks, 1).await.unwrap();

    assert_eq!(result.body(), "parent \\par\nsibling \\par");
    assert_eq!(
        result.error_message,
        Some(format!(
            "Unexpected error fetching or processing children of block {}",
            broken.id
        ))
    );
}

#[tokio::test]
async fn test_malformed_response_stops_the_run() {
    let parent = BlockCommon::default().with_children();
    let source = InMemoryContent::new().failing(
        &parent.id,
        FetchError::MalformedResponse {
            reason: "unexpected end of JSON".to_string(),
        },
    );

    let (_, converter) = converter(source);
    let err = converter
        .convert(&[paragraph_with(parent, "parent"), paragraph("never reached")], 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreadable_page_is_fatal() {
    let page = PageId::new_v4();
    let source = InMemoryContent::new().failing(
        &page,
        FetchError::AccessDenied {
            reason: "not shared".to_string(),
        },
    );

    let (_, converter) = converter_for(source, page);
    assert!(converter.convert_page().await.is_err());
}

#[tokio::test]
async fn test_images_are_collected_from_nested_levels() {
    let toggle = BlockCommon::default().with_children();
    let image = |file: FileObject| {
        Block::Image(ImageBlock {
            common: BlockCommon::default(),
            image: file,
            caption: vec![],
        })
    };
    let source = InMemoryContent::new().with_children(
        &toggle.id,
        vec![image(FileObject::File(NotionFile {
            url: "https://s3.amazonaws.com/bucket/chart.png?X-Amz-Signature=abc".to_string(),
        }))],
    );

    let (_, converter) = converter(source);
    let blocks = vec![
        Block::Toggle(ToggleBlock {
            common: toggle,
            content: text("Figures"),
        }),
        image(FileObject::External(ExternalFile {
            url: "https://example.com/photo.jpg".to_string(),
        })),
    ];
    let result = converter.convert(&blocks, 1).await.unwrap();

    let sources: Vec<ImageSource> = result.images.iter().map(|i| i.source).collect();
    assert_eq!(sources, vec![ImageSource::File, ImageSource::External]);
    assert!(result.body().contains(r"\includegraphics[scale = 0.4]{chart.png}"));
    assert!(result
        .body()
        .contains(r"\includegraphics[scale = 0.4]{https://example.com/photo.jpg}"));
}

#[derive(Default)]
struct RecordingProgress {
    events: Mutex<Vec<(usize, usize, usize)>>,
}

impl ProgressSink for RecordingProgress {
    fn on_progress(&self, level: usize, current: usize, total: usize) {
        self.events.lock().push((level, current, total));
    }
}

#[tokio::test]
async fn test_progress_is_reported_per_dispatched_block() {
    let progress = Arc::new(RecordingProgress::default());
    let parent = BlockCommon::default().with_children();
    let source = Arc::new(
        InMemoryContent::new().with_children(&parent.id, vec![paragraph("child")]),
    );
    let converter = BlockConverter::new(source, PageId::new_v4())
        .with_pacing(Duration::ZERO)
        .with_progress(progress.clone());

    let blocks = vec![
        paragraph_with(parent, "parent"),
        paragraph_with(BlockCommon::default().archived(), "skipped"),
        paragraph("last"),
    ];
    let result: ConversionResult = converter.convert(&blocks, 1).await.unwrap();

    assert_eq!(result.fragments.len(), 3);
    assert_eq!(*progress.events.lock(), vec![(1, 1, 3), (2, 1, 1), (1, 3, 3)]);
}
