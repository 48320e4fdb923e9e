use std::sync::Arc;
use std::time::Duration;

use notion2tex::{
    Block, BlockCommon, BlockConverter, BlockId, BookmarkBlock, ChildDatabaseBlock,
    ChildPageBlock, CodeBlock, ColumnBlock, ColumnListBlock, EmbedBlock, ExternalFile,
    FetchError, FileBlock, FileObject, HeadingBlock, InMemoryContent, LatexBlockRenderer,
    MediaBlock, NotionFile, PageId, PageInfoCache, RichTextItem, SyncedBlock, TableBlock,
    TableRowBlock, TextBlockContent, ToDoBlock,
};
use pretty_assertions::assert_eq;

const PAGE: &str = "0123456789abcdef0123456789abcdef";
const BLOCK: &str = "fedcba9876543210fedcba9876543210";

fn common() -> BlockCommon {
    BlockCommon::new(BlockId::parse(BLOCK).unwrap())
}

fn text(content: &str) -> TextBlockContent {
    TextBlockContent::new(vec![RichTextItem::plain_text(content)])
}

fn with_renderer<R>(render: impl FnOnce(&LatexBlockRenderer<'_>) -> R) -> R {
    let page = PageId::parse(PAGE).unwrap();
    let cache = PageInfoCache::new();
    let renderer = LatexBlockRenderer::new(&page, &cache);
    render(&renderer)
}

async fn convert(source: InMemoryContent, blocks: Vec<Block>) -> notion2tex::ConversionResult {
    let converter = BlockConverter::new(Arc::new(source), PageId::parse(PAGE).unwrap())
        .with_pacing(Duration::ZERO);
    converter.convert(&blocks, 1).await.unwrap()
}

#[test]
fn test_toggleable_heading_is_marked() {
    let heading = HeadingBlock {
        common: common(),
        content: text("Details"),
        is_toggleable: true,
    };
    assert_eq!(
        with_renderer(|r| r.heading(3, &heading)),
        r"\subsubsection*{\faAngleDown \, Details}"
    );
}

#[test]
fn test_code_block_language_and_caption() {
    let code = CodeBlock {
        common: common(),
        language: "plain text".to_string(),
        caption: vec![RichTextItem::plain_text("Listing 1")],
        content: text("fn main() {}"),
    };
    assert_eq!(
        with_renderer(|r| r.code(&code)),
        "\\begin{code}{text}\nfn main() {}\n\\end{code}\n\\codeCaption{Listing 1}"
    );

    let rust = CodeBlock {
        language: "rust".to_string(),
        caption: vec![],
        ..code
    };
    assert_eq!(
        with_renderer(|r| r.code(&rust)),
        "\\begin{code}{rust}\nfn main() {}\n\\end{code}\n"
    );
}

#[test]
fn test_files_link_back_to_their_block() {
    let file = FileBlock {
        common: common(),
        name: Some("Q1_report.PDF ".to_string()),
        file: FileObject::File(NotionFile {
            url: "https://s3.amazonaws.com/q1.pdf?sig=1".to_string(),
        }),
    };
    assert_eq!(
        with_renderer(|r| r.file(&file)),
        format!(
            r"\href{{https://notion.so/{}#{}}}{{\faFilePdfO \quad Q1\_report.PDF }} \par",
            PAGE, BLOCK
        )
    );

    let unnamed = FileBlock { name: None, ..file };
    assert!(with_renderer(|r| r.file(&unnamed)).contains(r"{\faFile \quad file}"));
}

#[test]
fn test_child_page_link() {
    let child = ChildPageBlock {
        common: common(),
        title: "Notes #2".to_string(),
    };
    assert_eq!(
        with_renderer(|r| r.child_page(&child)),
        format!(
            r"\href{{https://notion.so/{}}}{{\faFileTextO \quad Notes \#2}} \par",
            BLOCK
        )
    );
}

#[test]
fn test_bookmark_display_drops_trailing_slash() {
    let bookmark = BookmarkBlock {
        common: common(),
        url: "https://example.com/docs_v2/".to_string(),
    };
    assert_eq!(
        with_renderer(|r| r.bookmark(&bookmark)),
        r"\href{https://example.com/docs_v2/}{https://example.com/docs\_v2}\par"
    );
}

#[test]
fn test_unrenderable_content_gets_placeholders() {
    let embed = EmbedBlock {
        common: common(),
        url: "https://www.youtube.com/watch?v=abc".to_string(),
    };
    assert_eq!(
        with_renderer(|r| r.embed(&embed)),
        r"[\notRendered{Embed block}] $\rightarrow$ \href{https://www.youtube.com/watch?v=abc}{www.youtube.com/watch?v=abc}\par"
    );

    let empty_embed = EmbedBlock {
        url: String::new(),
        ..embed
    };
    assert_eq!(with_renderer(|r| r.embed(&empty_embed)), "");

    let hosted_video = MediaBlock {
        common: common(),
        media: FileObject::File(NotionFile {
            url: "https://s3.amazonaws.com/clip.mp4".to_string(),
        }),
    };
    assert!(with_renderer(|r| r.media("Embed Video", &hosted_video)).contains(&format!(
        r"\href{{https://notion.so/{}#{}}}",
        PAGE, BLOCK
    )));

    let external_audio = MediaBlock {
        common: common(),
        media: FileObject::External(ExternalFile {
            url: "https://cdn.example.com/talk.mp3".to_string(),
        }),
    };
    assert!(with_renderer(|r| r.media("Embed Audio", &external_audio))
        .starts_with(r"[\notRendered{Embed Audio}] $\rightarrow$ \href{https://cdn.example.com/talk.mp3}"));

    let database = ChildDatabaseBlock { common: common() };
    assert!(with_renderer(|r| r.child_database(&database)).starts_with(r"[\notRendered{Inline Database}]"));
}

#[tokio::test]
async fn test_table_rows_become_tabular_lines() {
    let table = BlockCommon::default().with_children();
    let row = |cells: &[&str]| {
        Block::TableRow(TableRowBlock {
            common: BlockCommon::default(),
            cells: cells
                .iter()
                .map(|c| vec![RichTextItem::plain_text(c)])
                .collect(),
        })
    };
    let source = InMemoryContent::new().with_children(
        &table.id,
        vec![row(&["Name", "Qty"]), row(&["Apples", "3"])],
    );

    let result = convert(
        source,
        vec![Block::Table(TableBlock {
            common: table,
            table_width: 2,
        })],
    )
    .await;

    assert_eq!(
        result.body(),
        "\n\\begin{table}[H]\n\\centering\n\\begin{tabular}{|c|c|}\n\\hline\nName & Qty \\\\ \\hline\nApples & 3 \\\\ \\hline\n\\end{tabular}\n\\caption{}\n\\end{table}"
    );
    assert_eq!(result.blocks_processed, 1);
}

#[tokio::test]
async fn test_unreadable_table_leaves_a_comment() {
    let table = BlockCommon::default().with_children();
    let source = InMemoryContent::new().failing(
        &table.id,
        FetchError::Transport {
            message: "connection reset".to_string(),
        },
    );

    let result = convert(
        source,
        vec![Block::Table(TableBlock {
            common: table,
            table_width: 3,
            ..Default::default()
        })],
    )
    .await;

    assert_eq!(result.body(), "% Error fetching table rows");
    assert!(!result.is_degraded());
}

#[tokio::test]
async fn test_columns_are_flattened_in_order() {
    let list = BlockCommon::default().with_children();
    let left = BlockCommon::default().with_children();
    let right = BlockCommon::default().with_children();
    let paragraph = |content: &str| {
        Block::Paragraph(notion2tex::ParagraphBlock {
            common: BlockCommon::default(),
            content: text(content),
        })
    };

    let source = InMemoryContent::new()
        .with_children(
            &list.id,
            vec![
                Block::Column(ColumnBlock { common: left.clone() }),
                Block::Column(ColumnBlock { common: right.clone() }),
            ],
        )
        .with_children(&left.id, vec![paragraph("left one"), paragraph("left two")])
        .with_children(&right.id, vec![paragraph("right")]);

    let result = convert(source, vec![Block::ColumnList(ColumnListBlock { common: list })]).await;

    assert_eq!(result.body(), "left one \\par\nleft two \\par\nright \\par");
    assert_eq!(result.fragments.len(), 1);
    assert_eq!(result.blocks_processed, 3);
}

#[tokio::test]
async fn test_synced_copy_reads_its_own_children() {
    let original = BlockId::new_v4();
    let copy = BlockCommon::default().with_children();
    let source = InMemoryContent::new()
        .with_children(
            &copy.id,
            vec![Block::ToDo(ToDoBlock {
                common: BlockCommon::default(),
                content: text("Review"),
                checked: true,
            })],
        )
        .with_children(&original, vec![]);

    let result = convert(
        source,
        vec![Block::Synced(SyncedBlock {
            common: copy,
            synced_from: Some(original),
        })],
    )
    .await;

    assert_eq!(
        result.body(),
        "\\begin{todolist}\n\\item[\\done] Review\n\\end{todolist}"
    );
}
