use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::Audio($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents every Notion block type the converter recognizes.
///
/// Anything else arrives as [`Block::Unsupported`] and is skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(ListItemBlock),
    NumberedListItem(ListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Breadcrumb(BreadcrumbBlock),
    Image(ImageBlock),
    Video(MediaBlock),
    Audio(MediaBlock),
    Pdf(MediaBlock),
    File(FileBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    LinkPreview(LinkPreviewBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Synced(SyncedBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Breadcrumb(_) => "breadcrumb",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::Audio(_) => "audio",
            Block::Pdf(_) => "pdf",
            Block::File(_) => "file",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::LinkPreview(_) => "link_preview",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Synced(_) => "synced_block",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// Whether the dispatcher renders this block at all.
    ///
    /// Archived and trashed blocks are out, as are table rows (only reachable
    /// through their table) and unrecognized types.
    pub fn is_renderable(&self) -> bool {
        let common = self.common();
        if common.archived || common.in_trash {
            return false;
        }
        !matches!(self, Block::TableRow(_) | Block::Unsupported(_))
    }

    /// Whether the block's renderer fetches and inlines its own children.
    ///
    /// Blocks that return `false` here have their children rendered as
    /// independent fragments following their own.
    pub fn inlines_children(&self) -> bool {
        matches!(
            self,
            Block::BulletedListItem(_)
                | Block::NumberedListItem(_)
                | Block::ToDo(_)
                | Block::Toggle(_)
                | Block::Table(_)
                | Block::ColumnList(_)
                | Block::Synced(_)
                | Block::ChildPage(_)
                | Block::Callout(_)
        )
    }

    /// The block's own rich text, for types that carry one.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match self {
            Block::Paragraph(b) => Some(&b.content.rich_text),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                Some(&b.content.rich_text)
            }
            Block::BulletedListItem(b) | Block::NumberedListItem(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Toggle(b) => Some(&b.content.rich_text),
            Block::Quote(b) => Some(&b.content.rich_text),
            Block::Callout(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }

    /// Rich text fields that may hold inline page mentions: the block's own
    /// text plus image and code captions.
    pub fn mention_sources(&self) -> Vec<&[RichTextItem]> {
        let mut sources: Vec<&[RichTextItem]> = self.rich_text().into_iter().collect();
        match self {
            Block::Image(b) => sources.push(&b.caption),
            Block::Code(b) => sources.push(&b.caption),
            _ => {}
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MentionType, PageId};

    fn paragraph(items: Vec<RichTextItem>) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(items),
        })
    }

    #[test]
    fn test_archived_and_trashed_blocks_are_not_renderable() {
        let archived = Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default().archived(),
            ..Default::default()
        });
        let trashed = Block::Breadcrumb(BreadcrumbBlock {
            common: BlockCommon::default().trashed(),
        });
        assert!(!archived.is_renderable());
        assert!(!trashed.is_renderable());
        assert!(paragraph(vec![]).is_renderable());
    }

    #[test]
    fn test_unsupported_reports_its_raw_type() {
        let block = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "ai_block".to_string(),
        });
        assert_eq!(block.block_type(), "ai_block");
        assert!(!block.is_renderable());
    }

    #[test]
    fn test_mention_sources_include_captions() {
        let page = PageId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let caption = vec![RichTextItem::mention(
            MentionType::Page { id: page.clone() },
            "Target",
        )];
        let block = Block::Code(CodeBlock {
            common: BlockCommon::default(),
            language: "rust".to_string(),
            caption,
            content: TextBlockContent::new(vec![RichTextItem::plain_text("fn main() {}")]),
        });

        let sources = block.mention_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1][0].mentioned_page(), Some(&page));
    }
}
