use super::common::BlockCommon;
use crate::types::{BlockId, Color, RichTextItem};

/// Text content block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: Color,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self {
            rich_text,
            color: Color::Default,
        }
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading block, shared by the three heading levels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub is_toggleable: bool,
}

/// Bulleted or numbered list item block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Quote block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Icon types
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Emoji(String),
    External(ExternalFile),
    File(NotionFile),
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: Vec<RichTextItem>,
    pub content: TextBlockContent,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Breadcrumb block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BreadcrumbBlock {
    pub common: BlockCommon,
}

/// Image block
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub image: FileObject,
    pub caption: Vec<RichTextItem>,
}

/// PDF, video and audio blocks share this payload
#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub media: FileObject,
}

/// File block
#[derive(Debug, Clone, PartialEq)]
pub struct FileBlock {
    pub common: BlockCommon,
    pub name: Option<String>,
    pub file: FileObject,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Embed block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbedBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Link preview block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkPreviewBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Child page block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Child database block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildDatabaseBlock {
    pub common: BlockCommon,
}

/// Table block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Column list block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnListBlock {
    pub common: BlockCommon,
}

/// Column block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnBlock {
    pub common: BlockCommon,
}

/// Synced block
///
/// `synced_from` is `None` on the original and points at the original on copies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncedBlock {
    pub common: BlockCommon,
    pub synced_from: Option<BlockId>,
}

/// Any block type outside the recognized set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}

/// File object types
#[derive(Debug, Clone, PartialEq)]
pub enum FileObject {
    External(ExternalFile),
    File(NotionFile),
}

impl FileObject {
    pub fn url(&self) -> &str {
        match self {
            FileObject::External(external) => &external.url,
            FileObject::File(file) => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalFile {
    pub url: String,
}

/// A file hosted by Notion; its signed URL expires after about an hour.
#[derive(Debug, Clone, PartialEq)]
pub struct NotionFile {
    pub url: String,
}
