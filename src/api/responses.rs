// src/api/responses.rs
//! Wire types for the Notion REST API and their conversion to the domain model.
//!
//! The wire types are deliberately lenient: every field the converter does not
//! strictly need has a default, so additions to the API never break parsing.
//! A block whose type-specific payload cannot be decoded is a malformed
//! response, not an unsupported block. A file object without a url we can
//! read is different: that block alone is demoted to unsupported.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::model::{
    Block, BlockCommon, BookmarkBlock, BreadcrumbBlock, CalloutBlock, ChildDatabaseBlock,
    ChildPageBlock, CodeBlock, ColumnBlock, ColumnListBlock, EmbedBlock, EquationBlock,
    ExternalFile, FileBlock, FileObject, HeadingBlock, Icon, ImageBlock, LinkPreviewBlock,
    ListItemBlock, MediaBlock, NotionFile, PageMetadata, ParagraphBlock, QuoteBlock, SyncedBlock,
    TableBlock, TableRowBlock, TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock,
};
use crate::types::{
    Annotations, Color, EquationData, Id, Link, MentionType, RichTextItem, RichTextType,
};

// Error bodies are parsed with notion-client's own type.
pub use notion_client::objects::error::Error as NotionError;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Block children response
pub type RetrieveBlockChildrenResponse = PaginatedResponse<WireBlock>;

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl RetrieveBlockChildrenResponse {
    /// Convert all blocks to domain model
    pub fn into_domain_blocks(self) -> Result<Vec<Block>, AppError> {
        self.results.into_iter().map(ToDomain::to_domain).collect()
    }
}

// ==============================================================================
// Rich text
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WireRichText {
    #[serde(flatten)]
    pub kind: WireRichTextKind,
    #[serde(default)]
    pub annotations: WireAnnotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireRichTextKind {
    Text { text: WireText },
    Mention { mention: WireMention },
    Equation { equation: WireEquation },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireText {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<WireUrl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireEquation {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMention {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub page: Option<WireReference>,
    #[serde(default)]
    pub link_mention: Option<WireLinkMention>,
    #[serde(default)]
    pub date: Option<WireDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireReference {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireLinkMention {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDate {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireAnnotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUrl {
    #[serde(default)]
    pub url: String,
}

impl ToDomain<RichTextItem> for WireRichText {
    fn to_domain(self) -> Result<RichTextItem, AppError> {
        let text_type = match self.kind {
            WireRichTextKind::Text { text } => RichTextType::Text {
                content: text.content,
                link: text.link.map(|link| Link { url: link.url }),
            },
            WireRichTextKind::Equation { equation } => RichTextType::Equation(EquationData {
                expression: equation.expression,
            }),
            WireRichTextKind::Mention { mention } => RichTextType::Mention(mention.to_domain()?),
            WireRichTextKind::Unknown => RichTextType::Text {
                content: self.plain_text.clone(),
                link: None,
            },
        };

        let a = self.annotations;
        Ok(RichTextItem {
            text_type,
            annotations: Annotations {
                bold: a.bold,
                italic: a.italic,
                strikethrough: a.strikethrough,
                underline: a.underline,
                code: a.code,
                color: a.color,
            },
            plain_text: self.plain_text,
            href: self.href,
        })
    }
}

impl ToDomain<MentionType> for WireMention {
    fn to_domain(self) -> Result<MentionType, AppError> {
        let WireMention {
            kind,
            page,
            link_mention,
            date,
        } = self;
        let missing = || AppError::MalformedResponse(format!("{} mention without a payload", kind));

        match kind.as_str() {
            "page" => {
                let page = page.ok_or_else(missing)?;
                Ok(MentionType::Page {
                    id: parse_id(&page.id)?,
                })
            }
            "link_mention" => {
                let link = link_mention.ok_or_else(missing)?;
                Ok(MentionType::LinkMention {
                    href: link.href,
                    title: link.title,
                })
            }
            "date" => {
                let date = date.ok_or_else(missing)?;
                Ok(MentionType::Date {
                    start: date.start,
                    end: date.end,
                })
            }
            _ => Ok(MentionType::Other { kind: kind.clone() }),
        }
    }
}

fn rich_text(items: Vec<WireRichText>) -> Result<Vec<RichTextItem>, AppError> {
    items.into_iter().map(ToDomain::to_domain).collect()
}

// ==============================================================================
// Icons and files
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WireIcon {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub external: Option<WireUrl>,
    #[serde(default)]
    pub file: Option<WireUrl>,
    #[serde(default)]
    pub custom_emoji: Option<WireUrl>,
}

impl WireIcon {
    fn into_icon(self) -> Option<Icon> {
        match self.kind.as_str() {
            "emoji" => Some(Icon::Emoji(self.emoji.unwrap_or_default())),
            "external" => self
                .external
                .map(|e| Icon::External(ExternalFile { url: e.url })),
            "file" => self.file.map(|f| Icon::File(NotionFile { url: f.url })),
            "custom_emoji" => self
                .custom_emoji
                .map(|e| Icon::External(ExternalFile { url: e.url })),
            other => {
                log::debug!("Ignoring icon of type {}", other);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireFileObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub external: Option<WireUrl>,
    #[serde(default)]
    pub file: Option<WireUrl>,
    #[serde(default)]
    pub caption: Vec<WireRichText>,
    #[serde(default)]
    pub name: Option<String>,
}

impl WireFileObject {
    /// `None` for hosting kinds without a downloadable url, such as
    /// `file_upload`, or when the url is missing.
    fn file_object(&mut self) -> Option<FileObject> {
        match (self.kind.as_str(), self.external.take(), self.file.take()) {
            ("external", Some(external), _) if !external.url.is_empty() => {
                Some(FileObject::External(ExternalFile { url: external.url }))
            }
            ("file", _, Some(file)) if !file.url.is_empty() => {
                Some(FileObject::File(NotionFile { url: file.url }))
            }
            _ => None,
        }
    }
}

fn unresolved_file(common: BlockCommon, block_type: &str, kind: &str) -> Block {
    log::warn!(
        "Skipping {} block {}: file of type {} has no url",
        block_type,
        common.id,
        kind
    );
    Block::Unsupported(UnsupportedBlock {
        common,
        block_type: block_type.to_string(),
    })
}

// ==============================================================================
// Blocks
// ==============================================================================

/// A block as returned by `GET /blocks/{id}/children`.
///
/// The type-specific payload lives under a key named after the block type, so
/// everything beyond the common fields is kept as raw JSON until the type is
/// known.
#[derive(Debug, Clone, Deserialize)]
pub struct WireBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TextPayload {
    rich_text: Vec<WireRichText>,
    color: Color,
    is_toggleable: bool,
    checked: bool,
    icon: Option<WireIcon>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CodePayload {
    rich_text: Vec<WireRichText>,
    caption: Vec<WireRichText>,
    language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EquationPayload {
    expression: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UrlPayload {
    url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TitlePayload {
    title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TablePayload {
    table_width: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TableRowPayload {
    cells: Vec<Vec<WireRichText>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SyncedPayload {
    synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, Deserialize)]
struct SyncedFrom {
    block_id: String,
}

impl WireBlock {
    /// Decode the payload stored under the block's type key.
    fn payload<T: DeserializeOwned>(&mut self) -> Result<T, AppError> {
        let value = self
            .payload
            .remove(&self.block_type)
            .unwrap_or_else(|| Value::Object(Map::new()));
        serde_json::from_value(value).map_err(|e| {
            AppError::MalformedResponse(format!(
                "Invalid {} payload in block {}: {}",
                self.block_type, self.id, e
            ))
        })
    }

    fn text_content(payload: &mut TextPayload) -> Result<TextBlockContent, AppError> {
        Ok(TextBlockContent {
            rich_text: rich_text(std::mem::take(&mut payload.rich_text))?,
            color: payload.color,
        })
    }
}

impl ToDomain<Block> for WireBlock {
    fn to_domain(mut self) -> Result<Block, AppError> {
        let common = BlockCommon {
            id: parse_id(&self.id)?,
            has_children: self.has_children,
            archived: self.archived,
            in_trash: self.in_trash,
        };

        let block_type = self.block_type.clone();
        let block = match block_type.as_str() {
            "paragraph" => {
                let mut p: TextPayload = self.payload()?;
                Block::Paragraph(ParagraphBlock {
                    common,
                    content: Self::text_content(&mut p)?,
                })
            }
            "heading_1" | "heading_2" | "heading_3" => {
                let mut p: TextPayload = self.payload()?;
                let heading = HeadingBlock {
                    common,
                    content: Self::text_content(&mut p)?,
                    is_toggleable: p.is_toggleable,
                };
                match block_type.as_str() {
                    "heading_1" => Block::Heading1(heading),
                    "heading_2" => Block::Heading2(heading),
                    _ => Block::Heading3(heading),
                }
            }
            "bulleted_list_item" | "numbered_list_item" => {
                let mut p: TextPayload = self.payload()?;
                let item = ListItemBlock {
                    common,
                    content: Self::text_content(&mut p)?,
                };
                if block_type == "bulleted_list_item" {
                    Block::BulletedListItem(item)
                } else {
                    Block::NumberedListItem(item)
                }
            }
            "to_do" => {
                let mut p: TextPayload = self.payload()?;
                Block::ToDo(ToDoBlock {
                    common,
                    content: Self::text_content(&mut p)?,
                    checked: p.checked,
                })
            }
            "toggle" => {
                let mut p: TextPayload = self.payload()?;
                Block::Toggle(ToggleBlock {
                    common,
                    content: Self::text_content(&mut p)?,
                })
            }
            "quote" => {
                let mut p: TextPayload = self.payload()?;
                Block::Quote(QuoteBlock {
                    common,
                    content: Self::text_content(&mut p)?,
                })
            }
            "callout" => {
                let mut p: TextPayload = self.payload()?;
                Block::Callout(CalloutBlock {
                    common,
                    content: Self::text_content(&mut p)?,
                    icon: p.icon.take().and_then(WireIcon::into_icon),
                })
            }
            "code" => {
                let p: CodePayload = self.payload()?;
                Block::Code(CodeBlock {
                    common,
                    language: p.language,
                    caption: rich_text(p.caption)?,
                    content: TextBlockContent::new(rich_text(p.rich_text)?),
                })
            }
            "equation" => {
                let p: EquationPayload = self.payload()?;
                Block::Equation(EquationBlock {
                    common,
                    expression: p.expression,
                })
            }
            "breadcrumb" => Block::Breadcrumb(BreadcrumbBlock { common }),
            "image" => {
                let mut p: WireFileObject = self.payload()?;
                match p.file_object() {
                    Some(image) => Block::Image(ImageBlock {
                        common,
                        image,
                        caption: rich_text(std::mem::take(&mut p.caption))?,
                    }),
                    None => unresolved_file(common, &block_type, &p.kind),
                }
            }
            "video" | "audio" | "pdf" => {
                let mut p: WireFileObject = self.payload()?;
                match p.file_object() {
                    Some(media) => {
                        let media = MediaBlock { common, media };
                        match block_type.as_str() {
                            "video" => Block::Video(media),
                            "audio" => Block::Audio(media),
                            _ => Block::Pdf(media),
                        }
                    }
                    None => unresolved_file(common, &block_type, &p.kind),
                }
            }
            "file" => {
                let mut p: WireFileObject = self.payload()?;
                match p.file_object() {
                    Some(file) => Block::File(FileBlock {
                        common,
                        file,
                        name: p.name.take(),
                    }),
                    None => unresolved_file(common, &block_type, &p.kind),
                }
            }
            "bookmark" => {
                let p: UrlPayload = self.payload()?;
                Block::Bookmark(BookmarkBlock { common, url: p.url })
            }
            "embed" => {
                let p: UrlPayload = self.payload()?;
                Block::Embed(EmbedBlock { common, url: p.url })
            }
            "link_preview" => {
                let p: UrlPayload = self.payload()?;
                Block::LinkPreview(LinkPreviewBlock { common, url: p.url })
            }
            "child_page" => {
                let p: TitlePayload = self.payload()?;
                Block::ChildPage(ChildPageBlock {
                    common,
                    title: p.title,
                })
            }
            "child_database" => Block::ChildDatabase(ChildDatabaseBlock { common }),
            "table" => {
                let p: TablePayload = self.payload()?;
                Block::Table(TableBlock {
                    common,
                    table_width: p.table_width,
                })
            }
            "table_row" => {
                let p: TableRowPayload = self.payload()?;
                Block::TableRow(TableRowBlock {
                    common,
                    cells: p
                        .cells
                        .into_iter()
                        .map(rich_text)
                        .collect::<Result<_, _>>()?,
                })
            }
            "column_list" => Block::ColumnList(ColumnListBlock { common }),
            "column" => Block::Column(ColumnBlock { common }),
            "synced_block" => {
                let p: SyncedPayload = self.payload()?;
                Block::Synced(SyncedBlock {
                    common,
                    synced_from: p
                        .synced_from
                        .map(|from| parse_id(&from.block_id))
                        .transpose()?,
                })
            }
            other => {
                log::debug!("Unsupported block type {} ({})", other, self.id);
                Block::Unsupported(UnsupportedBlock {
                    common,
                    block_type: other.to_string(),
                })
            }
        };

        Ok(block)
    }
}

// ==============================================================================
// Pages
// ==============================================================================

/// The fields of a page object the converter reads.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePage {
    pub id: String,
    #[serde(default)]
    pub icon: Option<WireIcon>,
    #[serde(default)]
    pub properties: HashMap<String, WireProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireProperty {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Vec<WireTitleSegment>,
}

/// Only `plain_text` of a title segment is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTitleSegment {
    #[serde(default)]
    pub plain_text: String,
}

impl ToDomain<PageMetadata> for WirePage {
    fn to_domain(self) -> Result<PageMetadata, AppError> {
        let title = self
            .properties
            .values()
            .find(|property| property.kind == "title")
            .map(|property| {
                property
                    .title
                    .iter()
                    .map(|segment| segment.plain_text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(PageMetadata {
            title,
            icon: self.icon.and_then(WireIcon::into_icon),
        })
    }
}

fn parse_id<T>(raw: &str) -> Result<Id<T>, AppError> {
    Id::parse(raw).map_err(|e| AppError::MalformedResponse(format!("Invalid id {}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(json: &str) -> Block {
        let wire: WireBlock = serde_json::from_str(json).unwrap();
        wire.to_domain().unwrap()
    }

    #[test]
    fn test_paragraph_with_annotated_link() {
        let block = block(
            r#"{
                "object": "block",
                "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
                "type": "paragraph",
                "has_children": false,
                "archived": false,
                "in_trash": false,
                "paragraph": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": "docs", "link": { "url": "/abc" } },
                        "annotations": { "bold": true, "italic": false, "strikethrough": false,
                                         "underline": false, "code": false, "color": "default" },
                        "plain_text": "docs",
                        "href": "/abc"
                    }],
                    "color": "default"
                }
            }"#,
        );

        let Block::Paragraph(p) = block else {
            panic!("expected paragraph");
        };
        let item = &p.content.rich_text[0];
        assert!(item.annotations.bold);
        assert_eq!(
            item.text_type,
            RichTextType::Text {
                content: "docs".to_string(),
                link: Some(Link {
                    url: "/abc".to_string()
                }),
            }
        );
    }

    #[test]
    fn test_callout_icon_and_color() {
        let block = block(
            r#"{
                "id": "c02fc1d3db8b45c5a22227595b15aea7",
                "type": "callout",
                "has_children": true,
                "callout": {
                    "rich_text": [],
                    "icon": { "type": "emoji", "emoji": "💡" },
                    "color": "blue_background"
                }
            }"#,
        );

        let Block::Callout(c) = block else {
            panic!("expected callout");
        };
        assert_eq!(c.icon, Some(Icon::Emoji("💡".to_string())));
        assert_eq!(c.content.color, Color::BlueBackground);
        assert!(c.common.has_children);
    }

    #[test]
    fn test_mentions_decode_into_their_variants() {
        let items: Vec<WireRichText> = serde_json::from_str(
            r#"[
                { "type": "mention", "plain_text": "Roadmap",
                  "mention": { "type": "page", "page": { "id": "550e8400-e29b-41d4-a716-446655440000" } } },
                { "type": "mention", "plain_text": "2024-01-01",
                  "mention": { "type": "date", "date": { "start": "2024-01-01", "end": null } } },
                { "type": "mention", "plain_text": "@Ada",
                  "mention": { "type": "user", "user": { "id": "x" } } },
                { "type": "equation", "plain_text": "x", "equation": { "expression": "x^2" } }
            ]"#,
        )
        .unwrap();
        let items = rich_text(items).unwrap();

        assert_eq!(
            items[0].mentioned_page().map(|id| id.as_str()),
            Some("550e8400e29b41d4a716446655440000")
        );
        assert_eq!(
            items[1].text_type,
            RichTextType::Mention(MentionType::Date {
                start: "2024-01-01".to_string(),
                end: None
            })
        );
        assert_eq!(
            items[2].text_type,
            RichTextType::Mention(MentionType::Other {
                kind: "user".to_string()
            })
        );
        assert_eq!(
            items[3].text_type,
            RichTextType::Equation(EquationData {
                expression: "x^2".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_block_type_is_unsupported() {
        let block = block(
            r#"{ "id": "c02fc1d3db8b45c5a22227595b15aea7", "type": "ai_block", "ai_block": {} }"#,
        );
        assert_eq!(block.block_type(), "ai_block");
        assert!(!block.is_renderable());
    }

    #[test]
    fn test_broken_payload_is_malformed() {
        let wire: WireBlock = serde_json::from_str(
            r#"{ "id": "c02fc1d3db8b45c5a22227595b15aea7", "type": "image", "image": 42 }"#,
        )
        .unwrap();
        assert!(matches!(
            wire.to_domain(),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_file_upload_only_drops_its_own_block() {
        let response: RetrieveBlockChildrenResponse = serde_json::from_str(
            r#"{
                "object": "list",
                "next_cursor": null,
                "has_more": false,
                "results": [
                    { "id": "c02fc1d3db8b45c5a22227595b15aea7", "type": "paragraph",
                      "paragraph": { "rich_text": [{ "type": "text", "plain_text": "kept",
                                                     "text": { "content": "kept" } }] } },
                    { "id": "d02fc1d3db8b45c5a22227595b15aea7", "type": "pdf",
                      "pdf": { "type": "file_upload", "file_upload": { "id": "abc" }, "caption": [] } },
                    { "id": "e02fc1d3db8b45c5a22227595b15aea7", "type": "image",
                      "image": { "type": "external", "caption": [] } }
                ]
            }"#,
        )
        .unwrap();

        let blocks = response.into_domain_blocks().unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Paragraph(_)));
        assert_eq!(blocks[1].block_type(), "pdf");
        assert!(!blocks[1].is_renderable());
        assert_eq!(blocks[2].block_type(), "image");
        assert!(!blocks[2].is_renderable());
    }

    #[test]
    fn test_page_title_comes_from_title_property() {
        let page: WirePage = serde_json::from_str(
            r#"{
                "object": "page",
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "icon": { "type": "emoji", "emoji": "📘" },
                "properties": {
                    "Tags": { "id": "a", "type": "multi_select", "multi_select": [] },
                    "Name": { "id": "title", "type": "title",
                              "title": [{ "plain_text": "Design " }, { "plain_text": "notes" }] }
                }
            }"#,
        )
        .unwrap();

        let metadata = page.to_domain().unwrap();
        assert_eq!(metadata.title, "Design notes");
        assert_eq!(metadata.icon, Some(Icon::Emoji("📘".to_string())));
    }
}
