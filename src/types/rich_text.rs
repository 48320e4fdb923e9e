// src/types/rich_text.rs
//! Rich text vocabulary shared by the model, the API adapter and the renderers.

use super::{Color, PageId};

/// The kind of rich text content.
///
/// Each variant carries its specific data, so a mention without mention data
/// or an equation without an expression cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention(MentionType),
    Equation(EquationData),
}

/// Rich text item with formatting annotations.
///
/// `plain_text` is the fallback label the service computed for any variant.
#[derive(Debug, Clone, PartialEq)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item, the most common rich text variant.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Text pointing at `url`.
    pub fn link(text: &str, url: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: Some(Link {
                    url: url.to_string(),
                }),
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: Some(url.to_string()),
        }
    }

    /// An inline equation.
    pub fn equation(expression: &str) -> Self {
        Self {
            text_type: RichTextType::Equation(EquationData {
                expression: expression.to_string(),
            }),
            annotations: Annotations::default(),
            plain_text: expression.to_string(),
            href: None,
        }
    }

    /// A mention carrying the label the service would display for it.
    pub fn mention(mention: MentionType, plain_text: &str) -> Self {
        Self {
            text_type: RichTextType::Mention(mention),
            annotations: Annotations::default(),
            plain_text: plain_text.to_string(),
            href: None,
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// The referenced page, if this chunk is a page mention.
    pub fn mentioned_page(&self) -> Option<&PageId> {
        match &self.text_type {
            RichTextType::Mention(MentionType::Page { id }) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }
}

/// Different types of mentions in rich text
#[derive(Debug, Clone, PartialEq)]
pub enum MentionType {
    /// Reference to another page.
    Page { id: PageId },
    /// An external link rendered by the service as a rich preview.
    LinkMention { href: String, title: String },
    /// A date or date range, kept in the service's own textual form.
    Date { start: String, end: Option<String> },
    /// User, database, template and link-preview mentions.
    Other { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationData {
    pub expression: String,
}
