// src/formatting/rich_text/mod.rs
//! Formats Notion rich text arrays into inline LaTeX.
//!
//! Text content is emitted verbatim so authors can embed LaTeX directly in
//! their pages. Only mention labels built from page metadata are escaped.

mod annotations;
mod handlers;

pub use annotations::{normalize_link, LatexStyleRenderer};

use super::page_info::PageInfoCache;
use crate::types::{EquationData, Link, RichTextItem, RichTextType};
use handlers::MentionHandlerRegistry;

/// Renders a sequence of rich text chunks, concatenated without separators.
pub fn render_rich_text(items: &[RichTextItem], cache: &PageInfoCache) -> String {
    let mention_registry = MentionHandlerRegistry::new(cache);

    items
        .iter()
        .map(|item| render_single_item(item, &mention_registry))
        .collect()
}

/// Concatenated plain text of the chunks, with no styling.
pub fn plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

fn render_single_item(item: &RichTextItem, mention_registry: &MentionHandlerRegistry) -> String {
    match &item.text_type {
        RichTextType::Text { content, link } => {
            let styled = LatexStyleRenderer::apply_styles(content, &item.annotations);
            match link {
                Some(Link { url }) => LatexStyleRenderer::apply_link(&styled, url),
                None => styled,
            }
        }
        RichTextType::Equation(EquationData { expression }) => format!("${}$", expression),
        RichTextType::Mention(mention) => mention_registry.handle(mention, &item.plain_text),
    }
}
