// src/formatting/rich_text/handlers.rs
//! Handlers for the different mention types in rich text.

use super::super::escape::escape_latex;
use super::super::page_info::{PageInfo, PageInfoCache};
use crate::constants::{NOTION_HOST, PAGE_FALLBACK_ICON, PAGE_FALLBACK_TITLE};
use crate::types::{MentionType, PageId};

/// Registry of mention handlers.
///
/// Page mentions read the run's page-info cache, which the prefetcher warms
/// before rendering starts; a miss falls back to the chunk's own label.
pub struct MentionHandlerRegistry<'a> {
    page_handler: PageMentionHandler<'a>,
    link_handler: LinkMentionHandler,
    date_handler: DateMentionHandler,
}

impl<'a> MentionHandlerRegistry<'a> {
    pub fn new(cache: &'a PageInfoCache) -> Self {
        Self {
            page_handler: PageMentionHandler { cache },
            link_handler: LinkMentionHandler,
            date_handler: DateMentionHandler,
        }
    }

    /// Renders a mention based on its type.
    pub fn handle(&self, mention: &MentionType, plain_text: &str) -> String {
        match mention {
            MentionType::Page { id } => self.page_handler.handle_page(id, plain_text),
            MentionType::LinkMention { href, title } => {
                self.link_handler.handle_link_mention(href, title)
            }
            MentionType::Date { start, end } => {
                self.date_handler.handle_date(start, end.as_deref())
            }
            MentionType::Other { kind } => {
                log::debug!("Skipping {} mention", kind);
                String::new()
            }
        }
    }
}

/// Handler for page mentions.
struct PageMentionHandler<'a> {
    cache: &'a PageInfoCache,
}

impl PageMentionHandler<'_> {
    fn handle_page(&self, id: &PageId, plain_text: &str) -> String {
        let info = self.cache.get(id).unwrap_or_else(|| {
            let label = if plain_text.is_empty() {
                PAGE_FALLBACK_TITLE.to_string()
            } else {
                escape_latex(plain_text)
            };
            PageInfo {
                title: label,
                icon: PAGE_FALLBACK_ICON.to_string(),
            }
        });

        format!(
            r"~\href{{{}/{}}}{{{} \, {}}}",
            NOTION_HOST,
            id.as_str(),
            info.icon,
            info.title
        )
    }
}

/// Handler for link mentions.
struct LinkMentionHandler;

impl LinkMentionHandler {
    fn handle_link_mention(&self, href: &str, title: &str) -> String {
        format!(r"\href{{{}}}{{{}}}", href, title)
    }
}

/// Handler for date mentions.
struct DateMentionHandler;

impl DateMentionHandler {
    fn handle_date(&self, start: &str, end: Option<&str>) -> String {
        match end {
            Some(end) => format!(r"\notRendered{{{} $\rightarrow$ {}}}", start, end),
            None => format!(r"\notRendered{{{}}}", start),
        }
    }
}
