// src/formatting/page_info.rs
//! Titles and icons of mentioned pages, resolved once per conversion run.

use dashmap::DashMap;

use crate::algebras::NotionContent;
use crate::constants::{PAGE_DENIED_TITLE, PAGE_FALLBACK_ICON, PAGE_FALLBACK_TITLE};
use crate::model::{Icon, PageMetadata};
use crate::types::PageId;

use super::escape::escape_latex;

/// How a page mention is labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Escaped title, or a fallback label.
    pub title: String,
    /// The page's emoji, or a Font Awesome command.
    pub icon: String,
}

impl PageInfo {
    /// The label for a page the integration may not read.
    pub fn denied() -> Self {
        Self {
            title: PAGE_DENIED_TITLE.to_string(),
            icon: PAGE_FALLBACK_ICON.to_string(),
        }
    }

    /// The label for a page whose metadata could not be read for any other reason.
    pub fn untitled() -> Self {
        Self {
            title: PAGE_FALLBACK_TITLE.to_string(),
            icon: PAGE_FALLBACK_ICON.to_string(),
        }
    }

    pub fn from_metadata(metadata: &PageMetadata) -> Self {
        let trimmed = metadata.title.trim();
        let title = if trimmed.is_empty() {
            PAGE_FALLBACK_TITLE.to_string()
        } else {
            escape_latex(trimmed)
        };

        let icon = match &metadata.icon {
            Some(Icon::Emoji(emoji)) if !emoji.is_empty() => emoji.clone(),
            _ => PAGE_FALLBACK_ICON.to_string(),
        };

        Self { title, icon }
    }
}

/// Page info keyed by page id, shared by every renderer of one run.
///
/// The first resolution of an id wins; later writers see the stored value.
#[derive(Debug, Default)]
pub struct PageInfoCache {
    entries: DashMap<PageId, PageInfo>,
}

impl PageInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PageId) -> Option<PageInfo> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `info` unless the id already has an entry; return the stored value.
    pub fn insert_if_absent(&self, id: &PageId, info: PageInfo) -> PageInfo {
        self.entries.entry(id.clone()).or_insert(info).value().clone()
    }

    /// Look the page up, fetching its metadata on a miss.
    ///
    /// Failures never escape: access problems map to [`PageInfo::denied`],
    /// anything else to [`PageInfo::untitled`].
    pub async fn resolve(&self, source: &dyn NotionContent, id: &PageId) -> PageInfo {
        if let Some(info) = self.get(id) {
            return info;
        }

        let info = match source.page_metadata(id).await {
            Ok(metadata) => PageInfo::from_metadata(&metadata),
            Err(err) if err.is_access_denied() || err.is_not_found() => {
                log::warn!("Page {} is not accessible: {}", id, err);
                PageInfo::denied()
            }
            Err(err) => {
                log::warn!("Could not read page {}: {}", id, err);
                PageInfo::untitled()
            }
        };

        self.insert_if_absent(id, info)
    }
}
