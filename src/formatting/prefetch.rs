// src/formatting/prefetch.rs
//! Warms the page-info cache before the top level is rendered.
//!
//! Page mentions are rendered synchronously from the cache, so every page
//! referenced by the top-level batch is resolved up front, concurrently.

use futures::future::join_all;
use indexmap::IndexSet;

use super::page_info::PageInfoCache;
use crate::algebras::NotionContent;
use crate::model::Block;
use crate::types::PageId;

/// Distinct pages mentioned by the renderable blocks themselves, in order of
/// first appearance. Children are not scanned.
pub fn collect_page_mentions(blocks: &[Block]) -> IndexSet<PageId> {
    blocks
        .iter()
        .filter(|block| block.is_renderable())
        .flat_map(|block| block.mention_sources())
        .flat_map(|items| items.iter())
        .filter_map(|item| item.mentioned_page().cloned())
        .collect()
}

/// Resolve every mentioned page into the cache. Failures are recorded as
/// fallback entries by the cache itself and never surface here.
pub async fn prefetch_page_mentions(
    source: &dyn NotionContent,
    cache: &PageInfoCache,
    blocks: &[Block],
) {
    let pages = collect_page_mentions(blocks);
    if pages.is_empty() {
        return;
    }

    log::info!("Prefetching {} mentioned pages", pages.len());
    join_all(pages.iter().map(|id| cache.resolve(source, id))).await;
    log::info!("Page mention prefetching completed ({} cached)", cache.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebras::{ContentCall, InMemoryContent};
    use crate::model::{BlockCommon, PageMetadata, ParagraphBlock, TextBlockContent};
    use crate::types::{MentionType, RichTextItem};

    fn mentioning(pages: &[&PageId]) -> Block {
        let items = pages
            .iter()
            .map(|id| RichTextItem::mention(MentionType::Page { id: (*id).clone() }, "x"))
            .collect();
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(items),
        })
    }

    #[test]
    fn test_mentions_are_deduplicated_in_order() {
        let a = PageId::new_v4();
        let b = PageId::new_v4();
        let blocks = vec![mentioning(&[&b, &a]), mentioning(&[&a])];

        let pages: Vec<_> = collect_page_mentions(&blocks).into_iter().collect();
        assert_eq!(pages, vec![b, a]);
    }

    #[test]
    fn test_hidden_blocks_are_not_scanned() {
        let a = PageId::new_v4();
        let mut hidden = mentioning(&[&a]);
        if let Block::Paragraph(p) = &mut hidden {
            p.common = BlockCommon::default().archived();
        }

        assert!(collect_page_mentions(&[hidden]).is_empty());
    }

    #[tokio::test]
    async fn test_each_page_is_fetched_once() {
        let a = PageId::new_v4();
        let source = InMemoryContent::new().with_page(&a, PageMetadata::new("Alpha"));
        let cache = PageInfoCache::new();
        let blocks = vec![mentioning(&[&a, &a]), mentioning(&[&a])];

        prefetch_page_mentions(&source, &cache, &blocks).await;

        assert_eq!(cache.get(&a).map(|info| info.title), Some("Alpha".to_string()));
        assert_eq!(
            source.calls(),
            vec![ContentCall::PageMetadata(a.as_str().to_string())]
        );
    }
}
