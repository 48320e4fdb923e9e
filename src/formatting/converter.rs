// src/formatting/converter.rs
//! The recursive walk over a page's block tree.
//!
//! Siblings are converted strictly in order with a pacing delay before each
//! dispatch. Container renderers (see `containers` and `callout`) call back
//! into [`BlockConverter::convert_children`] to render and inline their own
//! children one level deeper.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::block_renderer::LatexBlockRenderer;
use super::page_info::PageInfoCache;
use super::prefetch::prefetch_page_mentions;
use super::{ConversionResult, NoProgress, ProgressSink};
use crate::algebras::{FetchError, NotionContent};
use crate::constants::{DEFAULT_PACING_MS, MAX_NESTING_LEVEL};
use crate::error::AppError;
use crate::model::Block;
use crate::types::{BlockId, NotionId, PageId};

/// Diagnostic recorded when a generic block's subtree could not be converted.
pub(super) fn children_failure_label(id: &BlockId) -> String {
    format!(
        "Unexpected error fetching or processing children of block {}",
        id
    )
}

/// What dispatching one block produced.
///
/// `effects.blocks_processed` is what the block accounts for if its markup is
/// kept; diagnostics and images are carried upward either way.
#[derive(Debug, Default)]
pub(super) struct BlockOutput {
    pub markup: String,
    pub effects: ConversionResult,
}

impl BlockOutput {
    /// Markup from a block with no children of its own to account for.
    pub fn leaf(markup: String) -> Self {
        let mut effects = ConversionResult::new();
        effects.blocks_processed = 1;
        Self { markup, effects }
    }
}

/// Converts the block tree of one page into LaTeX fragments.
///
/// One converter serves one run: it owns the page-info cache that mention
/// rendering reads, so a fresh converter starts from an empty cache.
pub struct BlockConverter {
    source: Arc<dyn NotionContent>,
    page_id: PageId,
    cache: PageInfoCache,
    progress: Arc<dyn ProgressSink>,
    pacing: Duration,
}

impl BlockConverter {
    pub fn new(source: Arc<dyn NotionContent>, page_id: PageId) -> Self {
        Self {
            source,
            page_id,
            cache: PageInfoCache::new(),
            progress: Arc::new(NoProgress),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Delay before each block dispatch. Zero disables pacing.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    pub fn cache(&self) -> &PageInfoCache {
        &self.cache
    }

    pub(super) fn renderer(&self) -> LatexBlockRenderer<'_> {
        LatexBlockRenderer::new(&self.page_id, &self.cache)
    }

    /// Fetch the page's top-level blocks and convert the whole tree.
    ///
    /// Failing to list the root is fatal; everything below it degrades into
    /// diagnostics on the returned result.
    pub async fn convert_page(&self) -> Result<ConversionResult, AppError> {
        let root = NotionId::from(&self.page_id);
        let blocks = self.source.list_children(&root).await.map_err(|e| {
            log::error!("Could not list the blocks of page {}: {}", self.page_id, e);
            AppError::from(e)
        })?;

        log::info!("Page {} has {} top-level blocks", self.page_id, blocks.len());
        let result = self.convert(&blocks, 1).await?;

        log::info!(
            "Converted {} blocks into {} fragments{}",
            result.blocks_processed,
            result.fragments.len(),
            if result.is_degraded() { " with errors" } else { "" }
        );
        Ok(result)
    }

    /// Convert one batch of sibling blocks at `level`.
    ///
    /// Returns `Err` only for failures that make the rest of the run
    /// meaningless, such as an undecodable API response.
    pub fn convert<'a>(
        &'a self,
        blocks: &'a [Block],
        level: usize,
    ) -> BoxFuture<'a, Result<ConversionResult, AppError>> {
        async move {
            if level > MAX_NESTING_LEVEL {
                log::debug!(
                    "Maximum nesting level ({}) reached, dropping {} blocks",
                    MAX_NESTING_LEVEL,
                    blocks.len()
                );
                return Ok(ConversionResult::new());
            }

            if level == 1 {
                prefetch_page_mentions(self.source.as_ref(), &self.cache, blocks).await;
            }

            let total = blocks.len();
            let mut result = ConversionResult::new();

            for (index, block) in blocks.iter().enumerate() {
                if !block.is_renderable() {
                    log::debug!("Skipping {} block {}", block.block_type(), block.id());
                    continue;
                }

                self.progress.on_progress(level, index + 1, total);
                if !self.pacing.is_zero() {
                    tokio::time::sleep(self.pacing).await;
                }

                log::debug!(
                    "Block type: {} ID: {} (level {})",
                    block.block_type(),
                    block.id(),
                    level
                );

                let BlockOutput { markup, mut effects } = self.dispatch(block, level).await?;
                let processed = std::mem::take(&mut effects.blocks_processed);
                if result.push_fragment(block.id(), markup) {
                    result.blocks_processed += processed;
                }
                result.absorb_side_effects(&mut effects);

                if block.has_children() && !block.inlines_children() {
                    let children = self
                        .convert_children(block.id(), level, children_failure_label(block.id()))
                        .await?;
                    result.absorb(children);
                }
            }

            log::info!(
                "Level {} done: {} blocks processed",
                level,
                result.blocks_processed
            );
            Ok(result)
        }
        .boxed()
    }

    /// Fetch a block's direct children, passing fatal failures up as errors.
    ///
    /// The outer `Result` carries only fatal failures. Recoverable ones come
    /// back inside for the caller to turn into its own diagnostic.
    pub(super) async fn fetch_children(
        &self,
        parent: &BlockId,
    ) -> Result<Result<Vec<Block>, FetchError>, AppError> {
        match self.source.list_children(&NotionId::from(parent)).await {
            Err(e) if e.is_fatal() => {
                log::error!("Aborting: children of {} are unreadable: {}", parent, e);
                Err(AppError::from(e))
            }
            other => Ok(other),
        }
    }

    /// Fetch and convert the children of `parent` one level below `level`.
    ///
    /// Nothing is fetched when that level is past the nesting limit. A
    /// recoverable fetch failure becomes a result carrying `failure_label`.
    pub(super) async fn convert_children(
        &self,
        parent: &BlockId,
        level: usize,
        failure_label: String,
    ) -> Result<ConversionResult, AppError> {
        if level + 1 > MAX_NESTING_LEVEL {
            log::debug!("Not descending into {}: nesting limit reached", parent);
            return Ok(ConversionResult::new());
        }

        match self.fetch_children(parent).await? {
            Ok(children) if children.is_empty() => Ok(ConversionResult::new()),
            Ok(children) => self.convert(&children, level + 1).await,
            Err(e) => {
                log::warn!("{}: {}", failure_label, e);
                Ok(ConversionResult::failed(failure_label))
            }
        }
    }

    /// Route a block to its renderer.
    async fn dispatch(&self, block: &Block, level: usize) -> Result<BlockOutput, AppError> {
        let renderer = self.renderer();

        let output = match block {
            Block::Paragraph(b) => BlockOutput::leaf(renderer.paragraph(b)),
            Block::Heading1(b) => BlockOutput::leaf(renderer.heading(1, b)),
            Block::Heading2(b) => BlockOutput::leaf(renderer.heading(2, b)),
            Block::Heading3(b) => BlockOutput::leaf(renderer.heading(3, b)),
            Block::BulletedListItem(_) | Block::NumberedListItem(_) | Block::ToDo(_) => {
                self.render_list_item(block, level).await?
            }
            Block::Toggle(b) => self.render_toggle(b, level).await?,
            Block::Quote(b) => BlockOutput::leaf(renderer.quote(b)),
            Block::Callout(b) => self.render_callout(b, level).await?,
            Block::Code(b) => BlockOutput::leaf(renderer.code(b)),
            Block::Equation(b) => BlockOutput::leaf(renderer.equation(b)),
            Block::Breadcrumb(_) => BlockOutput::leaf(renderer.breadcrumb()),
            Block::Image(b) => {
                let (markup, image) = renderer.image(b);
                let mut output = BlockOutput::leaf(markup);
                output.effects.images.push(image);
                output
            }
            Block::Video(b) => BlockOutput::leaf(renderer.media("Embed Video", b)),
            Block::Audio(b) => BlockOutput::leaf(renderer.media("Embed Audio", b)),
            Block::Pdf(b) => BlockOutput::leaf(renderer.media("Embed PDF", b)),
            Block::File(b) => BlockOutput::leaf(renderer.file(b)),
            Block::Bookmark(b) => BlockOutput::leaf(renderer.bookmark(b)),
            Block::Embed(b) => BlockOutput::leaf(renderer.embed(b)),
            Block::LinkPreview(b) => BlockOutput::leaf(renderer.link_preview(b)),
            Block::ChildPage(b) => BlockOutput::leaf(renderer.child_page(b)),
            Block::ChildDatabase(b) => BlockOutput::leaf(renderer.child_database(b)),
            Block::Table(b) => self.render_table(b).await?,
            Block::ColumnList(b) => self.render_column_list(b, level).await?,
            // A stray column has no markup of its own; its children follow
            // through the generic path.
            Block::Column(_) => BlockOutput::default(),
            Block::Synced(b) => self.render_synced(b, level).await?,
            Block::TableRow(_) | Block::Unsupported(_) => BlockOutput::default(),
        };

        Ok(output)
    }
}
