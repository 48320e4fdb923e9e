// src/formatting/mod.rs
//! Renders a Notion block tree into LaTeX fragments.
//!
//! [`BlockConverter`] walks the tree level by level, dispatching every block
//! to its renderer and folding the per-level [`ConversionResult`]s upward.

pub mod block_renderer;
mod callout;
pub mod code_languages;
mod containers;
pub mod converter;
pub mod escape;
pub mod page_info;
pub mod prefetch;
pub mod rich_text;

pub use self::converter::BlockConverter;
pub use self::escape::escape_latex;
pub use self::page_info::{PageInfo, PageInfoCache};
pub use self::rich_text::render_rich_text;

use crate::types::BlockId;

/// Rendered markup for exactly one source block.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub block_id: BlockId,
    pub markup: String,
}

/// Where an image referenced by the markup is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Uploaded to Notion; the markup only carries the file's basename.
    File,
    /// Hosted elsewhere; the markup carries the full URL.
    External,
}

/// An image the markup includes, recorded so it can be downloaded later.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReference {
    pub block_id: BlockId,
    pub source: ImageSource,
    /// Full download URL, including any signature query string.
    pub url: String,
}

/// What one recursion level produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionResult {
    pub blocks_processed: usize,
    /// Diagnostics from failed subtrees, one per line.
    pub error_message: Option<String>,
    pub fragments: Vec<Fragment>,
    pub images: Vec<ImageReference>,
}

impl ConversionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result carrying nothing but a diagnostic.
    pub fn failed(message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.record_error(message);
        result
    }

    /// Append a diagnostic line.
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error_message = Some(match self.error_message.take() {
            Some(existing) => format!("{}\n{}", existing, message),
            None => message,
        });
    }

    /// Append a fragment, ignoring empty markup.
    pub fn push_fragment(&mut self, block_id: &BlockId, markup: String) -> bool {
        if markup.is_empty() {
            return false;
        }
        self.fragments.push(Fragment {
            block_id: block_id.clone(),
            markup,
        });
        true
    }

    /// Take over a deeper level's counts, diagnostics and images, leaving its
    /// fragments to the caller. Used by containers that inline their children.
    pub fn absorb_side_effects(&mut self, child: &mut ConversionResult) {
        self.blocks_processed += child.blocks_processed;
        if let Some(message) = child.error_message.take() {
            self.record_error(message);
        }
        self.images.append(&mut child.images);
    }

    /// Take over everything a deeper level produced, fragments included.
    pub fn absorb(&mut self, mut child: ConversionResult) {
        self.absorb_side_effects(&mut child);
        self.fragments.append(&mut child.fragments);
    }

    /// Fragment markup joined with newlines.
    pub fn joined_markup(&self, separator: &str) -> String {
        self.fragments
            .iter()
            .map(|f| f.markup.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// The document body: every fragment on its own line.
    pub fn body(&self) -> String {
        self.joined_markup("\n")
    }

    pub fn is_degraded(&self) -> bool {
        self.error_message.is_some()
    }
}

/// Receives progress as the converter walks each level.
pub trait ProgressSink: Send + Sync {
    /// `current` is the 1-based position of the block about to be dispatched
    /// among `total` siblings at `level`.
    fn on_progress(&self, level: usize, current: usize, total: usize);
}

/// A sink that discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _level: usize, _current: usize, _total: usize) {}
}
