// src/lib.rs
//! notion2tex library: converts Notion pages into LaTeX documents.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `FetchError`, `ValidationError`
//! - **Configuration**: `PipelineConfig`
//! - **Domain model**: `Block` and its per-type payloads, `PageMetadata`
//! - **Domain types**: `NotionId`, `PageId`, `BlockId`, `RichTextItem`, etc.
//! - **Content sources**: `NotionContent`, `NotionHttpClient`, `InMemoryContent`
//! - **Conversion**: `BlockConverter`, `ConversionResult`, `render_rich_text`
//! - **Post-processing and output**: `postprocess`, `assemble_document`, `deliver`

// Internal modules, matching what's in main.rs
mod algebras;
mod api;
mod assets;
mod config;
mod constants;
mod error;
mod error_recovery;

#[cfg(feature = "bench")]
pub mod formatting;
#[cfg(not(feature = "bench"))]
mod formatting;

mod model;
mod output;
mod pipeline;

#[cfg(feature = "bench")]
pub mod postprocess;
#[cfg(not(feature = "bench"))]
mod postprocess;

mod types;

// --- Error Handling ---
pub use crate::algebras::FetchError;
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PipelineConfig};
pub use crate::constants::{DEFAULT_PACING_MS, MAX_NESTING_LEVEL};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, BookmarkBlock, BreadcrumbBlock, CalloutBlock, ChildDatabaseBlock,
    ChildPageBlock, CodeBlock, ColumnBlock, ColumnListBlock, EmbedBlock, EquationBlock,
    ExternalFile, FileBlock, FileObject, HeadingBlock, Icon, ImageBlock, LinkPreviewBlock,
    ListItemBlock, MediaBlock, NotionFile, PageMetadata, ParagraphBlock, QuoteBlock, SyncedBlock,
    TableBlock, TableRowBlock, TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, Color, Link, MentionType, NotionId, PageId, RenderedDocument,
    RichTextItem, RichTextType, ValidatedUrl,
};

// --- Content Sources (Capability Traits and Interpreters) ---
pub use crate::algebras::{ContentCall, InMemoryContent, NotionContent};
pub use crate::api::NotionHttpClient;

// --- Conversion ---
pub use crate::formatting::block_renderer::LatexBlockRenderer;
pub use crate::formatting::{
    escape_latex, render_rich_text, BlockConverter, ConversionResult, Fragment, ImageReference,
    ImageSource, NoProgress, PageInfo, PageInfoCache, ProgressSink,
};

// --- Post-processing ---
pub use crate::postprocess::{
    convert_emojis, convert_unicode, merge_consecutive_lists, postprocess, rename_images,
    ImageMap, PostProcessed,
};

// --- Images ---
pub use crate::assets::{download_image_assets, image_map, plan_image_assets, ImageAsset};

// --- Output ---
pub use crate::output::{
    assemble_document, deliver, DeliveryTarget, DocumentFlags, OutputPlan, OutputReport, Template,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{
    compose_document, ComposedDocument, DocumentComposer, DocumentDelivery, PageConversion,
};
