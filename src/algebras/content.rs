// src/algebras/content.rs
//! Content retrieval algebra for Notion API.
//!
//! This module defines the [`NotionContent`] capability trait. The converter
//! only ever asks two questions of its source: what are the children of this
//! block, and what is this page called. Transport, retries and pagination
//! are implementation details of the interpreters.

use crate::model::{Block, PageMetadata};
use crate::types::{NotionId, PageId};
use async_trait::async_trait;

use super::error::FetchError;

/// Content retrieval capability for Notion API.
///
/// This trait is **object-safe** and is used as `Arc<dyn NotionContent>`.
///
/// # Laws
///
/// - **L1 (Order)**: `list_children` returns children in the order the
///   service stores them, with every page of results concatenated.
/// - **L2 (Shallow)**: children are direct children only. Grandchildren are
///   reached through another `list_children` call on the child's id.
/// - **L3 (Classification)**: failures are reported as [`FetchError`] so the
///   caller can tell access problems from transient and fatal ones.
#[async_trait]
pub trait NotionContent: Send + Sync {
    /// List the direct children of a page or block.
    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, FetchError>;

    /// Retrieve the title and icon of a page.
    async fn page_metadata(&self, page: &PageId) -> Result<PageMetadata, FetchError>;
}

#[async_trait]
impl<T: NotionContent + ?Sized> NotionContent for std::sync::Arc<T> {
    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, FetchError> {
        (**self).list_children(parent).await
    }

    async fn page_metadata(&self, page: &PageId) -> Result<PageMetadata, FetchError> {
        (**self).page_metadata(page).await
    }
}
