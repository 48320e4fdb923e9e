// src/algebras/memory.rs
//! In-memory interpreter for [`NotionContent`].
//!
//! Serves pre-built block trees and page metadata without any network access.
//! Failures can be scripted per id, and every call is recorded so tests can
//! assert on which fetches happened.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{FetchError, NotionContent};
use crate::model::{Block, PageMetadata};
use crate::types::{NotionId, PageId};

/// A call made against an [`InMemoryContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCall {
    ListChildren(String),
    PageMetadata(String),
}

#[derive(Debug, Default)]
pub struct InMemoryContent {
    children: HashMap<String, Vec<Block>>,
    pages: HashMap<String, PageMetadata>,
    failures: HashMap<String, FetchError>,
    calls: Mutex<Vec<ContentCall>>,
}

impl InMemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the children returned for `parent`.
    pub fn with_children(mut self, parent: impl Into<NotionId>, blocks: Vec<Block>) -> Self {
        self.children
            .insert(parent.into().as_str().to_string(), blocks);
        self
    }

    /// Register the metadata returned for `page`.
    pub fn with_page(mut self, page: &PageId, metadata: PageMetadata) -> Self {
        self.pages.insert(page.as_str().to_string(), metadata);
        self
    }

    /// Make every fetch for `id` fail with `error`.
    pub fn failing(mut self, id: impl Into<NotionId>, error: FetchError) -> Self {
        self.failures.insert(id.into().as_str().to_string(), error);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ContentCall> {
        self.calls.lock().clone()
    }

    /// Number of `list_children` calls made so far.
    pub fn children_requests(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ContentCall::ListChildren(_)))
            .count()
    }

    fn scripted_failure(&self, id: &str) -> Option<FetchError> {
        self.failures.get(id).cloned()
    }
}

#[async_trait]
impl NotionContent for InMemoryContent {
    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, FetchError> {
        let key = parent.as_str();
        self.calls
            .lock()
            .push(ContentCall::ListChildren(key.to_string()));

        if let Some(error) = self.scripted_failure(key) {
            return Err(error);
        }
        // Unknown parents have no children, the same answer the service gives
        // for a leaf block.
        Ok(self.children.get(key).cloned().unwrap_or_default())
    }

    async fn page_metadata(&self, page: &PageId) -> Result<PageMetadata, FetchError> {
        let key = page.as_str();
        self.calls
            .lock()
            .push(ContentCall::PageMetadata(key.to_string()));

        if let Some(error) = self.scripted_failure(key) {
            return Err(error);
        }
        self.pages
            .get(key)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                id: key.to_string(),
            })
    }
}
