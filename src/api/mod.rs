// src/api/mod.rs
//! Notion API interaction: retrieving content from a workspace.
//!
//! I/O lives in [`client`], decoding in [`parser`] and [`responses`]. The
//! converter never sees any of it: it talks to
//! [`NotionContent`](crate::algebras::NotionContent), which
//! [`NotionHttpClient`] implements.

pub mod client;
mod pagination;
pub mod parser;
mod responses;

// Re-export the public interface
pub use client::NotionHttpClient;
