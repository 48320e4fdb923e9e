// src/algebras/mod.rs
//! Capability algebras for notion2tex.
//!
//! This module defines the traits that represent **capabilities**, not
//! implementations. Each trait is:
//!
//! - object-safe, so it can be used as `dyn Trait`;
//! - documented with the laws every implementation must satisfy;
//! - async via `async_trait`.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs, pipeline.rs)
//!         ↓
//! Conversion Layer (formatting/)
//!         ↓
//! Capability Layer (algebras/)
//!         ↓
//! Interpreters (api::NotionHttpClient, memory::InMemoryContent)
//! ```
//!
//! # Capability Traits
//!
//! - [`NotionContent`]: block children and page metadata retrieval

pub mod content;
pub mod error;
pub mod memory;

// Re-exports for convenience
pub use content::NotionContent;
pub use error::FetchError;
pub use memory::{ContentCall, InMemoryContent};
