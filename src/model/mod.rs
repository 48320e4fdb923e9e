//! Domain model: the block tree and page metadata as the converter sees them.

mod block;
pub mod blocks;
mod common;
mod page;

pub use block::Block;
pub use blocks::*;
pub use common::BlockCommon;
pub use page::PageMetadata;
