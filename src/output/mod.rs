// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! [`assembler`] turns a converted body into a complete document without
//! touching the outside world; [`deliver`] executes an [`OutputPlan`] and is
//! the only place where files, stdout and the clipboard are written.

pub mod assembler;
mod clipboard;
mod types;
mod writer;

pub use assembler::{assemble_document, uses_small_fonts, DocumentFlags, Template};
pub use clipboard::copy_to_clipboard;
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
