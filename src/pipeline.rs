// src/pipeline.rs
//! Pipeline capability traits for the three stages of a run: convert the
//! page, compose the document, deliver it.
//!
//! Each trait describes a single capability so stages can be tested in
//! isolation. [`compose_document`] is the pure part of composition.

use crate::error::AppError;
use crate::formatting::ConversionResult;
use crate::output::{assemble_document, DocumentFlags, OutputReport, Template};
use crate::postprocess::{postprocess, ImageMap};
use crate::types::{PageId, RenderedDocument};

/// Converts a Notion page into LaTeX fragments.
#[async_trait::async_trait]
pub trait PageConversion {
    async fn convert(&self, page_id: &PageId) -> Result<ConversionResult, AppError>;
}

/// Turns converted fragments into a deliverable document.
pub trait DocumentComposer {
    fn compose(
        &self,
        result: &ConversionResult,
        images: Option<&ImageMap>,
    ) -> Result<ComposedDocument, AppError>;
}

/// Delivers a document to its destinations.
pub trait DocumentDelivery {
    fn deliver(&self, document: RenderedDocument) -> Result<OutputReport, AppError>;
}

/// A composed document and the flags found while composing it.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub document: RenderedDocument,
    pub flags: DocumentFlags,
}

/// Post-process the converted body and, given a template, wrap it into a
/// complete document. Without a template the post-processed body is returned
/// on its own.
pub fn compose_document(
    result: &ConversionResult,
    images: Option<&ImageMap>,
    template: Option<&Template>,
) -> ComposedDocument {
    let processed = postprocess(&result.body(), images);
    let flags = DocumentFlags::detect(&processed.text, processed.has_unsupported_chars);

    let text = match template {
        Some(template) => {
            log::debug!("Assembling document with {}", template.origin());
            assemble_document(template, &processed.text, flags)
        }
        None => processed.text,
    };

    ComposedDocument {
        document: RenderedDocument::new(text),
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockId;

    fn converted(markups: &[&str]) -> ConversionResult {
        let mut result = ConversionResult::new();
        for markup in markups {
            result.push_fragment(&BlockId::new_v4(), markup.to_string());
        }
        result
    }

    #[test]
    fn test_body_only_skips_the_template() {
        let composed = compose_document(&converted(&["Hello \\par"]), None, None);
        assert_eq!(composed.document.as_str(), "Hello \\par");
        assert_eq!(composed.flags, DocumentFlags::default());
    }

    #[test]
    fn test_flags_reach_the_assembled_document() {
        let composed = compose_document(
            &converted(&["Snowman \u{2603} \\par"]),
            None,
            Some(&Template::bundled()),
        );

        assert!(composed.flags.has_unsupported_chars);
        assert!(composed.document.as_str().contains(r"\notRendered{U+2603}"));
        assert!(composed.document.as_str().contains("CONVERSION WARNINGS"));
    }
}
