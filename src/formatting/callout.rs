// src/formatting/callout.rs
//! Callouts become a `callout` tcolorbox.
//!
//! A callout without children shows its own text. One with children shows
//! them instead, and when the first child is a heading that heading becomes
//! the box title.

use regex::Regex;

use super::converter::{children_failure_label, BlockConverter, BlockOutput};
use super::{ConversionResult, Fragment};
use crate::constants::CALLOUT_FALLBACK_EMOJI;
use crate::error::AppError;
use crate::model::{CalloutBlock, Icon};

/// The optional icon argument of the callout environment.
pub(super) fn callout_icon(icon: Option<&Icon>) -> String {
    match icon {
        Some(Icon::Emoji(emoji)) => {
            let code = emoji
                .chars()
                .next()
                .map(|c| format!("{:x}", c as u32))
                .unwrap_or_else(|| CALLOUT_FALLBACK_EMOJI.to_string());
            format!(r"\emoji{{{}}}", code)
        }
        Some(Icon::External(_)) | Some(Icon::File(_)) => r"\notRendered{\faFileO}".to_string(),
        None => String::new(),
    }
}

/// Splits a leading heading off the rendered children.
///
/// Returns the heading text, if the first fragment is a sectioning command,
/// and the body made of the remaining fragments.
pub(super) fn split_title(fragments: &[Fragment]) -> (String, String) {
    lazy_static::lazy_static! {
        static ref HEADING: Regex = Regex::new(r"^\\(sub)*section\*?\{([^}]*)\}")
            .expect("Failed to compile heading regex - this is a bug in the code");
    }

    let join = |fragments: &[Fragment]| {
        fragments
            .iter()
            .map(|f| f.markup.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    let Some(first) = fragments.first() else {
        return (String::new(), String::new());
    };

    match HEADING.captures(first.markup.trim()) {
        Some(captures) => {
            let title = captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (title, join(&fragments[1..]))
        }
        None => (String::new(), join(fragments)),
    }
}

pub(super) fn callout_markup(icon: &str, title: &str, color: &str, body: &str) -> String {
    format!(
        "\\begin{{callout}}[{}][{}][{}]\n{}\n\\end{{callout}}",
        icon, title, color, body
    )
}

impl BlockConverter {
    pub(super) async fn render_callout(
        &self,
        b: &CalloutBlock,
        level: usize,
    ) -> Result<BlockOutput, AppError> {
        let icon = callout_icon(b.icon.as_ref());
        let color = b.content.color.callout_name();
        let mut effects = ConversionResult::new();

        let (title, body) = if b.common.has_children {
            let mut children = self
                .convert_children(&b.common.id, level, children_failure_label(&b.common.id))
                .await?;
            let split = split_title(&children.fragments);
            children.blocks_processed = 0;
            effects.absorb_side_effects(&mut children);
            split
        } else {
            (String::new(), self.renderer().text(&b.content.rich_text))
        };

        effects.blocks_processed = 1;
        Ok(BlockOutput {
            markup: callout_markup(&icon, &title, color, &body),
            effects,
        })
    }
}
