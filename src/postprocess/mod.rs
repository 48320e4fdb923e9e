// src/postprocess/mod.rs
//! Text-level passes over the concatenated document body.
//!
//! Each pass is a regex rewrite of the serialized markup, run in a fixed
//! order: list merging, image renaming, emoji substitution, the Unicode
//! fallback and finally comparison-sign normalization.

mod emoji;
mod images;
mod lists;
mod textcomp;
mod unicode;

pub use emoji::convert_emojis;
pub use images::{rename_images, ImageMap};
pub use lists::merge_consecutive_lists;
pub use textcomp::textcomp_macro;
pub use unicode::{convert_unicode, is_allowed_verbatim};

/// The post-processed body and what the passes noticed along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessed {
    pub text: String,
    /// Set when some character could only be shown as a `U+XXXX` placeholder.
    pub has_unsupported_chars: bool,
}

/// Run every pass over `text`. Image references are only rewritten when a
/// map is supplied.
pub fn postprocess(text: &str, image_map: Option<&ImageMap>) -> PostProcessed {
    let merged = merge_consecutive_lists(text);
    let renamed = match image_map {
        Some(map) => rename_images(&merged, map),
        None => merged,
    };
    let with_emoji = convert_emojis(&renamed);
    let (converted, has_unsupported_chars) = convert_unicode(&with_emoji);

    PostProcessed {
        text: normalize_comparison_signs(&converted),
        has_unsupported_chars,
    }
}

/// `\gt` and `\lt` come out of Notion equations but only exist in MathJax.
pub fn normalize_comparison_signs(text: &str) -> String {
    text.replace(r"\gt", ">").replace(r"\lt", "<")
}
