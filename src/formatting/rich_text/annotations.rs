// src/formatting/rich_text/annotations.rs
//! Annotation styling for rich text.
//!
//! Styles nest in a fixed order so identical annotations always produce
//! byte-identical markup.

use crate::constants::NOTION_HOST;
use crate::types::Annotations;

/// Renderer for text styles to LaTeX.
pub struct LatexStyleRenderer;

impl LatexStyleRenderer {
    /// Wraps `content` in one command per active annotation, innermost first:
    /// code, strikethrough, underline, italic, bold.
    pub fn apply_styles(content: &str, annotations: &Annotations) -> String {
        let mut result = content.to_string();

        if annotations.code {
            result = format!(r"\texttt{{{}}}", result);
        }

        if annotations.strikethrough {
            result = format!(r"\sout{{{}}}", result);
        }

        if annotations.underline {
            result = format!(r"\underline{{{}}}", result);
        }

        if annotations.italic {
            result = format!(r"\textit{{{}}}", result);
        }

        if annotations.bold {
            result = format!(r"\textbf{{{}}}", result);
        }

        // Color has no LaTeX counterpart here.
        result
    }

    /// Wraps already styled text in a hyperlink.
    pub fn apply_link(styled: &str, url: &str) -> String {
        format!(r"\href{{{}}}{{{}}}", normalize_link(url), styled)
    }
}

/// Workspace-relative links get the Notion host; plain HTTP is upgraded.
pub fn normalize_link(url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{}", NOTION_HOST, url)
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("https://{}", rest)
    } else {
        url.to_string()
    }
}
