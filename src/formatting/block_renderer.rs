// src/formatting/block_renderer.rs
//! Per-type renderers for blocks that need nothing beyond their own payload.
//!
//! Every method here is pure: payload in, markup out. Renderers that fetch
//! children live next to the converter.

use super::code_languages::minted_language;
use super::escape::{escape_latex, strip_scheme, strip_trailing_slash};
use super::page_info::PageInfoCache;
use super::rich_text::{plain_text, render_rich_text};
use super::{ImageReference, ImageSource};
use crate::constants::{NOTION_HOST, PAGE_FALLBACK_ICON};
use crate::model::*;
use crate::types::{BlockId, PageId, RichTextItem};

/// Prefix marking headings and toggles that fold in Notion.
pub const TOGGLE_MARKER: &str = r"\faAngleDown \, ";

/// Renders leaf blocks of one page.
pub struct LatexBlockRenderer<'a> {
    page_id: &'a PageId,
    cache: &'a PageInfoCache,
}

impl<'a> LatexBlockRenderer<'a> {
    pub fn new(page_id: &'a PageId, cache: &'a PageInfoCache) -> Self {
        Self { page_id, cache }
    }

    /// Inline rendering of a rich text field.
    pub fn text(&self, items: &[RichTextItem]) -> String {
        render_rich_text(items, self.cache)
    }

    /// Deep link to a block inside the page being converted.
    pub fn block_link(&self, block_id: &BlockId) -> String {
        format!("{}/{}#{}", NOTION_HOST, self.page_id.as_str(), block_id.as_str())
    }

    pub fn paragraph(&self, b: &ParagraphBlock) -> String {
        format!(r"{} \par", self.text(&b.content.rich_text))
    }

    pub fn heading(&self, level: u8, b: &HeadingBlock) -> String {
        let command = match level {
            1 => "section",
            2 => "subsection",
            _ => "subsubsection",
        };
        let prefix = if b.is_toggleable { TOGGLE_MARKER } else { "" };
        format!(
            r"\{}*{{{}{}}}",
            command,
            prefix,
            self.text(&b.content.rich_text)
        )
    }

    pub fn equation(&self, b: &EquationBlock) -> String {
        format!("\\begin{{equation*}}\n{}\n\\end{{equation*}}", b.expression)
    }

    pub fn quote(&self, b: &QuoteBlock) -> String {
        format!(
            "\\begin{{fancyquote}}\n{}\n\\end{{fancyquote}}",
            self.text(&b.content.rich_text)
        )
    }

    /// The toggle's own line; children are appended by the caller.
    pub fn toggle_line(&self, b: &ToggleBlock) -> String {
        format!(r"{}{} \par", TOGGLE_MARKER, self.text(&b.content.rich_text))
    }

    /// A floating figure, plus the reference needed to fetch the image later.
    ///
    /// Notion-hosted images are included by file name only, so the markup
    /// compiles once the image sits next to the document.
    pub fn image(&self, b: &ImageBlock) -> (String, ImageReference) {
        let (source, include) = match &b.image {
            FileObject::File(file) => (ImageSource::File, url_basename(&file.url).to_string()),
            FileObject::External(external) => (ImageSource::External, external.url.clone()),
        };

        let markup = format!(
            "\\begin{{figure}}[H]\n    \\centering\n    \\includegraphics[scale = 0.4]{{{}}}\n    \\caption{{{}}}\n\\end{{figure}}",
            include,
            self.text(&b.caption)
        );
        let reference = ImageReference {
            block_id: b.common.id.clone(),
            source,
            url: b.image.url().to_string(),
        };
        (markup, reference)
    }

    pub fn file(&self, b: &FileBlock) -> String {
        let name = b.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("file");
        let icon = if name.trim().to_lowercase().ends_with(".pdf") {
            r"\faFilePdfO"
        } else {
            r"\faFile"
        };
        format!(
            r"\href{{{}}}{{{} \quad {}}} \par",
            self.block_link(&b.common.id),
            icon,
            escape_latex(name)
        )
    }

    pub fn child_page(&self, b: &ChildPageBlock) -> String {
        let title = if b.title.is_empty() {
            "Subpage"
        } else {
            b.title.as_str()
        };
        format!(
            r"\href{{{}/{}}}{{{} \quad {}}} \par",
            NOTION_HOST,
            b.common.id.as_str(),
            PAGE_FALLBACK_ICON,
            escape_latex(title)
        )
    }

    pub fn bookmark(&self, b: &BookmarkBlock) -> String {
        let display = escape_latex(strip_trailing_slash(&b.url));
        format!(r"\href{{{}}}{{{}}}\par", b.url, display)
    }

    pub fn embed(&self, b: &EmbedBlock) -> String {
        if b.url.is_empty() {
            return String::new();
        }
        not_rendered("Embed block", &b.url)
    }

    /// PDF, video and audio blocks. Notion-hosted media links back to the block.
    pub fn media(&self, label: &str, b: &MediaBlock) -> String {
        let url = match &b.media {
            FileObject::External(external) => external.url.clone(),
            FileObject::File(_) => self.block_link(&b.common.id),
        };
        not_rendered(label, &url)
    }

    pub fn child_database(&self, b: &ChildDatabaseBlock) -> String {
        not_rendered("Inline Database", &self.block_link(&b.common.id))
    }

    pub fn link_preview(&self, b: &LinkPreviewBlock) -> String {
        not_rendered("Link Preview", &b.url)
    }

    pub fn breadcrumb(&self) -> String {
        r"[\notRendered{Breadcrumbs}] \par".to_string()
    }

    /// A minted listing. Code content is taken unstyled from the chunks.
    pub fn code(&self, b: &CodeBlock) -> String {
        let mut out = format!(
            "\\begin{{code}}{{{}}}\n{}\n\\end{{code}}\n",
            minted_language(&b.language),
            plain_text(&b.content.rich_text)
        );

        let caption = self.text(&b.caption);
        if !caption.is_empty() {
            out.push_str(&format!(r"\codeCaption{{{}}}", caption));
        }
        out
    }
}

/// Placeholder for content with no LaTeX rendering, linking to where it lives.
pub fn not_rendered(label: &str, url: &str) -> String {
    let display = escape_latex(strip_scheme(url));
    format!(
        r"[\notRendered{{{}}}] $\rightarrow$ \href{{{}}}{{{}}}\par",
        label,
        url,
        strip_trailing_slash(&display)
    )
}

/// Last path segment of a URL, with any query string or fragment removed.
pub fn url_basename(url: &str) -> &str {
    let clean = url.split(['?', '#']).next().unwrap_or(url);
    clean.rsplit('/').next().unwrap_or(clean)
}
