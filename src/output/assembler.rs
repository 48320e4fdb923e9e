// src/output/assembler.rs
//! Splices a converted body into a LaTeX template.
//!
//! A template is a complete document whose last three lines are the
//! placeholder comment, a blank line and `\end{document}`. Those lines are
//! replaced by the body; everything before them is the preamble.

use std::path::Path;

use crate::error::AppError;

const BUNDLED_PREAMBLE: &str = include_str!("../../templates/preamble.tex");

/// Lines at the end of a template that the body replaces.
const TEMPLATE_TAIL_LINES: usize = 3;

const SMALL_FONT_COMMANDS: [&str; 4] = [r"\small", r"\footnotesize", r"\scriptsize", r"\tiny"];

const WARNINGS_BANNER: &str =
    "%%%%%%%%%%%%%%%%%%%% CONVERSION WARNINGS %%%%%%%%%%%%%%%%%%%%";

const UNSUPPORTED_CHARS_NOTE: &str = "% NOTE: Some UNICODE characters could not be converted. \
They appear in the document as U+XXXX. To typeset them you can try \
https://www.johndcook.com/unicode_latex.html. If that does not help, first look up which \
symbol they are (for example at https://www.compart.com/en/unicode) and then check how to \
produce them at https://tug.ctan.org/info/symbols/comprehensive/symbols-a4.pdf or draw them \
at https://detexify.kirelabs.org/classify.html.";

const SMALL_FONT_NOTE: &str = "% NOTE: The body uses reduced font size commands (\\small, \
\\footnotesize, \\scriptsize or \\tiny). Code boxes already typeset with a small minted font, \
so long lines in them or in other shrunken text may overflow the margins.";

/// A LaTeX template and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
    origin: String,
}

impl Template {
    /// The preamble shipped with the binary.
    pub fn bundled() -> Self {
        Self {
            text: BUNDLED_PREAMBLE.to_string(),
            origin: "bundled preamble".to_string(),
        }
    }

    /// Reads a user template from disk.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::TemplateNotFound {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_text(text, path.display().to_string())
    }

    pub fn from_text(text: impl Into<String>, origin: impl Into<String>) -> Result<Self, AppError> {
        let text = text.into();
        let origin = origin.into();

        let line_count = template_lines(&text).len();
        if line_count <= TEMPLATE_TAIL_LINES {
            return Err(AppError::InvalidTemplate {
                path: origin,
                reason: format!(
                    "expected more than {} lines, found {}",
                    TEMPLATE_TAIL_LINES, line_count
                ),
            });
        }

        Ok(Self { text, origin })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Everything but the trailing placeholder lines.
    pub fn preamble(&self) -> String {
        let lines = template_lines(&self.text);
        let keep = lines.len().saturating_sub(TEMPLATE_TAIL_LINES);
        lines[..keep].join("\n")
    }
}

/// Trailing newlines are not lines of their own.
fn template_lines(text: &str) -> Vec<&str> {
    text.trim_end_matches(['\r', '\n'])
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Document-level facts that add notes after `\end{document}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentFlags {
    pub has_unsupported_chars: bool,
    pub has_small_font_commands: bool,
}

impl DocumentFlags {
    pub fn detect(body: &str, has_unsupported_chars: bool) -> Self {
        Self {
            has_unsupported_chars,
            has_small_font_commands: uses_small_fonts(body),
        }
    }

    fn any(&self) -> bool {
        self.has_unsupported_chars || self.has_small_font_commands
    }
}

/// True when the body contains a reduced font size command.
pub fn uses_small_fonts(body: &str) -> bool {
    SMALL_FONT_COMMANDS.iter().any(|command| {
        body.match_indices(command).any(|(start, _)| {
            // \smallskip and friends are not font sizes.
            !body[start + command.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
        })
    })
}

/// The full document: preamble, body, `\end{document}` and any notes.
pub fn assemble_document(template: &Template, body: &str, flags: DocumentFlags) -> String {
    let mut document = format!("{}\n{}\n\n\\end{{document}}", template.preamble(), body);

    if flags.any() {
        document.push_str("\n\n");
        document.push_str(WARNINGS_BANNER);
    }
    if flags.has_unsupported_chars {
        document.push_str("\n\n");
        document.push_str(UNSUPPORTED_CHARS_NOTE);
    }
    if flags.has_small_font_commands {
        document.push_str("\n\n");
        document.push_str(SMALL_FONT_NOTE);
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tiny_template() -> Template {
        Template::from_text(
            "\\documentclass{article}\n\\begin{document}\n% body\n\n\\end{document}\n",
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_body_replaces_template_tail() {
        let document = assemble_document(&tiny_template(), "Hello \\par", DocumentFlags::default());
        assert_eq!(
            document,
            "\\documentclass{article}\n\\begin{document}\nHello \\par\n\n\\end{document}"
        );
    }

    #[test]
    fn test_crlf_templates_are_split_per_line() {
        let template = Template::from_text("a\r\nb\r\n% body\r\n\r\n\\end{document}", "crlf").unwrap();
        assert_eq!(template.preamble(), "a\nb");
    }

    #[test]
    fn test_unsupported_chars_add_banner_and_note() {
        let flags = DocumentFlags {
            has_unsupported_chars: true,
            has_small_font_commands: false,
        };
        let document = assemble_document(&tiny_template(), "x", flags);
        let tail = document.split("\\end{document}").nth(1).unwrap();

        assert!(tail.starts_with("\n\n%%%%"));
        assert!(tail.contains("CONVERSION WARNINGS"));
        assert!(tail.contains("U+XXXX"));
        assert!(!tail.contains("reduced font size"));
    }

    #[test]
    fn test_small_font_detection() {
        assert!(uses_small_fonts(r"{\small text}"));
        assert!(uses_small_fonts(r"\tiny"));
        assert!(!uses_small_fonts(r"\smallskip \tinyurl"));
        assert!(!uses_small_fonts("plain"));

        let flags = DocumentFlags::detect(r"{\footnotesize x}", false);
        let document = assemble_document(&tiny_template(), "x", flags);
        assert!(document.contains("CONVERSION WARNINGS"));
        assert!(document.contains("reduced font size"));
        assert!(!document.contains("U+XXXX"));
    }

    #[test]
    fn test_short_templates_are_rejected() {
        let err = Template::from_text("a\nb\nc\n", "short.tex").unwrap_err();
        assert!(matches!(err, AppError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_missing_template_file() {
        let err = Template::load(Path::new("/nonexistent/notion2tex/preamble.tex")).unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_bundled_preamble_defines_environments() {
        let preamble = Template::bundled().preamble();
        for definition in [
            r"\newtcbox{\notRendered}",
            r"\newcommand{\done}",
            r"\newlist{todolist}",
            "]{fancyquote}",
            r"\NewDocumentEnvironment{callout}",
            r"\newtcblisting{code}",
            r"\newcommand{\codeCaption}",
            r"\let\emoji\texttwemoji",
        ] {
            assert!(preamble.contains(definition), "missing {}", definition);
        }
        assert!(preamble.trim_end().ends_with(r"\maketitle"));
    }
}
