// src/postprocess/unicode.rs
//! Fallback for characters pdflatex cannot typeset from UTF-8 input.

use super::textcomp::textcomp_macro;

/// Characters the document's input encoding handles directly: accented
/// Latin letters, curly single quotes and the middle dot.
pub fn is_allowed_verbatim(c: char) -> bool {
    matches!(c, '\u{00C0}'..='\u{017F}' | '\u{2018}' | '\u{2019}' | '\u{00B7}')
}

/// Rewrite every non-ASCII character outside the allow-list.
///
/// Characters with a textcomp macro become that macro; anything else
/// becomes a visible `U+XXXX` placeholder and raises the returned flag.
pub fn convert_unicode(text: &str) -> (String, bool) {
    let mut has_unsupported = false;
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        if c.is_ascii() || is_allowed_verbatim(c) {
            out.push(c);
        } else if let Some(macro_name) = textcomp_macro(c) {
            out.push_str(macro_name);
            out.push(' ');
        } else {
            has_unsupported = true;
            out.push_str(&format!(r"\notRendered{{U+{:04X}}}", c as u32));
        }
    }

    (out, has_unsupported)
}
