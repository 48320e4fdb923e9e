// src/formatting/escape.rs
//! LaTeX escaping for titles, names and URLs.
//!
//! Rich text content is emitted verbatim, so authors can write LaTeX in
//! Notion; only strings that come from metadata pass through here.

/// Prefix each LaTeX special character with a backslash.
pub fn escape_latex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + input.len() / 8);
    for c in input.chars() {
        if matches!(c, '_' | '&' | '#' | '%' | '$' | '~' | '^' | '{' | '}' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Strip a leading `http://` or `https://` for display.
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Remove exactly one trailing slash, if any.
pub fn strip_trailing_slash(text: &str) -> &str {
    text.strip_suffix('/').unwrap_or(text)
}
