// src/formatting/code_languages.rs
//! Notion code-block languages that minted can highlight.
//!
//! Each entry is both a language name Notion hands out and a Pygments lexer
//! alias, so it can be passed to `minted language=` unchanged.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Lexer used for anything outside [`SUPPORTED_LANGUAGES`].
pub const FALLBACK_LANGUAGE: &str = "text";

static SUPPORTED_LANGUAGES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abap",
        "arduino",
        "bash",
        "c",
        "c#",
        "c++",
        "clojure",
        "coffeescript",
        "css",
        "dart",
        "diff",
        "docker",
        "elixir",
        "elm",
        "erlang",
        "f#",
        "fortran",
        "gherkin",
        "glsl",
        "go",
        "graphql",
        "groovy",
        "haskell",
        "html",
        "java",
        "javascript",
        "json",
        "julia",
        "kotlin",
        "latex",
        "less",
        "lisp",
        "livescript",
        "lua",
        "makefile",
        "markdown",
        "matlab",
        "nix",
        "objective-c",
        "ocaml",
        "pascal",
        "perl",
        "php",
        "powershell",
        "prolog",
        "protobuf",
        "python",
        "r",
        "reason",
        "ruby",
        "rust",
        "sass",
        "scala",
        "scheme",
        "scss",
        "shell",
        "sql",
        "swift",
        "text",
        "typescript",
        "vb.net",
        "verilog",
        "vhdl",
        "xml",
        "yaml",
    ]
    .into_iter()
    .collect()
});

pub fn is_supported(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(language)
}

/// The lexer for a Notion language name.
pub fn minted_language(language: &str) -> &str {
    if is_supported(language) {
        language
    } else {
        FALLBACK_LANGUAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages_pass_through() {
        assert_eq!(minted_language("rust"), "rust");
        assert_eq!(minted_language("c++"), "c++");
    }

    #[test]
    fn test_unknown_languages_fall_back() {
        assert_eq!(minted_language("plain text"), "text");
        assert_eq!(minted_language("mermaid"), "text");
        assert_eq!(minted_language(""), "text");
        assert_eq!(minted_language("Rust"), "text");
    }
}
