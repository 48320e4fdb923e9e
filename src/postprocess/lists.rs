// src/postprocess/lists.rs
//! Merging of the single-item list environments the converter emits.
//!
//! Every list item is its own environment, so a run of items arrives as a
//! run of environments that must be fused back into one list.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// The two regexes needed to flatten and merge one environment.
struct ListEnvironment {
    name: &'static str,
    /// Shortest `\begin{E}...\end{E}` span.
    span: Regex,
    /// `\end{E}` followed, across whitespace only, by `\begin{E}`.
    seam: Regex,
}

impl ListEnvironment {
    fn new(name: &'static str) -> Self {
        let span = Regex::new(&format!(r"(?s)\\begin\{{{0}\}}(.*?)\\end\{{{0}\}}", name))
            .expect("Failed to compile list span regex - this is a bug in the code");
        let seam = Regex::new(&format!(r"\\end\{{{0}\}}[ \t\r\n]*\\begin\{{{0}\}}", name))
            .expect("Failed to compile list seam regex - this is a bug in the code");
        Self { name, span, seam }
    }

    /// Rebuild every span with its content flattened and any same-type
    /// wrappers inside it removed.
    fn flatten(&self, input: &str) -> String {
        self.span
            .replace_all(input, |caps: &Captures| {
                let content = self.flatten(&caps[1]);
                let content = self
                    .span
                    .replace_all(&content, |inner: &Captures| self.flatten(&inner[1]));
                format!(
                    "\\begin{{{name}}}\n{}\n\\end{{{name}}}",
                    content,
                    name = self.name
                )
            })
            .into_owned()
    }

    fn merge(&self, input: &str) -> String {
        self.seam.replace_all(input, "\n").into_owned()
    }
}

static ITEMIZE: Lazy<ListEnvironment> = Lazy::new(|| ListEnvironment::new("itemize"));
static ENUMERATE: Lazy<ListEnvironment> = Lazy::new(|| ListEnvironment::new("enumerate"));
static TODOLIST: Lazy<ListEnvironment> = Lazy::new(|| ListEnvironment::new("todolist"));

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*[\r\n]")
        .expect("Failed to compile blank line regex - this is a bug in the code")
});

/// Fuse adjacent list environments of the same type and drop blank lines.
///
/// Itemize and enumerate spans are flattened first; to-do lists are only
/// merged.
pub fn merge_consecutive_lists(text: &str) -> String {
    let out = ITEMIZE.flatten(text);
    let out = ENUMERATE.flatten(&out);
    let out = ITEMIZE.merge(&out);
    let out = ENUMERATE.merge(&out);
    let out = TODOLIST.merge(&out);
    remove_blank_lines(&out)
}

/// Remove lines holding nothing but spaces or tabs.
pub fn remove_blank_lines(text: &str) -> String {
    BLANK_LINE.replace_all(text, "").into_owned()
}
