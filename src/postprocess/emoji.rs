// src/postprocess/emoji.rs
//! Emoji sequences become `\emoji{...}` commands.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Fully-qualified emoji: keycaps, flags, and pictographs with their optional
/// skin tone, tag sequence and zero-width-joiner continuations.
static EMOJI_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[0-9#*]\x{FE0F}?\x{20E3}",
        r"|[\x{1F1E6}-\x{1F1FF}]{2}",
        r"|(?:\p{Emoji_Presentation}|\p{Extended_Pictographic}\x{FE0F})",
        r"\p{Emoji_Modifier}?\x{FE0F}?",
        r"(?:[\x{E0020}-\x{E007E}]+\x{E007F})?",
        r"(?:\x{200D}(?:\p{Emoji_Presentation}|\p{Extended_Pictographic})\x{FE0F}?\p{Emoji_Modifier}?\x{FE0F}?)*",
    ))
    .expect("Failed to compile emoji regex - this is a bug in the code")
});

/// Replace each emoji with its dash-joined lowercase code points, without
/// variation selectors.
pub fn convert_emojis(text: &str) -> String {
    EMOJI_SEQUENCE
        .replace_all(text, |caps: &Captures| {
            let code_points: Vec<String> = caps[0]
                .chars()
                .filter(|&c| c != VARIATION_SELECTOR_16)
                .map(|c| format!("{:x}", c as u32))
                .collect();
            if code_points.is_empty() {
                return caps[0].to_string();
            }
            format!(r"\emoji{{{}}}", code_points.join("-"))
        })
        .into_owned()
}
