// src/postprocess/images.rs
//! Points figure inclusions at downloaded image files.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Image reference as it appears in the markup, mapped to its file name.
pub type ImageMap = IndexMap<String, String>;

static INCLUDE_GRAPHICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\includegraphics\[scale = 0\.4\]\{([^}]+)\}")
        .expect("Failed to compile includegraphics regex - this is a bug in the code")
});

/// Replace every mapped inclusion argument with its file name.
/// Unmapped references are left as they are.
pub fn rename_images(text: &str, image_map: &ImageMap) -> String {
    INCLUDE_GRAPHICS
        .replace_all(text, |caps: &Captures| {
            let reference = &caps[1];
            match image_map.get(reference) {
                Some(filename) => {
                    log::info!("Renaming image in TeX: {} -> {}", reference, filename);
                    format!(r"\includegraphics[scale = 0.4]{{{}}}", filename)
                }
                None => {
                    log::warn!("No filename mapping found for image URL: {}", reference);
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}
