//! Icon policy for text output.

use progman_core::types::ProgramItem;
use std::path::Path;

/// The item's icon file, when it names one that exists.
pub fn custom_icon(item: &ProgramItem) -> Option<&Path> {
    let path = Path::new(&item.icon_path);
    (!item.icon_path.is_empty() && path.exists()).then_some(path)
}

/// Upper-cased first character of the trimmed title, `?` for blank titles.
pub fn fallback_glyph(title: &str) -> char {
    title
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}
