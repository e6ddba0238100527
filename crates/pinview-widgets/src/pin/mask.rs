#![forbid(unsafe_code)]

//! Display-side masking for password-style fields.
//!
//! Only what surfaces show is masked. Stored cell values, and therefore the
//! field value, always hold the real characters.

use unicode_segmentation::UnicodeSegmentation;

/// Default mask glyph.
pub const BULLET: char = '\u{2022}';

/// Text a surface should show for a stored cell value.
///
/// With `mask` set, every grapheme becomes one copy of the glyph.
pub fn display_text(value: Option<&str>, mask: Option<char>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match mask {
        Some(glyph) => value.graphemes(true).map(|_| glyph).collect(),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmasked_passthrough() {
        assert_eq!(display_text(Some("7"), None), "7");
        assert_eq!(display_text(None, None), "");
    }

    #[test]
    fn masked_uses_glyph_per_grapheme() {
        assert_eq!(display_text(Some("7"), Some(BULLET)), "\u{2022}");
        assert_eq!(display_text(Some("e\u{301}"), Some('*')), "*");
        assert_eq!(display_text(None, Some('*')), "");
    }
}
